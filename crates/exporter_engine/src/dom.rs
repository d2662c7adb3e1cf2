use ego_tree::{NodeId, NodeRef};
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// Tags that never contribute to rendered output.
const NON_RENDERED_TAGS: &[&str] = &["script", "style", "noscript", "template", "head", "title"];

/// Tags that end a line in flattened text.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "div", "dd", "dl", "dt", "footer", "h1",
    "h2", "h3", "h4", "h5", "h6", "header", "li", "main", "ol", "p", "pre", "section", "table",
    "tr", "ul",
];

/// The two layout capabilities the selector needs from any document-model
/// backend ("is this node rendered", "flattened visible text"), plus the
/// query surface it probes with.
pub trait DocumentModel {
    type Node: Copy;

    /// All elements matching a CSS selector, in document order.
    fn query(&self, selector: &str) -> Vec<Self::Node>;

    /// Container-like elements scanned by the exhaustive fallback.
    fn containers(&self) -> Vec<Self::Node>;

    /// Whether the node currently has a rendering box.
    fn is_rendered(&self, node: Self::Node) -> bool;

    /// Flattened visible text of the node's subtree.
    fn visible_text(&self, node: Self::Node) -> String;

    /// Serialized markup of the node's contents.
    fn subtree_html(&self, node: Self::Node) -> String;
}

/// [`DocumentModel`] backed by a parsed `scraper` document.
///
/// Without a layout engine, "rendered" is approximated structurally: a node
/// counts as rendered unless it or an ancestor is a non-rendered tag,
/// carries the `hidden` attribute, or is styled `display:none`.
pub struct ScraperDocument {
    doc: Html,
}

impl ScraperDocument {
    pub fn parse(html: &str) -> Self {
        Self {
            doc: Html::parse_document(html),
        }
    }

    fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        self.doc.tree.get(id).and_then(ElementRef::wrap)
    }
}

impl DocumentModel for ScraperDocument {
    type Node = NodeId;

    fn query(&self, selector: &str) -> Vec<NodeId> {
        let Ok(parsed) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.doc.select(&parsed).map(|el| el.id()).collect()
    }

    fn containers(&self) -> Vec<NodeId> {
        self.query("div, section")
    }

    fn is_rendered(&self, node: NodeId) -> bool {
        let Some(element) = self.element(node) else {
            return false;
        };
        for node_ref in std::iter::once(*element).chain(element.ancestors()) {
            let Some(el) = ElementRef::wrap(node_ref) else {
                continue;
            };
            let value = el.value();
            if NON_RENDERED_TAGS.contains(&value.name()) {
                return false;
            }
            if value.attr("hidden").is_some() {
                return false;
            }
            if let Some(style) = value.attr("style") {
                let style: String = style.to_ascii_lowercase().split_whitespace().collect();
                if style.contains("display:none") {
                    return false;
                }
            }
        }
        true
    }

    fn visible_text(&self, node: NodeId) -> String {
        match self.element(node) {
            Some(element) => flatten_visible_text(element),
            None => String::new(),
        }
    }

    fn subtree_html(&self, node: NodeId) -> String {
        match self.element(node) {
            Some(element) => element.inner_html(),
            None => String::new(),
        }
    }
}

/// Flattens the subtree under `root` into visible text: skipped tags are
/// dropped, block boundaries become newlines, whitespace runs collapse.
pub(crate) fn flatten_visible_text(root: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(*root, &mut raw);
    normalize_text(&raw)
}

fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                let name = element.name();
                if NON_RENDERED_TAGS.contains(&name) {
                    continue;
                }
                collect_text(child, out);
                if BLOCK_TAGS.contains(&name) {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

fn normalize_text(raw: &str) -> String {
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_text_skips_scripts_and_collapses_whitespace() {
        let doc = ScraperDocument::parse(
            "<html><body><div id='x'><p>First   line</p><script>let a = 1;</script>\
             <p>Second line</p></div></body></html>",
        );
        let node = doc.query("#x")[0];
        assert_eq!(doc.visible_text(node), "First line\nSecond line");
    }

    #[test]
    fn display_none_ancestors_hide_descendants() {
        let doc = ScraperDocument::parse(
            "<html><body><div style='display: none'><section id='inner'>hidden</section></div>\
             <section id='shown'>shown</section></body></html>",
        );
        let inner = doc.query("#inner")[0];
        let shown = doc.query("#shown")[0];
        assert!(!doc.is_rendered(inner));
        assert!(doc.is_rendered(shown));
    }
}
