use std::collections::HashSet;

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};

use crate::dom::flatten_visible_text;
use crate::types::CleanedContent;

/// Parses `markup` into a detached fragment, strips citation artifacts and
/// returns the flattened text plus the cleaned serialized markup.
///
/// The fragment is exclusively owned here; the caller's document is never
/// mutated. Cleaning is idempotent: a second pass over the result removes
/// nothing further.
pub fn clean_fragment(markup: &str) -> CleanedContent {
    let mut fragment = Html::parse_fragment(markup);
    scrub_citation_artifacts(&mut fragment);
    let root = fragment.root_element();
    CleanedContent {
        text: flatten_visible_text(root),
        markup: root.inner_html(),
    }
}

/// Visible text of `markup` without cleaning, used to judge whether a user
/// selection carries any content at all.
pub(crate) fn fragment_text(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    flatten_visible_text(fragment.root_element())
}

/// Citation markers render as small interactive elements holding a bare
/// number, sometimes followed by an ellipsis toggle. The rules are
/// heuristic: a numeric button could equally be a page number.
fn scrub_citation_artifacts(fragment: &mut Html) {
    let Ok(candidates) = Selector::parse("button, span, a") else {
        return;
    };
    let Ok(buttons) = Selector::parse("button") else {
        return;
    };

    let mut doomed: HashSet<NodeId> = HashSet::new();

    for element in fragment.select(&candidates) {
        let text = element.text().collect::<String>();
        let text = text.trim();

        if is_citation_number(text) {
            match element.value().name() {
                "button" => {
                    doomed.insert(element.id());
                }
                "span" if has_citation_class(&element) => {
                    doomed.insert(element.id());
                }
                _ => {}
            }
        }

        // The "..." toggle rendered next to citation groups.
        if text == "..." || text == "\u{2026}" {
            doomed.insert(element.id());
        }
    }

    // Second pass, broad safety net: drop every button whose whole text is
    // numeric regardless of class metadata.
    for element in fragment.select(&buttons) {
        let text = element.text().collect::<String>();
        let text = text.trim();
        if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
            doomed.insert(element.id());
        }
    }

    for id in doomed {
        if let Some(mut node) = fragment.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Bare 1-3 digit number, the shape of an inline citation marker.
fn is_citation_number(text: &str) -> bool {
    !text.is_empty() && text.len() <= 3 && text.chars().all(|c| c.is_ascii_digit())
}

fn has_citation_class(element: &ElementRef<'_>) -> bool {
    element
        .value()
        .attr("class")
        .is_some_and(|class| class.contains("citation") || class.contains("source"))
}
