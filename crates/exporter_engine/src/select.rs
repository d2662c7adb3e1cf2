use crate::clean::{clean_fragment, fragment_text};
use crate::dom::DocumentModel;
use crate::types::CleanedContent;

/// A candidate must render more than this many characters to be accepted.
pub const MIN_CONTENT_CHARS: usize = 50;

/// One entry in the ordered content-location table.
#[derive(Debug, Clone, Copy)]
pub struct ContentProbe {
    /// CSS selector for the candidate region.
    pub query: &'static str,
    /// Rendered-text length (characters) the best match must exceed.
    pub min_chars: usize,
}

/// Probe order: product-specific viewer containers first, then generic
/// semantic regions, then class/id fallbacks. The container classes track a
/// third-party UI and may need updating when it changes.
pub const CONTENT_PROBES: &[ContentProbe] = &[
    ContentProbe {
        query: "labs-tailwind-doc-viewer",
        min_chars: MIN_CONTENT_CHARS,
    },
    ContentProbe {
        query: ".artifact-content",
        min_chars: MIN_CONTENT_CHARS,
    },
    ContentProbe {
        query: "main",
        min_chars: MIN_CONTENT_CHARS,
    },
    ContentProbe {
        query: "article",
        min_chars: MIN_CONTENT_CHARS,
    },
    ContentProbe {
        query: "[role=\"main\"]",
        min_chars: MIN_CONTENT_CHARS,
    },
    ContentProbe {
        query: ".notebook-content",
        min_chars: MIN_CONTENT_CHARS,
    },
    ContentProbe {
        query: "#content",
        min_chars: MIN_CONTENT_CHARS,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("no content found; select text or ensure the content is visible")]
    ContentNotFound,
}

/// Locates the most relevant content region and returns a cleaned detached
/// copy of it.
///
/// Fallback chain, first success wins:
/// 1. a non-empty user selection, materialized into one container;
/// 2. the probe table, first qualifying tier;
/// 3. an exhaustive scan over rendered container elements.
pub fn select_content<M: DocumentModel>(
    doc: &M,
    selection: Option<&[String]>,
) -> Result<CleanedContent, SelectError> {
    if let Some(ranges) = selection {
        let container: String = ranges.concat();
        if !fragment_text(&container).trim().is_empty() {
            return Ok(clean_fragment(&container));
        }
    }

    if let Some(node) = first_qualifying(doc, CONTENT_PROBES) {
        return Ok(clean_fragment(&doc.subtree_html(node)));
    }

    let mut best: Option<(M::Node, usize)> = None;
    for node in doc.containers() {
        if !doc.is_rendered(node) {
            continue;
        }
        let chars = rendered_chars(doc, node);
        if best.is_none_or(|(_, max)| chars > max) {
            best = Some((node, chars));
        }
    }
    if let Some((node, chars)) = best {
        if chars > MIN_CONTENT_CHARS {
            return Ok(clean_fragment(&doc.subtree_html(node)));
        }
    }

    Err(SelectError::ContentNotFound)
}

/// Evaluates the probe table in order and returns the best match of the
/// first tier whose best match clears that tier's threshold. Later tiers are
/// not consulted even if they would match more text.
pub fn first_qualifying<M: DocumentModel>(doc: &M, probes: &[ContentProbe]) -> Option<M::Node> {
    probes.iter().find_map(|probe| {
        let mut best: Option<(M::Node, usize)> = None;
        for node in doc.query(probe.query) {
            let chars = rendered_chars(doc, node);
            // Strictly greater keeps the earliest of equal-length matches.
            if best.is_none_or(|(_, max)| chars > max) {
                best = Some((node, chars));
            }
        }
        best.and_then(|(node, chars)| (chars > probe.min_chars).then_some(node))
    })
}

fn rendered_chars<M: DocumentModel>(doc: &M, node: M::Node) -> usize {
    doc.visible_text(node).trim().chars().count()
}
