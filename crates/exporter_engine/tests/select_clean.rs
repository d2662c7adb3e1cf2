use std::sync::Once;

use exporter_engine::{clean_fragment, select_content, DocumentModel, ScraperDocument, SelectError};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(exporter_logging::initialize_for_tests);
}

const LONG_PARAGRAPH: &str =
    "This paragraph is intentionally long enough to clear the fifty character minimum threshold.";

#[test]
fn selection_bypasses_probe_tiers() {
    init_logging();
    let document = ScraperDocument::parse(&format!(
        "<html><body><main><p>{LONG_PARAGRAPH}</p></main></body></html>"
    ));
    let selection = vec!["Hello world".to_string()];

    let content = select_content(&document, Some(&selection)).unwrap();
    assert_eq!(content.text, "Hello world");
}

#[test]
fn whitespace_only_selection_falls_through_to_probes() {
    init_logging();
    let document = ScraperDocument::parse(&format!(
        "<html><body><main><p>{LONG_PARAGRAPH}</p></main></body></html>"
    ));
    let selection = vec!["  \n ".to_string()];

    let content = select_content(&document, Some(&selection)).unwrap();
    assert_eq!(content.text, LONG_PARAGRAPH);
}

#[test]
fn first_qualifying_tier_wins_even_if_a_later_tier_is_larger() {
    init_logging();
    let viewer_text =
        "Viewer body text that is comfortably beyond the fifty character acceptance bar.";
    let article_text = LONG_PARAGRAPH.repeat(5);
    let document = ScraperDocument::parse(&format!(
        "<html><body>\
         <labs-tailwind-doc-viewer><p>{viewer_text}</p></labs-tailwind-doc-viewer>\
         <article><p>{article_text}</p></article>\
         </body></html>"
    ));

    let content = select_content(&document, None).unwrap();
    assert_eq!(content.text, viewer_text);
}

#[test]
fn tier_picks_the_match_with_the_most_rendered_text() {
    init_logging();
    let longer = LONG_PARAGRAPH.repeat(3);
    let document = ScraperDocument::parse(&format!(
        "<html><body>\
         <article><p>{LONG_PARAGRAPH}</p></article>\
         <article id='big'><p>{longer}</p></article>\
         </body></html>"
    ));

    let content = select_content(&document, None).unwrap();
    assert_eq!(content.text, longer);
}

#[test]
fn equal_length_matches_keep_document_order() {
    init_logging();
    let first = format!("AAAA {LONG_PARAGRAPH}");
    let second = format!("BBBB {LONG_PARAGRAPH}");
    let document = ScraperDocument::parse(&format!(
        "<html><body>\
         <article><p>{first}</p></article>\
         <article><p>{second}</p></article>\
         </body></html>"
    ));

    let content = select_content(&document, None).unwrap();
    assert_eq!(content.text, first);
}

#[test]
fn short_content_everywhere_is_content_not_found() {
    init_logging();
    let document = ScraperDocument::parse(
        "<html><body><main>short</main><div>also short</div></body></html>",
    );
    assert_eq!(
        select_content(&document, None),
        Err(SelectError::ContentNotFound)
    );
}

#[test]
fn fallback_scan_skips_elements_without_a_rendering_box() {
    init_logging();
    let hidden = LONG_PARAGRAPH.repeat(10);
    let document = ScraperDocument::parse(&format!(
        "<html><body>\
         <div style='display:none'><p>{hidden}</p></div>\
         <section><p>{LONG_PARAGRAPH}</p></section>\
         </body></html>"
    ));

    let content = select_content(&document, None).unwrap();
    assert_eq!(content.text, LONG_PARAGRAPH);
}

#[test]
fn numeric_buttons_are_removed_but_labeled_buttons_stay() {
    init_logging();
    let cleaned = clean_fragment(&format!(
        "<p>{LONG_PARAGRAPH}<button>12</button><button>Section 12</button></p>"
    ));
    assert!(!cleaned.markup.contains("<button>12</button>"));
    assert!(cleaned.markup.contains("Section 12"));
    assert!(cleaned.text.contains("Section 12"));
}

#[test]
fn citation_spans_need_citation_class_metadata() {
    init_logging();
    let cleaned = clean_fragment(
        "<p>Claim<span class=\"citation-link\">7</span> and figure <span>7</span></p>",
    );
    assert!(!cleaned.markup.contains("citation-link"));
    assert!(cleaned.markup.contains("<span>7</span>"));
}

#[test]
fn ellipsis_toggles_are_removed() {
    init_logging();
    let cleaned = clean_fragment(
        "<p>Keep waiting...<button>...</button><a>\u{2026}</a></p>",
    );
    assert!(!cleaned.markup.contains("<button>"));
    assert!(!cleaned.markup.contains("<a>"));
    assert!(cleaned.text.contains("Keep waiting..."));
}

#[test]
fn safety_net_removes_numeric_buttons_of_any_length() {
    init_logging();
    let cleaned = clean_fragment("<p>Data<button>1234</button> points</p>");
    assert!(!cleaned.markup.contains("1234"));
    assert!(cleaned.text.contains("Data"));
}

#[test]
fn cleaning_is_idempotent() {
    init_logging();
    let once = clean_fragment(&format!(
        "<p>{LONG_PARAGRAPH}<button>3</button><span class='source-chip'>12</span>\
         <button>...</button></p>"
    ));
    let twice = clean_fragment(&once.markup);
    assert_eq!(once.markup, twice.markup);
    assert_eq!(once.text, twice.text);
}

#[test]
fn the_live_document_is_never_mutated() {
    init_logging();
    let document = ScraperDocument::parse(&format!(
        "<html><body><main><p>{LONG_PARAGRAPH}<button>12</button></p></main></body></html>"
    ));
    let main = document.query("main")[0];
    let before = document.subtree_html(main);

    let content = select_content(&document, None).unwrap();
    assert!(!content.markup.contains("<button>12</button>"));

    // The selector worked on its own detached copy; the source still holds
    // the citation marker.
    assert_eq!(document.subtree_html(main), before);
    assert!(before.contains("<button>12</button>"));
}
