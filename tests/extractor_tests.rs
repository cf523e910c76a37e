use kochi::extractor::{NewsletterDocument, extract_newsletter};

const WELL_FORMED: &str = "TITLE: Crypto Weekly\n\n\
INTRO: Markets had a busy week with big moves across the board.\n\n\
SECTION 1: Price Action\n\
Bitcoin climbed 5% while most altcoins lagged behind.\n\n\
SECTION 2: Regulation\n\
New guidance landed in the EU covering stablecoin issuers.\n\n\
CLOSING: See you next week!";

#[test]
fn test_extract_well_formed_template() {
    let doc = extract_newsletter(WELL_FORMED, "crypto");
    assert_eq!(doc.title, "Crypto Weekly");
    assert_eq!(
        doc.intro,
        "Markets had a busy week with big moves across the board."
    );
    assert_eq!(doc.sections.len(), 2);
    assert_eq!(doc.sections[0].heading, "Price Action");
    assert_eq!(
        doc.sections[0].body,
        "Bitcoin climbed 5% while most altcoins lagged behind."
    );
    assert_eq!(doc.sections[1].heading, "Regulation");
    assert_eq!(doc.closing, "See you next week!");
}

#[test]
fn test_markers_are_case_insensitive() {
    let raw = "title: Quiet Week\n\nintro: Not much happened.\n\n\
section 1: Recap\nA short recap of the week.\n\nclosing: Bye.";
    let doc = extract_newsletter(raw, "anything");
    assert_eq!(doc.title, "Quiet Week");
    assert_eq!(doc.intro, "Not much happened.");
    assert_eq!(doc.sections[0].heading, "Recap");
    assert_eq!(doc.closing, "Bye.");
}

#[test]
fn test_section_body_ends_at_next_marker_without_blank_line() {
    let raw = "SECTION 1: One\nFirst body.\nSECTION 2: Two\nSecond body.";
    let doc = extract_newsletter(raw, "t");
    assert_eq!(doc.sections.len(), 2);
    assert_eq!(doc.sections[0].body, "First body.");
    assert_eq!(doc.sections[1].body, "Second body.");
}

#[test]
fn test_marked_sections_win_over_markdown_headings() {
    let raw = "SECTION 1: Canonical\nBody recovered from the canonical marker.\n\n\
## Markdown Heading\nThis body must be ignored once markers matched.";
    let doc = extract_newsletter(raw, "t");
    assert_eq!(doc.sections.len(), 1);
    assert_eq!(doc.sections[0].heading, "Canonical");
}

#[test]
fn test_extraction_is_idempotent() {
    let first = extract_newsletter(WELL_FORMED, "crypto");
    let second = extract_newsletter(WELL_FORMED, "crypto");
    assert_eq!(first, second);
}

#[test]
fn test_markdown_heading_fallback() {
    let raw = "My Newsletter\n\n## First Topic\n\
Plenty of detail about the first topic here.\n\n## Second Topic\n\
And a solid paragraph about the second one too.";
    let doc = extract_newsletter(raw, "t");
    assert_eq!(doc.sections.len(), 2);
    assert_eq!(doc.sections[0].heading, "First Topic");
    assert_eq!(doc.sections[1].heading, "Second Topic");
}

#[test]
fn test_paragraph_overview_fallback() {
    let raw = "Some freeform text that has no headings whatsoever in it.\n\n\
A second paragraph that is also comfortably long enough to keep.\n\n\
short\n\n\
A third long paragraph rounding out the generated response text.\n\n\
A fourth paragraph that should be dropped by the overview limit.";
    let doc = extract_newsletter(raw, "t");
    assert_eq!(doc.sections.len(), 1);
    assert_eq!(doc.sections[0].heading, "Overview");
    let body = &doc.sections[0].body;
    assert!(body.contains("freeform"), "kept paragraphs: {body}");
    assert!(body.contains("third long paragraph"));
    assert!(!body.contains("short"));
    assert!(!body.contains("fourth"));
}

#[test]
fn test_title_falls_back_to_first_line() {
    let raw = "A Week In Rust\n\nSome content that follows the bare title line.";
    let doc = extract_newsletter(raw, "rust");
    assert_eq!(doc.title, "A Week In Rust");
}

#[test]
fn test_title_falls_back_to_topic_when_first_line_too_long() {
    let long_line = "x".repeat(120);
    let raw = format!("{long_line}\n\nBody text that is long enough to matter here.");
    let doc = extract_newsletter(&raw, "quantum computing");
    assert_eq!(doc.title, "Newsletter: quantum computing");
}

#[test]
fn test_title_without_colon_marker() {
    let raw = "TITLE  Deep Dive\n\nINTRO: Something happened.";
    let doc = extract_newsletter(raw, "t");
    assert_eq!(doc.title, "Deep Dive");
}

#[test]
fn test_intro_fallback_collects_lines_before_first_section() {
    let raw = "Headline\nFirst context line.\nSecond context line.\n\
SECTION 1: Stuff\nBody of the section.";
    let doc = extract_newsletter(raw, "t");
    assert_eq!(doc.intro, "First context line. Second context line.");
}

#[test]
fn test_missing_closing_is_empty() {
    let raw = "TITLE: T\n\nSECTION 1: S\nSection body text.";
    let doc = extract_newsletter(raw, "t");
    assert_eq!(doc.closing, "");
}

#[test]
fn test_whitespace_only_input_yields_default_document() {
    assert_eq!(extract_newsletter("", "t"), NewsletterDocument::default());
    assert_eq!(
        extract_newsletter("   \n\n  ", "t"),
        NewsletterDocument::default()
    );
}

#[test]
fn test_single_unstructured_line() {
    let raw = "Just one plain sentence that is reasonably long to read.";
    let doc = extract_newsletter(raw, "t");
    assert_eq!(
        doc.title,
        "Just one plain sentence that is reasonably long to read."
    );
    assert_eq!(doc.sections.len(), 1);
    assert_eq!(doc.sections[0].heading, "Overview");
}
