//! Best-effort extraction of newsletter structure from generated text.
//!
//! The generator is prompted to use a fixed `TITLE / INTRO / SECTION n /
//! CLOSING` template but does not reliably comply. Rather than validating a
//! schema and rejecting drift, extraction runs independent passes over the
//! same raw text and recovers the best structure it can: sections come from
//! a descending cascade of strategies, and the remaining fields degrade to
//! empty strings. Extraction never fails.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One titled block of newsletter body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub body: String,
}

/// Structured newsletter recovered from raw generated text.
///
/// `title`, `intro` and `closing` default to the empty string when the
/// corresponding marker is absent; an empty `closing` means no closing
/// block is rendered downstream. Section order is extraction order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterDocument {
    pub title: String,
    pub intro: String,
    pub sections: Vec<Section>,
    pub closing: String,
}

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)TITLE:\s*").expect("static regex compile"));
static TITLE_NO_COLON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^TITLE[ \t]+").expect("static regex compile"));
static BLANK_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t]*\n").expect("static regex compile"));
static INTRO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)INTRO(?:DUCTION)?:\s*").expect("static regex compile"));
static INTRO_END_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\n[ \t]*\n(?:SECTION|CLOSING:)").expect("static regex compile"));
static INTRO_BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:INTRO|INTRODUCTION|SECTION)").expect("static regex compile"));
static SECTION_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)SECTION\s+\d+:\s*").expect("static regex compile"));
static CLOSING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)CLOSING:\s*").expect("static regex compile"));
static MD_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)(?:^|\n)(?:##\s+|#\s+|\*\*\s*)(.+?)(?:\*\*|$)").expect("static regex compile")
});
static PARAGRAPH_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("static regex compile"));

/// How many surviving paragraphs the final fallback folds into its single
/// "Overview" section.
const OVERVIEW_PARAGRAPH_LIMIT: usize = 3;

/// Paragraphs at or below this trimmed length are noise to the fallback.
const MIN_PARAGRAPH_LEN: usize = 20;

/// Markdown-style heading/body pairs are kept only when the trimmed body is
/// longer than this.
const MIN_MARKDOWN_BODY_LEN: usize = 10;

/// Titles recovered from the first line must be shorter than this.
const MAX_FALLBACK_TITLE_LEN: usize = 100;

/// Extract the best recoverable [`NewsletterDocument`] from raw generated
/// text.
///
/// Never fails: where the expected markers are missing, section recovery
/// degrades from the canonical `SECTION n:` markers to markdown-style
/// headings and finally to a single "Overview" section built from the
/// longest paragraphs; the first strategy yielding at least one section
/// wins. `fallback_topic` is only used to synthesize a title when nothing
/// usable is found in the text.
///
/// Whitespace-only input yields the default document with zero sections;
/// callers decide whether that constitutes a user-facing failure.
///
/// # Examples
///
/// ```
/// use kochi::extractor::extract_newsletter;
///
/// let raw = "TITLE: Crypto Weekly\n\nINTRO: Markets moved.\n\n\
///            SECTION 1: Prices\nBitcoin rose 5%.\n\nCLOSING: Stay tuned.";
/// let doc = extract_newsletter(raw, "crypto");
/// assert_eq!(doc.title, "Crypto Weekly");
/// assert_eq!(doc.sections[0].heading, "Prices");
/// assert_eq!(doc.closing, "Stay tuned.");
/// ```
pub fn extract_newsletter(raw_text: &str, fallback_topic: &str) -> NewsletterDocument {
    if raw_text.trim().is_empty() {
        return NewsletterDocument::default();
    }

    // Ordered cascade: strategies are mutually exclusive and later ones are
    // not consulted once one produces sections.
    const SECTION_STRATEGIES: [fn(&str) -> Vec<Section>; 3] = [
        extract_marked_sections,
        extract_markdown_sections,
        extract_paragraph_overview,
    ];

    let mut sections = Vec::new();
    for strategy in SECTION_STRATEGIES {
        sections = strategy(raw_text);
        if !sections.is_empty() {
            break;
        }
    }

    NewsletterDocument {
        title: extract_title(raw_text, fallback_topic),
        intro: extract_intro(raw_text),
        sections,
        closing: extract_closing(raw_text),
    }
}

fn extract_title(text: &str, fallback_topic: &str) -> String {
    let marked = TITLE_RE
        .find(text)
        .or_else(|| TITLE_NO_COLON_RE.find(text))
        .map(|m| {
            let rest = &text[m.end()..];
            let mut end = rest.len();
            if let Some(blank) = BLANK_LINE_RE.find(rest) {
                end = end.min(blank.start());
            }
            if let Some(intro) = INTRO_RE.find(rest) {
                end = end.min(intro.start());
            }
            rest[..end].trim().to_string()
        })
        .filter(|title| !title.is_empty());

    if let Some(title) = marked {
        return title;
    }

    let first_line = text.lines().next().unwrap_or("").trim();
    if !first_line.is_empty() && first_line.len() < MAX_FALLBACK_TITLE_LEN {
        first_line.to_string()
    } else {
        format!("Newsletter: {fallback_topic}")
    }
}

fn extract_intro(text: &str) -> String {
    if let Some(m) = INTRO_RE.find(text) {
        let rest = &text[m.end()..];
        let end = INTRO_END_RE.find(rest).map_or(rest.len(), |b| b.start());
        return rest[..end].trim().to_string();
    }

    // No marker. Section detection happens in a separate later pass, so at
    // this point in the scan zero sections exist and the fallback always
    // applies: take the lines strictly between the first line and the first
    // INTRO/SECTION-like line as the intro.
    let lines: Vec<&str> = text.split('\n').collect();
    match lines.iter().position(|line| INTRO_BOUNDARY_RE.is_match(line)) {
        Some(boundary) if boundary > 0 => lines[1..boundary].join(" ").trim().to_string(),
        _ => String::new(),
    }
}

fn extract_closing(text: &str) -> String {
    CLOSING_RE
        .find(text)
        .map(|m| text[m.end()..].trim().to_string())
        .unwrap_or_default()
}

/// Strategy A: canonical `SECTION <n>:` markers. Each body runs to the next
/// marker, a `CLOSING:` marker, or end of text.
fn extract_marked_sections(text: &str) -> Vec<Section> {
    let markers: Vec<(usize, usize)> = SECTION_MARKER_RE
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    let mut sections = Vec::new();
    for (i, &(_, content_start)) in markers.iter().enumerate() {
        let mut content_end = match markers.get(i + 1) {
            Some(&(next_start, _)) => next_start,
            None => text.len(),
        };
        if let Some(closing) = CLOSING_RE.find(&text[content_start..content_end]) {
            content_end = content_start + closing.start();
        }
        if let Some(section) = section_from_block(text[content_start..content_end].trim()) {
            sections.push(section);
        }
    }
    sections
}

/// The first non-empty line is the heading; remaining non-empty lines are
/// the body. A lone line serves as both.
fn section_from_block(block: &str) -> Option<Section> {
    let lines: Vec<&str> = block.lines().filter(|l| !l.trim().is_empty()).collect();
    let (first, rest) = lines.split_first()?;
    let heading = first.trim().to_string();
    let body = rest.join("\n").trim().to_string();
    if body.is_empty() {
        Some(Section {
            body: heading.clone(),
            heading,
        })
    } else {
        Some(Section { heading, body })
    }
}

/// Strategy B: markdown-style headings (`##`, `#`, or `**bold**`). A
/// heading's body runs from the end of its marker to the next heading or end
/// of text, and the pair is dropped when the body is too short to be real
/// content.
fn extract_markdown_sections(text: &str) -> Vec<Section> {
    struct Heading {
        start: usize,
        end: usize,
        text: String,
    }

    let headings: Vec<Heading> = MD_HEADING_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let heading = caps.get(1)?.as_str().trim().to_string();
            Some(Heading {
                start: whole.start(),
                end: whole.end(),
                text: heading,
            })
        })
        .collect();

    let mut sections = Vec::new();
    for (i, heading) in headings.iter().enumerate() {
        let body_end = headings.get(i + 1).map_or(text.len(), |next| next.start);
        let body = text[heading.end..body_end].trim();
        if !heading.text.is_empty() && body.len() > MIN_MARKDOWN_BODY_LEN {
            sections.push(Section {
                heading: heading.text.clone(),
                body: body.to_string(),
            });
        }
    }
    sections
}

/// Strategy C: no recognizable headings at all. Fold the longest paragraphs
/// into a single "Overview" section so downstream rendering still has
/// something to show.
fn extract_paragraph_overview(text: &str) -> Vec<Section> {
    let paragraphs: Vec<&str> = PARAGRAPH_SPLIT_RE
        .split(text)
        .filter(|p| p.trim().len() > MIN_PARAGRAPH_LEN)
        .collect();

    if paragraphs.is_empty() {
        return Vec::new();
    }

    vec![Section {
        heading: "Overview".to_string(),
        body: paragraphs
            .iter()
            .take(OVERVIEW_PARAGRAPH_LIMIT)
            .copied()
            .collect::<Vec<_>>()
            .join("\n\n"),
    }]
}
