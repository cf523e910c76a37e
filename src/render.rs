//! Renders a [`NewsletterDocument`] into a standalone, mobile-friendly HTML
//! page.

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::extractor::NewsletterDocument;

static PARAGRAPH_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("static regex compile"));

/// Escape the characters HTML cares about in text content and attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Split body text on blank lines into `<p>` paragraphs, collapsing single
/// newlines into spaces.
fn format_paragraphs(text: &str) -> String {
    let paragraphs: Vec<String> = PARAGRAPH_SPLIT_RE
        .split(text)
        .map(|para| para.trim().replace('\n', " "))
        .filter(|para| !para.is_empty())
        .map(|para| format!("<p>{}</p>", escape_html(&para)))
        .collect();

    if paragraphs.is_empty() {
        "<p></p>".to_string()
    } else {
        paragraphs.join("")
    }
}

const PAGE_CSS: &str = r#"    * {
      margin: 0;
      padding: 0;
      box-sizing: border-box;
    }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
      line-height: 1.6;
      color: #333;
      background-color: #f5f5f5;
      padding: 20px;
    }
    .container {
      max-width: 600px;
      margin: 0 auto;
      background-color: #ffffff;
      padding: 30px;
      border-radius: 8px;
      box-shadow: 0 2px 4px rgba(0,0,0,0.1);
    }
    h1 {
      font-size: 28px;
      margin-bottom: 10px;
      color: #222;
      line-height: 1.3;
    }
    .meta {
      font-size: 14px;
      color: #666;
      margin-bottom: 25px;
      padding-bottom: 15px;
      border-bottom: 1px solid #eee;
    }
    .intro {
      font-size: 16px;
      margin-bottom: 25px;
      color: #444;
    }
    .section {
      margin-bottom: 25px;
    }
    .section h2 {
      font-size: 20px;
      margin-bottom: 10px;
      color: #333;
    }
    .section p {
      font-size: 16px;
      color: #555;
      margin-bottom: 10px;
    }
    .closing {
      margin-top: 30px;
      padding-top: 20px;
      border-top: 1px solid #eee;
      font-size: 16px;
      color: #666;
      font-style: italic;
    }
    @media (max-width: 600px) {
      body {
        padding: 10px;
      }
      .container {
        padding: 20px;
      }
      h1 {
        font-size: 24px;
      }
      .section h2 {
        font-size: 18px;
      }
    }"#;

/// Render the full newsletter page.
///
/// An empty `closing` means the closing block is omitted entirely, not
/// rendered empty.
pub fn render_newsletter(newsletter: &NewsletterDocument) -> String {
    let date_line = Utc::now().format("%B %-d, %Y at %H:%M UTC").to_string();

    let sections_html: String = newsletter
        .sections
        .iter()
        .map(|section| {
            format!(
                "\n    <div class=\"section\">\n      <h2>{}</h2>\n      {}\n    </div>\n",
                escape_html(&section.heading),
                format_paragraphs(&section.body),
            )
        })
        .collect();

    let closing_html = if newsletter.closing.is_empty() {
        String::new()
    } else {
        format!(
            "<div class=\"closing\"><p>{}</p></div>",
            escape_html(&newsletter.closing)
        )
    };

    let title = escape_html(&newsletter.title);
    let intro = escape_html(&newsletter.intro);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>
{css}
  </style>
</head>
<body>
  <div class="container">
    <h1>{title}</h1>
    <div class="meta">
      {date_line}
    </div>
    <div class="intro">
      <p>{intro}</p>
    </div>
    {sections_html}
    {closing_html}
  </div>
</body>
</html>"#,
        title = title,
        css = PAGE_CSS,
        date_line = date_line,
        intro = intro,
        sections_html = sections_html,
        closing_html = closing_html,
    )
}
