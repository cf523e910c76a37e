//! Parses inbound SMS commands for newsletter generation.
//!
//! Supported formats:
//! - `newsletter: topic = crypto`
//! - `newsletter: topic = RL in games, tone = playful`
//! - `newsletter: crypto` (bare topic, defaults to a neutral tone)

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Keyword that marks a message as a newsletter command.
pub const COMMAND_KEYWORD: &str = "newsletter:";

/// Tone applied when the command does not specify one.
pub const DEFAULT_TONE: &str = "neutral";

static TOPIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)topic\s*=\s*([^,]+)").expect("static regex compile"));
static TONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)tone\s*=\s*([^,]+)").expect("static regex compile"));
static TONE_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)tone\s*=").expect("static regex compile"));

/// A parsed newsletter request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommand {
    /// Requested topic; `None` when no usable topic text followed the keyword.
    pub topic: Option<String>,
    /// Requested tone, always lower-case, never absent.
    pub tone: String,
}

/// Parse one inbound message into a [`ParsedCommand`].
///
/// Returns `None` when the trimmed message does not begin with the
/// `newsletter:` keyword (case-insensitive), i.e. the message is not
/// addressed to this system at all. A recognised command with no usable
/// topic comes back with `topic: None`; deciding whether that is an error
/// belongs to the caller.
///
/// # Examples
///
/// ```
/// use kochi::command::parse_command;
///
/// let cmd = parse_command("newsletter: topic = AI, tone = casual").unwrap();
/// assert_eq!(cmd.topic.as_deref(), Some("AI"));
/// assert_eq!(cmd.tone, "casual");
///
/// assert!(parse_command("hello there").is_none());
/// ```
pub fn parse_command(message: &str) -> Option<ParsedCommand> {
    let trimmed = message.trim();
    let head = trimmed.get(..COMMAND_KEYWORD.len())?;
    if !head.eq_ignore_ascii_case(COMMAND_KEYWORD) {
        return None;
    }
    let body = trimmed[COMMAND_KEYWORD.len()..].trim();

    let mut topic = TOPIC_RE
        .captures(body)
        .map(|caps| caps[1].trim().to_string())
        .filter(|t| !t.is_empty());

    let tone = TONE_RE
        .captures(body)
        .map(|caps| caps[1].trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TONE.to_string());

    // Bare-topic form: with no explicit `topic =`, everything before any
    // `tone =` occurrence is the topic.
    if topic.is_none() && !body.is_empty() {
        let before_tone = match TONE_MARKER_RE.find(body) {
            Some(m) => &body[..m.start()],
            None => body,
        };
        let before_tone = before_tone.trim();
        if !before_tone.is_empty() {
            topic = Some(before_tone.to_string());
        }
    }

    Some(ParsedCommand { topic, tone })
}
