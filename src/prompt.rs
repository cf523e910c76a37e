//! Prompt construction for the newsletter generator.
//!
//! The prompt pins the generator to a fixed `TITLE / INTRO / SECTION n /
//! CLOSING` output template. Compliance is not guaranteed; the extractor is
//! responsible for recovering structure when the generator drifts.

/// System prompt sent with every generation request.
pub const SYSTEM_PROMPT: &str = "You are a newsletter writer who creates concise, \
    engaging mini-newsletters. Always follow the exact format requested.";

/// Tones with dedicated phrasing in the generation prompt.
pub const KNOWN_TONES: [&str; 6] = [
    "casual",
    "playful",
    "formal",
    "neutral",
    "informal",
    "professional",
];

/// Map a requested tone to the phrase used in the generation prompt.
/// Unknown tones fall back to the neutral description.
pub fn tone_description(tone: &str) -> &'static str {
    match tone.to_lowercase().as_str() {
        "casual" => "casual and conversational",
        "playful" => "playful and lighthearted",
        "formal" => "formal and professional",
        "informal" => "informal and friendly",
        "professional" => "professional and authoritative",
        _ => "neutral and balanced",
    }
}

/// Build the user prompt requesting a mini-newsletter on `topic`.
pub fn build_newsletter_prompt(topic: &str, tone: &str) -> String {
    format!(
        r#"Write a short mini-newsletter on the topic "{topic}" in a {tone} tone.

Requirements:
- Title: One engaging line
- Introduction: 1-2 sentences setting the context
- Body: 2-3 bullet points or mini-sections with brief headings
- Optional closing: A brief call-to-action or sign-off

Total length: 250-400 words. Keep it concise, informative, and engaging.

Format the response as:
TITLE: [title here]

INTRO: [introduction here]

SECTION 1: [heading]
[content]

SECTION 2: [heading]
[content]

SECTION 3: [heading] (optional)
[content]

CLOSING: [closing line]"#,
        topic = topic,
        tone = tone_description(tone),
    )
}
