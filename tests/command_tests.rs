use kochi::command::{DEFAULT_TONE, parse_command};

#[test]
fn test_parse_full_command() {
    let cmd = parse_command("newsletter: topic = crypto, tone = casual").unwrap();
    assert_eq!(cmd.topic.as_deref(), Some("crypto"));
    assert_eq!(cmd.tone, "casual");
}

#[test]
fn test_parse_topic_only_defaults_tone() {
    let cmd = parse_command("newsletter: topic = AI safety").unwrap();
    assert_eq!(cmd.topic.as_deref(), Some("AI safety"));
    assert_eq!(cmd.tone, DEFAULT_TONE);
}

#[test]
fn test_parse_bare_topic() {
    let cmd = parse_command("newsletter: crypto").unwrap();
    assert_eq!(cmd.topic.as_deref(), Some("crypto"));
    assert_eq!(cmd.tone, DEFAULT_TONE);
}

#[test]
fn test_parse_bare_topic_with_tone() {
    let cmd = parse_command("newsletter: rust news, tone = playful").unwrap();
    assert_eq!(cmd.topic.as_deref(), Some("rust news,"));
    assert_eq!(cmd.tone, "playful");
}

#[test]
fn test_keyword_is_case_insensitive() {
    let cmd = parse_command("NEWSLETTER: topic = space").unwrap();
    assert_eq!(cmd.topic.as_deref(), Some("space"));
}

#[test]
fn test_leading_whitespace_is_ignored() {
    let cmd = parse_command("   newsletter: topic = gardening").unwrap();
    assert_eq!(cmd.topic.as_deref(), Some("gardening"));
}

#[test]
fn test_non_command_messages_are_rejected() {
    assert!(parse_command("hello there").is_none());
    assert!(parse_command("").is_none());
    assert!(parse_command("newsletters: topic = x").is_none());
    assert!(parse_command("send me a newsletter: crypto").is_none());
}

#[test]
fn test_keyword_without_topic() {
    let cmd = parse_command("newsletter:").unwrap();
    assert_eq!(cmd.topic, None);
    assert_eq!(cmd.tone, DEFAULT_TONE);
}

#[test]
fn test_tone_without_topic() {
    let cmd = parse_command("newsletter: tone = formal").unwrap();
    assert_eq!(cmd.topic, None);
    assert_eq!(cmd.tone, "formal");
}

#[test]
fn test_empty_topic_value_is_dropped() {
    let cmd = parse_command("newsletter: topic = , tone = casual").unwrap();
    assert_eq!(cmd.topic, None);
    assert_eq!(cmd.tone, "casual");
}

#[test]
fn test_tone_is_lowercased() {
    let cmd = parse_command("newsletter: topic = finance, tone = FORMAL").unwrap();
    assert_eq!(cmd.tone, "formal");
}

#[test]
fn test_marker_spacing_is_flexible() {
    let cmd = parse_command("newsletter: topic=ml,tone=professional").unwrap();
    assert_eq!(cmd.topic.as_deref(), Some("ml"));
    assert_eq!(cmd.tone, "professional");
}
