use kochi::api::parsing::{
    decode_url_component, get_header_value, is_valid_phone, parse_form_params,
    parse_generate_request, parse_webhook_event,
};
use serde_json::json;

#[test]
fn test_decode_url_component() {
    assert_eq!(decode_url_component("hello%20world").unwrap(), "hello world");
    assert_eq!(decode_url_component("hello+world").unwrap(), "hello world");
    assert_eq!(decode_url_component("%2B14155551234").unwrap(), "+14155551234");
    assert_eq!(decode_url_component("plain").unwrap(), "plain");
}

#[test]
fn test_parse_form_params_sorted() {
    let params = parse_form_params("B=two&A=one&C=three").unwrap();
    let keys: Vec<&str> = params.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["A", "B", "C"]);
    assert_eq!(params["A"], "one");
}

#[test]
fn test_parse_form_params_skips_pairs_without_equals() {
    let params = parse_form_params("A=1&garbage&B=2").unwrap();
    assert_eq!(params.len(), 2);
    assert!(params.contains_key("A"));
    assert!(params.contains_key("B"));
}

#[test]
fn test_parse_webhook_form_body() {
    let body = "MessageSid=SM123&AccountSid=AC456&From=%2B14155551234&To=%2B15555550100&Body=newsletter%3A+crypto";
    let params = parse_form_params(body).unwrap();
    let event = parse_webhook_event(&params);
    assert_eq!(event.message_sid, "SM123");
    assert_eq!(event.account_sid, "AC456");
    assert_eq!(event.from, "+14155551234");
    assert_eq!(event.to, "+15555550100");
    assert_eq!(event.body, "newsletter: crypto");
}

#[test]
fn test_missing_webhook_fields_default_empty() {
    let params = parse_form_params("MessageSid=SM123").unwrap();
    let event = parse_webhook_event(&params);
    assert_eq!(event.message_sid, "SM123");
    assert_eq!(event.from, "");
    assert_eq!(event.body, "");
}

#[test]
fn test_is_valid_phone() {
    assert!(is_valid_phone("+14155551234"));
    assert!(is_valid_phone("+447911123456"));
    assert!(!is_valid_phone("14155551234"));
    assert!(!is_valid_phone("+04155551234"));
    assert!(!is_valid_phone("+1"));
    assert!(!is_valid_phone("+1415555123456789"));
    assert!(!is_valid_phone("+1415abc1234"));
    assert!(!is_valid_phone(""));
}

#[test]
fn test_generate_request_full_body() {
    let body = r#"{"topic": "rust async", "tone": "Playful", "phone": "+14155551234"}"#;
    let request = parse_generate_request(body).unwrap();
    assert_eq!(request.topic, "rust async");
    assert_eq!(request.tone, "playful");
    assert_eq!(request.phone.as_deref(), Some("+14155551234"));
}

#[test]
fn test_generate_request_defaults_tone_and_phone() {
    let request = parse_generate_request(r#"{"topic": "crypto"}"#).unwrap();
    assert_eq!(request.topic, "crypto");
    assert_eq!(request.tone, "neutral");
    assert_eq!(request.phone, None);
}

#[test]
fn test_generate_request_requires_topic() {
    assert_eq!(
        parse_generate_request(r#"{"tone": "casual"}"#).unwrap_err(),
        "Topic is required"
    );
    assert_eq!(
        parse_generate_request(r#"{"topic": "   "}"#).unwrap_err(),
        "Topic is required"
    );
}

#[test]
fn test_generate_request_rejects_unknown_tone() {
    let err = parse_generate_request(r#"{"topic": "x", "tone": "sarcastic"}"#).unwrap_err();
    assert!(err.starts_with("Unknown tone \"sarcastic\""));
    assert!(err.contains("casual"));
}

#[test]
fn test_generate_request_rejects_bad_phone() {
    let err = parse_generate_request(r#"{"topic": "x", "phone": "5551234"}"#).unwrap_err();
    assert!(err.starts_with("Invalid phone number format"));
}

#[test]
fn test_generate_request_rejects_non_json() {
    assert_eq!(
        parse_generate_request("topic=crypto").unwrap_err(),
        "Invalid JSON body"
    );
}

#[test]
fn test_get_header_value_is_case_insensitive() {
    let headers = json!({
        "x-twilio-signature": "abc123",
        "Content-Type": "application/x-www-form-urlencoded"
    });
    assert_eq!(
        get_header_value(&headers, "X-Twilio-Signature"),
        Some("abc123")
    );
    assert_eq!(
        get_header_value(&headers, "content-type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(get_header_value(&headers, "Authorization"), None);
}
