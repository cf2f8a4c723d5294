use super::*;

fn make_response(choices: serde_json::Value) -> String {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": choices,
        "usage": { "prompt_tokens": 100, "completion_tokens": 50 }
    })
    .to_string()
}

#[test]
fn parse_text_response() {
    let json = make_response(serde_json::json!([
        { "index": 0, "message": { "role": "assistant", "content": "Python and JavaScript." }, "finish_reason": "stop" }
    ]));
    let reply = parse_response(&json).unwrap();
    assert_eq!(reply.text, "Python and JavaScript.");
}

#[test]
fn parse_no_choices_is_an_error() {
    let err = parse_response(&make_response(serde_json::json!([]))).unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn parse_null_content_is_an_error() {
    let json = make_response(serde_json::json!([
        { "index": 0, "message": { "role": "assistant", "content": null } }
    ]));
    let err = parse_response(&json).unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn parse_empty_content_is_an_error() {
    let json = make_response(serde_json::json!([
        { "index": 0, "message": { "role": "assistant", "content": "" } }
    ]));
    let err = parse_response(&json).unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn parse_unexpected_reply_role_is_an_error() {
    let json = make_response(serde_json::json!([
        { "index": 0, "message": { "role": "user", "content": "hi" } }
    ]));
    let err = parse_response(&json).unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn parse_invalid_json_is_an_error() {
    let err = parse_response("not json").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn every_role_round_trips() {
    for role in [Role::User, Role::Assistant, Role::System] {
        assert_eq!(role_from_wire(role_to_wire(role)), Some(role));
    }
    assert!(role_from_wire("tool").is_none());
}

#[test]
fn build_request_prepends_system_message() {
    let turns = [Turn::user("What are Hamza's skills?")];
    let request = build_request("gpt-4o-mini", "Be brief.", &turns, GenerationParams::default());

    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, "system");
    assert_eq!(request.messages[0].content, "Be brief.");
    assert_eq!(request.messages[1].role, "user");
    assert_eq!(request.messages[1].content, "What are Hamza's skills?");
}

#[test]
fn build_request_skips_blank_system() {
    let turns = [Turn::user("hi")];
    let request = build_request("gpt-4o-mini", "  ", &turns, GenerationParams::default());
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.messages[0].role, "user");
}

#[test]
fn build_request_preserves_turn_order() {
    let turns = [
        Turn::user("one"),
        Turn::assistant("two"),
        Turn::user("three"),
    ];
    let request = build_request("gpt-4o-mini", "", &turns, GenerationParams::default());
    let roles: Vec<&str> = request.messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, ["user", "assistant", "user"]);
}

#[test]
fn build_request_serializes_wire_field_names() {
    let turns = [Turn::user("hi")];
    let params = GenerationParams { temperature: 0.7, top_k: 40, top_p: 0.95, max_output_tokens: 500 };
    let json = serde_json::to_value(build_request("gpt-4o-mini", "", &turns, params))
        .expect("serialize");

    assert_eq!(json.get("model"), Some(&serde_json::json!("gpt-4o-mini")));
    assert_eq!(json.get("temperature"), Some(&serde_json::json!(0.7)));
    assert_eq!(json.get("top_p"), Some(&serde_json::json!(0.95)));
    assert_eq!(json.get("max_tokens"), Some(&serde_json::json!(500)));
    // topK has no chat/completions equivalent.
    assert!(json.get("top_k").is_none());
}
