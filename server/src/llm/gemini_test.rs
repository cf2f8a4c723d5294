use super::*;

fn make_response(candidates: serde_json::Value) -> String {
    serde_json::json!({
        "candidates": candidates,
        "modelVersion": "gemini-2.0-flash"
    })
    .to_string()
}

#[test]
fn parse_text_response() {
    let json = make_response(serde_json::json!([
        { "content": { "parts": [{ "text": "Python and JavaScript." }], "role": "model" } }
    ]));
    let reply = parse_response(&json).unwrap();
    assert_eq!(reply.text, "Python and JavaScript.");
}

#[test]
fn parse_joins_multiple_parts_in_order() {
    let json = make_response(serde_json::json!([
        { "content": { "parts": [{ "text": "Hello " }, { "text": "world" }] } }
    ]));
    let reply = parse_response(&json).unwrap();
    assert_eq!(reply.text, "Hello world");
}

#[test]
fn parse_no_candidates_is_an_error() {
    let err = parse_response(&make_response(serde_json::json!([]))).unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn parse_candidate_without_content_is_an_error() {
    let json = make_response(serde_json::json!([{ "finishReason": "SAFETY" }]));
    let err = parse_response(&json).unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn parse_empty_text_is_an_error() {
    let json = make_response(serde_json::json!([{ "content": { "parts": [] } }]));
    let err = parse_response(&json).unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn parse_unexpected_reply_role_is_an_error() {
    let json = make_response(serde_json::json!([
        { "content": { "parts": [{ "text": "hi" }], "role": "user" } }
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
fn conversational_roles_round_trip() {
    for role in [Role::User, Role::Assistant] {
        assert_eq!(role_from_wire(role_to_wire(role)), Some(role));
    }
}

#[test]
fn role_mapping_is_total() {
    // System has no contents role on this provider; it still maps somewhere
    // rather than panicking, and build_request folds it away first.
    assert_eq!(role_to_wire(Role::System), "user");
    assert!(role_from_wire("tool").is_none());
}

#[test]
fn build_request_maps_roles_and_preserves_order() {
    let turns = [
        Turn::user("What are Hamza's skills?"),
        Turn::assistant("Python and JavaScript."),
        Turn::user("Anything else?"),
    ];
    let request = build_request("Be brief.", &turns, GenerationParams::default());

    assert_eq!(request.contents.len(), 3);
    assert_eq!(request.contents[0].role, "user");
    assert_eq!(request.contents[1].role, "model");
    assert_eq!(request.contents[2].role, "user");
    assert_eq!(request.contents[0].parts[0].text, "What are Hamza's skills?");
    assert_eq!(request.contents[2].parts[0].text, "Anything else?");
}

#[test]
fn build_request_folds_system_turns_into_instruction() {
    let turns = [
        Turn::system("Stay in character."),
        Turn::user("hi"),
    ];
    let request = build_request("Be brief.", &turns, GenerationParams::default());

    let instruction = request.system_instruction.expect("instruction");
    assert_eq!(instruction.parts[0].text, "Be brief.\nStay in character.");
    assert_eq!(request.contents.len(), 1);
    assert_eq!(request.contents[0].role, "user");
}

#[test]
fn build_request_omits_empty_instruction() {
    let turns = [Turn::user("hi")];
    let request = build_request("", &turns, GenerationParams::default());
    assert!(request.system_instruction.is_none());
}

#[test]
fn build_request_serializes_wire_field_names() {
    let turns = [Turn::user("hi")];
    let params = GenerationParams { temperature: 0.9, top_k: 40, top_p: 0.95, max_output_tokens: 300 };
    let json = serde_json::to_value(build_request("sys", &turns, params)).expect("serialize");

    let config = json.get("generationConfig").expect("generationConfig");
    assert_eq!(config.get("temperature"), Some(&serde_json::json!(0.9)));
    assert_eq!(config.get("topK"), Some(&serde_json::json!(40)));
    assert_eq!(config.get("topP"), Some(&serde_json::json!(0.95)));
    assert_eq!(config.get("maxOutputTokens"), Some(&serde_json::json!(300)));
    assert!(json.get("system_instruction").is_some());
}

#[test]
fn build_request_pins_all_safety_categories_to_block_none() {
    let turns = [Turn::user("hi")];
    let json = serde_json::to_value(build_request("", &turns, GenerationParams::default()))
        .expect("serialize");

    let settings = json
        .get("safetySettings")
        .and_then(serde_json::Value::as_array)
        .expect("safetySettings");
    assert_eq!(settings.len(), 4);
    for setting in settings {
        assert_eq!(setting.get("threshold"), Some(&serde_json::json!("BLOCK_NONE")));
    }
}
