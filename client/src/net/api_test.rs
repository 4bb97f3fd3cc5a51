use super::*;

#[test]
fn api_url_falls_back_to_default_without_override() {
    assert_eq!(api_url(), DEFAULT_API_URL);
}

#[test]
fn endpoint_joins_base_and_path() {
    assert_eq!(
        endpoint("http://localhost:3001", "/memories/tags"),
        "http://localhost:3001/memories/tags"
    );
}

#[test]
fn api_error_message_formats_status() {
    assert_eq!(api_error_message(500), "API error: 500");
}

#[test]
fn bearer_value_prefixes_token() {
    assert_eq!(bearer_value("tok_abc"), "Bearer tok_abc");
}

#[test]
fn memory_path_formats_expected_path() {
    assert_eq!(memory_path("m1"), "/memories/m1");
}

#[test]
fn memory_patch_serializes_only_present_fields() {
    let patch = MemoryPatch {
        title: Some("Groceries".to_owned()),
        is_pinned: Some(true),
        ..Default::default()
    };
    let value = serde_json::to_value(&patch).unwrap();
    assert_eq!(value, serde_json::json!({ "title": "Groceries", "is_pinned": true }));
}

#[test]
fn empty_memory_patch_serializes_to_empty_object() {
    let value = serde_json::to_value(MemoryPatch::default()).unwrap();
    assert_eq!(value, serde_json::json!({}));
}

#[test]
fn archive_toggle_patch_carries_only_the_flag() {
    let patch = MemoryPatch {
        is_archived: Some(true),
        ..Default::default()
    };
    let value = serde_json::to_value(&patch).unwrap();
    assert_eq!(value, serde_json::json!({ "is_archived": true }));
}

#[test]
fn openrouter_key_body_uses_the_api_key_field() {
    assert_eq!(
        openrouter_key_body("sk-or-v1-abc"),
        serde_json::json!({ "api_key": "sk-or-v1-abc" })
    );
}

#[test]
fn settings_patch_serializes_enum_fields_lowercase() {
    let patch = SettingsPatch {
        theme: Some(ThemePref::Dark),
        llm_preference: Some(LlmPreference::Byokey),
    };
    let value = serde_json::to_value(&patch).unwrap();
    assert_eq!(value, serde_json::json!({ "theme": "dark", "llm_preference": "byokey" }));
}
