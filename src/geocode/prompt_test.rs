use super::*;

#[test]
fn user_prompt_quotes_the_query() {
    let prompt = user_prompt("e-506 street 78 uttam vihar");
    assert!(prompt.starts_with("Parse and geocode"));
    assert!(prompt.ends_with("\"e-506 street 78 uttam vihar\""));
}

#[test]
fn system_instruction_mentions_indian_notation() {
    assert!(SYSTEM_INSTRUCTION.contains("India"));
    assert!(SYSTEM_INSTRUCTION.contains("gali no"));
    assert!(SYSTEM_INSTRUCTION.contains("opposite"));
}

#[test]
fn schema_requires_all_five_fields() {
    let schema = address_schema();
    assert_eq!(schema.get("type").and_then(|v| v.as_str()), Some("OBJECT"));
    let required: Vec<&str> = schema["required"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(required, ["normalizedAddress", "latitude", "longitude", "confidenceScore", "parsingExplanation"]);
    for field in required {
        assert!(schema["properties"].get(field).is_some(), "missing property {field}");
    }
}

#[test]
fn schema_field_names_match_resolved_address() {
    let addr = super::super::types::ResolvedAddress {
        normalized_address: "x".into(),
        latitude: 0.0,
        longitude: 0.0,
        confidence_score: 0.5,
        parsing_explanation: "y".into(),
    };
    let json = serde_json::to_value(addr).unwrap();
    let schema = address_schema();
    for key in json.as_object().unwrap().keys() {
        assert!(schema["properties"].get(key).is_some(), "schema lacks {key}");
    }
}
