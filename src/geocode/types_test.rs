use super::*;
use crate::error::ErrorCode;

fn sample() -> ResolvedAddress {
    ResolvedAddress {
        normalized_address: "B-25, Lajpat Nagar II, New Delhi, Delhi 110024, India".into(),
        latitude: 28.5678,
        longitude: 77.2426,
        confidence_score: 0.98,
        parsing_explanation: "Identified major locality.".into(),
    }
}

// =============================================================================
// validate_query
// =============================================================================

#[test]
fn validate_query_rejects_empty_and_whitespace() {
    assert!(matches!(validate_query(""), Err(GeocodeError::EmptyQuery)));
    assert!(matches!(validate_query("   \t\n"), Err(GeocodeError::EmptyQuery)));
}

#[test]
fn validate_query_passes_text_through() {
    assert_eq!(validate_query(" near metro ").unwrap(), " near metro ");
}

// =============================================================================
// ResolvedAddress
// =============================================================================

#[test]
fn resolved_address_uses_camel_case_on_the_wire() {
    let json = serde_json::to_value(sample()).unwrap();
    assert!(json.get("normalizedAddress").is_some());
    assert!(json.get("confidenceScore").is_some());
    assert!(json.get("parsingExplanation").is_some());
    assert!(json.get("normalized_address").is_none());
}

#[test]
fn missing_confidence_fails_to_deserialize() {
    let raw = r#"{"normalizedAddress":"x","latitude":1.0,"longitude":2.0,"parsingExplanation":"y"}"#;
    let err = serde_json::from_str::<ResolvedAddress>(raw).unwrap_err();
    assert!(err.to_string().contains("confidenceScore"));
}

#[test]
fn validate_rejects_confidence_above_one() {
    let mut addr = sample();
    addr.confidence_score = 1.2;
    assert!(matches!(addr.validate(), Err(GeocodeError::ApiParse(_))));
}

#[test]
fn validate_rejects_nan_latitude() {
    let mut addr = sample();
    addr.latitude = f64::NAN;
    assert!(matches!(addr.validate(), Err(GeocodeError::ApiParse(_))));
}

#[test]
fn validate_rejects_blank_normalized_address() {
    let mut addr = sample();
    addr.normalized_address = "  ".into();
    assert!(addr.validate().is_err());
}

#[test]
fn validate_accepts_well_formed_address() {
    assert_eq!(sample().validate().unwrap(), sample());
}

#[test]
fn confidence_percent_rounds() {
    let mut addr = sample();
    addr.confidence_score = 0.876;
    assert_eq!(addr.confidence_percent(), 88);
}

// =============================================================================
// ConfidenceTier
// =============================================================================

#[test]
fn confidence_tier_boundaries() {
    assert_eq!(ConfidenceTier::from_score(0.99), ConfidenceTier::High);
    assert_eq!(ConfidenceTier::from_score(0.85), ConfidenceTier::Medium);
    assert_eq!(ConfidenceTier::from_score(0.61), ConfidenceTier::Medium);
    assert_eq!(ConfidenceTier::from_score(0.6), ConfidenceTier::Low);
    assert_eq!(ConfidenceTier::from_score(0.0), ConfidenceTier::Low);
}

// =============================================================================
// GeocodeError
// =============================================================================

#[test]
fn resolution_errors_share_the_user_message() {
    let errors = [
        GeocodeError::ApiRequest("connection reset".into()),
        GeocodeError::ApiResponse { status: 500, body: String::new() },
        GeocodeError::ApiParse("expected value".into()),
    ];
    for err in &errors {
        assert_eq!(err.user_message(), RESOLUTION_FAILED_MESSAGE);
        assert!(!err.is_validation());
    }
}

#[test]
fn empty_query_is_a_validation_error() {
    let err = GeocodeError::EmptyQuery;
    assert!(err.is_validation());
    assert_eq!(err.user_message(), EMPTY_ADDRESS_MESSAGE);
    assert_eq!(err.error_code(), "E_EMPTY_ADDRESS");
}

#[test]
fn retryable_statuses() {
    assert!(GeocodeError::ApiResponse { status: 429, body: String::new() }.retryable());
    assert!(GeocodeError::ApiResponse { status: 503, body: String::new() }.retryable());
    assert!(!GeocodeError::ApiResponse { status: 400, body: String::new() }.retryable());
    assert!(!GeocodeError::ApiParse(String::new()).retryable());
}
