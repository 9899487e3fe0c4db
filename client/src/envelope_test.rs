use super::*;

use serde_json::json;

// =============================================================================
// Envelope deserialization
// =============================================================================

#[test]
fn envelope_with_data_parses() {
    let envelope: Envelope<i64> =
        serde_json::from_value(json!({ "success": true, "message": "ok", "data": 7 })).unwrap();
    assert!(envelope.success);
    assert_eq!(envelope.data, Some(7));
    assert!(envelope.errors.is_none());
}

#[test]
fn envelope_missing_optional_fields_defaults() {
    let envelope: Envelope<i64> = serde_json::from_value(json!({ "success": false })).unwrap();
    assert_eq!(envelope.message, "");
    assert!(envelope.data.is_none());
}

// =============================================================================
// ErrorBody::from_parsed
// =============================================================================

#[test]
fn error_body_from_envelope_json() {
    let value = json!({ "success": false, "message": "nope", "errors": { "name": "too long" } });
    let body = ErrorBody::from_parsed(Some(&value));
    assert_eq!(body.message, "nope");
    assert_eq!(body.first_field_error(), Some("too long"));
}

#[test]
fn error_body_from_empty_is_synthetic() {
    let body = ErrorBody::from_parsed(None);
    assert_eq!(body, ErrorBody::request_failed());
    assert_eq!(body.message, GENERIC_FAILURE_MESSAGE);
}

#[test]
fn error_body_from_non_envelope_json_is_synthetic() {
    let value = json!(["not", "an", "envelope"]);
    let body = ErrorBody::from_parsed(Some(&value));
    assert_eq!(body, ErrorBody::request_failed());
}

// =============================================================================
// unwrap_data
// =============================================================================

#[test]
fn unwrap_data_returns_payload() {
    let body = Some(json!({ "success": true, "message": "ok", "data": { "x": 1 } }));
    let value: serde_json::Value = unwrap_data(body, "thing").unwrap();
    assert_eq!(value, json!({ "x": 1 }));
}

#[test]
fn unwrap_data_missing_body_errors() {
    let result: Result<serde_json::Value, _> = unwrap_data(None, "thing");
    assert!(matches!(result, Err(ApiError::MissingData("thing"))));
}

#[test]
fn unwrap_data_missing_data_field_errors() {
    let body = Some(json!({ "success": true, "message": "ok" }));
    let result: Result<serde_json::Value, _> = unwrap_data(body, "thing");
    assert!(matches!(result, Err(ApiError::MissingData("thing"))));
}
