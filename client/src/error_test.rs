use super::*;

use std::collections::BTreeMap;

fn http_error(status: u16, message: &str, errors: Option<BTreeMap<String, String>>) -> ApiError {
    ApiError::Http {
        status,
        body: ErrorBody {
            success: false,
            message: message.to_owned(),
            errors,
        },
    }
}

// =============================================================================
// friendly_message — extraction precedence
// =============================================================================

#[test]
fn field_error_beats_top_level_message() {
    let mut errors = BTreeMap::new();
    errors.insert("field".to_owned(), "y".to_owned());
    let error = http_error(400, "x", Some(errors));
    assert_eq!(friendly_message(&error), "y");
}

#[test]
fn top_level_message_used_without_field_errors() {
    let error = http_error(400, "x", None);
    assert_eq!(friendly_message(&error), "x");
}

#[test]
fn bare_404_maps_to_not_found_generic() {
    let error = ApiError::Http {
        status: 404,
        body: ErrorBody::request_failed(),
    };
    assert_eq!(friendly_message(&error), "requested resource was not found");
}

#[test]
fn bare_401_maps_to_authentication_generic() {
    let error = ApiError::Http {
        status: 401,
        body: ErrorBody::request_failed(),
    };
    assert_eq!(friendly_message(&error), "authentication required");
}

#[test]
fn bare_500_maps_to_server_error_generic() {
    let error = ApiError::Http {
        status: 500,
        body: ErrorBody::request_failed(),
    };
    assert_eq!(friendly_message(&error), "server error occurred");
}

#[test]
fn empty_message_falls_back_to_status_generic() {
    let error = http_error(403, "", None);
    assert_eq!(friendly_message(&error), "access denied");
}

#[test]
fn unmapped_status_falls_back_to_unknown() {
    let error = http_error(418, "", None);
    assert_eq!(friendly_message(&error), "an unknown error occurred");
}

#[test]
fn csrf_failure_has_dedicated_message() {
    assert_eq!(
        friendly_message(&ApiError::CsrfUnavailable),
        "could not establish a secure session with the server"
    );
}

// =============================================================================
// status helpers
// =============================================================================

#[test]
fn status_reported_for_http_errors_only() {
    assert_eq!(http_error(404, "", None).status(), Some(404));
    assert_eq!(ApiError::CsrfUnavailable.status(), None);
}

#[test]
fn is_not_found_matches_404_only() {
    assert!(http_error(404, "", None).is_not_found());
    assert!(!http_error(401, "", None).is_not_found());
    assert!(!ApiError::MissingData("x").is_not_found());
}
