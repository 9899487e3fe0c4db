//! Error taxonomy and user-facing message normalization.
//!
//! Four failure kinds are kept distinct: transport failures that never
//! produced a response, HTTP-status failures carrying the server's
//! envelope, CSRF configuration failures where no request was sent at
//! all, and payload decode failures on otherwise-successful responses.

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

use crate::envelope::{ErrorBody, GENERIC_FAILURE_MESSAGE};

/// Failure of a single API call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("http {status}: {}", body.message)]
    Http { status: u16, body: ErrorBody },

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("no CSRF token available after seeding; is the backend reachable?")]
    CsrfUnavailable,

    #[error("CSRF token is not a valid header value")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response is missing expected `{0}` data")]
    MissingData(&'static str),
}

impl ApiError {
    /// HTTP status code, for status-based handling at call sites.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for a 404 response, which several endpoints treat as
    /// "resource absent" rather than a failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Extract a user-displayable message from an API failure.
///
/// Precedence: first field-level validation message, then the
/// envelope's top-level message, then a status-keyed generic, then a
/// catch-all. The synthetic empty-body placeholder never beats the
/// status-keyed generics.
#[must_use]
pub fn friendly_message(error: &ApiError) -> String {
    match error {
        ApiError::Http { status, body } => {
            if let Some(field_error) = body.first_field_error() {
                return field_error.to_owned();
            }
            if !body.message.is_empty() && body.message != GENERIC_FAILURE_MESSAGE {
                return body.message.clone();
            }
            status_message(*status).to_owned()
        }
        ApiError::Network(_) => "network error occurred; please try again shortly".to_owned(),
        ApiError::CsrfUnavailable | ApiError::InvalidHeader(_) => {
            "could not establish a secure session with the server".to_owned()
        }
        ApiError::InvalidBaseUrl(_) | ApiError::Json(_) | ApiError::MissingData(_) => {
            "an unknown error occurred".to_owned()
        }
    }
}

fn status_message(status: u16) -> &'static str {
    match status {
        400 => "invalid request",
        401 => "authentication required",
        403 => "access denied",
        404 => "requested resource was not found",
        500 => "server error occurred",
        _ => "an unknown error occurred",
    }
}
