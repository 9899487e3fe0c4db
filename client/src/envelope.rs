//! The backend's common response envelope.
//!
//! Every JSON endpoint answers with `{success, message, data?, errors?}`;
//! `errors` maps field names to validation messages. This module owns
//! the envelope types plus the helpers that unwrap `data` out of a
//! successful response and shape a failure body out of anything else.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod tests;

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Message used when the server answered with an empty or unparseable
/// body. Treated as "no message" by [`crate::friendly_message`].
pub const GENERIC_FAILURE_MESSAGE: &str = "request failed";

/// Generic success envelope with a typed `data` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

/// Failure envelope carried inside [`ApiError::Http`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

impl ErrorBody {
    /// Synthetic body for responses with no usable JSON.
    #[must_use]
    pub fn request_failed() -> Self {
        Self {
            success: false,
            message: GENERIC_FAILURE_MESSAGE.to_owned(),
            errors: None,
        }
    }

    /// Shape a failure body out of whatever the server returned.
    #[must_use]
    pub fn from_parsed(parsed: Option<&Value>) -> Self {
        parsed
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or_else(Self::request_failed)
    }

    /// First field-level validation message, if any.
    #[must_use]
    pub fn first_field_error(&self) -> Option<&str> {
        self.errors
            .as_ref()
            .and_then(|errors| errors.values().next())
            .map(String::as_str)
    }
}

/// Unwrap the `data` payload out of an envelope response body.
pub(crate) fn unwrap_data<T: DeserializeOwned>(
    body: Option<Value>,
    what: &'static str,
) -> Result<T, ApiError> {
    let value = body.ok_or(ApiError::MissingData(what))?;
    let envelope: Envelope<T> = serde_json::from_value(value)?;
    envelope.data.ok_or(ApiError::MissingData(what))
}
