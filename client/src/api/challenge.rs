//! Challenge endpoints: browsing, joining, progress updates.
//!
//! Unlike the mascot endpoints these return their payloads bare, not
//! wrapped in the success envelope.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    #[serde(alias = "id")]
    pub challenge_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub reward_points: i64,
    #[serde(default)]
    pub status: Option<String>,
}

impl ApiClient {
    /// List challenges, optionally filtered by category.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn challenges(&self, category: Option<&str>) -> Result<Vec<Challenge>, ApiError> {
        let path = match category {
            Some(category) if category != "all" => format!("/challenges?category={category}"),
            _ => "/challenges".to_owned(),
        };
        let body = self.request(Method::GET, &path, None).await?;
        Ok(serde_json::from_value(
            body.unwrap_or_else(|| Value::Array(Vec::new())),
        )?)
    }

    /// Fetch a single challenge.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn challenge_detail(&self, challenge_id: i64) -> Result<Challenge, ApiError> {
        let path = format!("/challenges/{challenge_id}");
        let body = self.request(Method::GET, &path, None).await?;
        Ok(serde_json::from_value(body.ok_or(ApiError::MissingData("challenge"))?)?)
    }

    /// Join a challenge, returning the server's join receipt.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn join_challenge(&self, challenge_id: i64) -> Result<Value, ApiError> {
        let path = format!("/challenges/{challenge_id}/join");
        let body = self.request(Method::POST, &path, None).await?;
        body.ok_or(ApiError::MissingData("challenge join"))
    }

    /// Report progress on a joined challenge.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn update_challenge_progress(
        &self,
        challenge_id: i64,
        progress_amount: i32,
    ) -> Result<Value, ApiError> {
        let path = format!("/challenges/{challenge_id}/progress");
        let payload = serde_json::json!({ "progressAmount": progress_amount });
        let body = self.request(Method::POST, &path, Some(payload)).await?;
        body.ok_or(ApiError::MissingData("challenge progress"))
    }

    /// List the caller's joined challenges, optionally by status.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn my_challenges(&self, status: Option<&str>) -> Result<Vec<Challenge>, ApiError> {
        let path = match status {
            Some(status) => format!("/challenges/my?status={status}"),
            None => "/challenges/my".to_owned(),
        };
        let body = self.request(Method::GET, &path, None).await?;
        Ok(serde_json::from_value(
            body.unwrap_or_else(|| Value::Array(Vec::new())),
        )?)
    }
}
