//! Mascot endpoints: creation, lookup, customization.

#[cfg(test)]
#[path = "mascot_test.rs"]
mod tests;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::envelope::unwrap_data;
use crate::error::ApiError;

/// The user's mascot as the backend reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mascot {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub mascot_type: String,
    pub level: i32,
    pub exp: i32,
    #[serde(default)]
    pub equipped_item: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Mascot {
    /// Evolution stage, one stage per ten levels.
    #[must_use]
    pub fn evolution_stage(&self) -> i32 {
        self.level / 10
    }

    /// Experience still needed for the next level, floored at zero.
    #[must_use]
    pub fn exp_to_next_level(&self) -> i32 {
        ((self.level + 1) * 100 - self.exp).max(0)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMascot {
    pub name: String,
    #[serde(rename = "type")]
    pub mascot_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipped_item: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMascot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipped_item: Option<String>,
}

impl ApiClient {
    /// Fetch the caller's mascot. A 404 means no mascot exists yet and
    /// is `Ok(None)`, not a failure.
    ///
    /// # Errors
    ///
    /// Any other failure from [`ApiClient::request`].
    pub async fn mascot(&self) -> Result<Option<Mascot>, ApiError> {
        match self.request(Method::GET, "/mascot", None).await {
            Ok(body) => Ok(Some(unwrap_data(body, "mascot")?)),
            Err(error) if error.is_not_found() => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Create the caller's mascot.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn create_mascot(&self, mascot: &CreateMascot) -> Result<Mascot, ApiError> {
        let body = self
            .request(Method::POST, "/mascot", Some(serde_json::to_value(mascot)?))
            .await?;
        unwrap_data(body, "mascot")
    }

    /// Update the mascot's name or equipped item.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn update_mascot(&self, update: &UpdateMascot) -> Result<Mascot, ApiError> {
        let body = self
            .request(Method::PATCH, "/mascot", Some(serde_json::to_value(update)?))
            .await?;
        unwrap_data(body, "mascot")
    }

    /// Equip shop items onto the mascot.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn equip_items(&self, item_ids: &[i64]) -> Result<Mascot, ApiError> {
        let payload = serde_json::json!({ "itemIds": item_ids });
        let body = self
            .request(Method::POST, "/mascot/equip", Some(payload))
            .await?;
        unwrap_data(body, "mascot")
    }
}
