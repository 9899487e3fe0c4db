//! User lookup endpoints.

use reqwest::Method;

use crate::client::ApiClient;
use crate::envelope::unwrap_data;
use crate::error::ApiError;
use crate::session::UserProfile;

impl ApiClient {
    /// Fetch another user's public profile, points included. Does not
    /// touch the cached session — only the identity endpoint does.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn user_info(&self, user_id: i64) -> Result<UserProfile, ApiError> {
        let path = format!("/users/{user_id}");
        let body = self.request(Method::GET, &path, None).await?;
        unwrap_data(body, "user")
    }
}
