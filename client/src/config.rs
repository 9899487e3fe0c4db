//! Client configuration and URL resolution.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::time::Duration;

/// Default backend base URL, matching the local development server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "SOLSOL_BASE_URL";

/// Fixed auth endpoint paths, resolved against the base URL.
pub const LOGIN_PATH: &str = "/auth/login";
pub const SIGNUP_PATH: &str = "/auth/signup";
pub const REFRESH_PATH: &str = "/auth/refresh";
pub const ME_PATH: &str = "/auth/me";
pub const LOGOUT_PATH: &str = "/auth/logout";

/// Harmless unauthenticated endpoint that seeds the `XSRF-TOKEN` cookie.
pub const CSRF_SEED_PATH: &str = "/auth/csrf";

/// Configuration for [`crate::ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL all relative paths resolve against.
    pub base_url: String,
    /// How many times a request may be replayed after a credential
    /// refresh. One replay is the contract; raising this never causes
    /// more than one refresh per replay.
    pub max_auth_retries: u32,
    /// Extra attempts for the identity fetch when the failure looks
    /// transient (network error or 5xx), to smooth over app bootstrap.
    pub identity_retries: u32,
    /// Delay between identity fetch attempts.
    pub identity_retry_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            max_auth_retries: 1,
            identity_retries: 2,
            identity_retry_delay: Duration::from_millis(150),
        }
    }
}

impl ClientConfig {
    /// Build a config from the environment, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var(ENV_BASE_URL) {
            Ok(raw) if !raw.trim().is_empty() => Self::with_base_url(raw.trim()),
            _ => Self::default(),
        }
    }

    /// Default config pointed at the given base URL.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Resolve a request path against the base URL. Absolute `http(s)`
    /// targets pass through unchanged.
    #[must_use]
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }

        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}
