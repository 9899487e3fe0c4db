//! Credential store seam between the client and its cookie transport.
//!
//! The CSRF contract: the server sets a readable `XSRF-TOKEN` cookie
//! and expects its value echoed back in an `X-XSRF-TOKEN` header on
//! every non-GET/HEAD request. The trait exists so non-browser-style
//! harnesses (tests, server-side tools) can supply an in-memory token
//! instead of a live cookie jar.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod tests;

use std::sync::{Arc, Mutex, PoisonError};

use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};

/// Cookie the server issues the CSRF token in.
pub const CSRF_COOKIE_NAME: &str = "XSRF-TOKEN";

/// Header the client echoes the token back in.
pub const CSRF_HEADER_NAME: &str = "X-XSRF-TOKEN";

/// Read access to the CSRF credential.
pub trait CredentialStore: Send + Sync {
    /// Current CSRF token, if one has been issued.
    fn csrf_token(&self) -> Option<String>;
}

/// Credential store backed by the reqwest cookie jar the HTTP client
/// itself writes into, so the token is re-read per request and always
/// reflects the latest `Set-Cookie` from the server.
pub struct CookieCredentials {
    jar: Arc<Jar>,
    base: Url,
}

impl CookieCredentials {
    #[must_use]
    pub fn new(jar: Arc<Jar>, base: Url) -> Self {
        Self { jar, base }
    }
}

impl CredentialStore for CookieCredentials {
    fn csrf_token(&self) -> Option<String> {
        let header = self.jar.cookies(&self.base)?;
        cookie_value(header.to_str().ok()?, CSRF_COOKIE_NAME)
    }
}

/// Extract a cookie's value from a `Cookie` header string.
#[must_use]
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_owned())
    })
}

/// In-memory credential store for harnesses without a cookie jar.
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    token: Mutex<Option<String>>,
}

impl MemoryCredentials {
    pub fn set_token(&self, token: impl Into<String>) {
        *self.lock() = Some(token.into());
    }

    pub fn clear(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CredentialStore for MemoryCredentials {
    fn csrf_token(&self) -> Option<String> {
        self.lock().clone()
    }
}
