//! The session-aware HTTP client.
//!
//! DISPATCH PATH
//! =============
//! Every call funnels through [`Inner::request_with_retries`]:
//! resolve the URL, attach the CSRF header on mutating methods (seeding
//! the cookie first if absent), send with cookies, parse the body, then
//! apply the 401 policy — one single-flight credential refresh followed
//! by exactly one replay, never for the login endpoint, never
//! recursively.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use serde_json::Value;

use crate::config::{self, ClientConfig};
use crate::credentials::{CSRF_HEADER_NAME, CookieCredentials, CredentialStore};
use crate::envelope::{Envelope, ErrorBody};
use crate::error::ApiError;
use crate::flight::Singleflight;
use crate::session::{SessionCache, UserProfile};

/// How long a resolved refresh/identity flight lingers before the slot
/// clears, absorbing bursts of near-simultaneous 401s.
const FLIGHT_LINGER: Duration = Duration::from_millis(30);

/// Cheaply cloneable handle to one authenticated API session.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

pub(crate) struct Inner {
    http: reqwest::Client,
    config: ClientConfig,
    credentials: Arc<dyn CredentialStore>,
    session: SessionCache,
    refresh_flight: Singleflight<bool>,
    identity_flight: Singleflight<Option<UserProfile>>,
}

impl ApiClient {
    /// Build a client with a fresh cookie jar and a jar-backed
    /// credential store.
    ///
    /// # Errors
    ///
    /// Fails if the configured base URL does not parse or the HTTP
    /// client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let base = Url::parse(&config.base_url)
            .map_err(|_| ApiError::InvalidBaseUrl(config.base_url.clone()))?;
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .build()?;
        let credentials = Arc::new(CookieCredentials::new(jar, base));
        Ok(Self::with_credentials(config, http, credentials))
    }

    /// Build a client around an existing HTTP client and credential
    /// store. Lets non-browser-style harnesses supply an in-memory
    /// CSRF token instead of a cookie jar.
    #[must_use]
    pub fn with_credentials(
        config: ClientConfig,
        http: reqwest::Client,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                http,
                config,
                credentials,
                session: SessionCache::default(),
                refresh_flight: Singleflight::new(FLIGHT_LINGER),
                identity_flight: Singleflight::new(FLIGHT_LINGER),
            }),
        }
    }

    /// Issue a JSON request against the configured base URL.
    ///
    /// Returns the parsed response body, or `None` when the server
    /// answered 2xx with an empty body.
    ///
    /// # Errors
    ///
    /// [`ApiError::Network`] when the transport failed before a
    /// response arrived, [`ApiError::Http`] for non-2xx statuses
    /// (including a 401 that survived the refresh-and-replay cycle),
    /// [`ApiError::CsrfUnavailable`] when a mutating request could not
    /// obtain a CSRF token even after seeding.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Option<Value>, ApiError> {
        self.request_with_headers(method, path, body, HeaderMap::new())
            .await
    }

    /// Like [`ApiClient::request`] with extra headers. An explicit
    /// `Content-Type` here wins over the JSON default.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn request_with_headers(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        headers: HeaderMap,
    ) -> Result<Option<Value>, ApiError> {
        let max_retries = self.inner.config.max_auth_retries;
        self.inner
            .request_with_retries(method, path, body, headers, max_retries)
            .await
    }

    /// Renew the server-side credential. Shares one in-flight attempt
    /// across concurrent callers and never fails; a refresh that could
    /// not complete reports `false`.
    pub async fn refresh(&self) -> bool {
        let inner = Arc::clone(&self.inner);
        self.inner
            .refresh_flight
            .run(move || Inner::do_refresh(inner))
            .await
    }

    /// Fetch the authenticated user's profile, replacing the cached
    /// session state. Shares one in-flight attempt across concurrent
    /// callers and never fails; any terminal failure clears the cache
    /// and reports `None`.
    pub async fn fetch_user(&self) -> Option<UserProfile> {
        let inner = Arc::clone(&self.inner);
        self.inner
            .identity_flight
            .run(move || Inner::do_fetch_user(inner))
            .await
    }

    /// Authenticate with the backend. A 401 here surfaces directly —
    /// it means bad credentials, not an expired session, so no refresh
    /// cycle runs and exactly one HTTP call is made.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn login(&self, user_id: &str, password: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "userId": user_id, "password": password });
        let max_retries = self.inner.config.max_auth_retries;
        self.inner
            .request_with_retries(
                Method::POST,
                config::LOGIN_PATH,
                Some(body),
                HeaderMap::new(),
                max_retries,
            )
            .await?;
        self.inner.session.mark_authenticated();
        Ok(())
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`]. Validation failures arrive as
    /// [`ApiError::Http`] with field-level messages in the body.
    pub async fn signup(
        &self,
        user_id: &str,
        password: &str,
        nickname: &str,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "userId": user_id,
            "password": password,
            "nickname": nickname,
        });
        let max_retries = self.inner.config.max_auth_retries;
        self.inner
            .request_with_retries(
                Method::POST,
                config::SIGNUP_PATH,
                Some(body),
                HeaderMap::new(),
                max_retries,
            )
            .await?;
        Ok(())
    }

    /// End the session. The server call is best-effort and never
    /// refresh-retried; the local cache is cleared regardless of the
    /// server outcome.
    pub async fn logout(&self) {
        let result = self
            .inner
            .request_with_retries(Method::POST, config::LOGOUT_PATH, None, HeaderMap::new(), 0)
            .await;
        if let Err(error) = result {
            tracing::debug!(error = %error, "logout request failed; clearing local session anyway");
        }
        self.inner.session.clear();
    }

    /// Last cached authentication state. Never touches the network.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.session.is_authenticated()
    }

    /// Last cached profile. Never touches the network.
    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.inner.session.user()
    }
}

impl Inner {
    async fn request_with_retries(
        self: &Arc<Self>,
        method: Method,
        path: &str,
        body: Option<Value>,
        headers: HeaderMap,
        max_retries: u32,
    ) -> Result<Option<Value>, ApiError> {
        let mutating = method != Method::GET && method != Method::HEAD;
        let csrf = if mutating {
            Some(self.csrf_token_or_seed().await?)
        } else {
            None
        };

        let mut attempt: u32 = 0;
        loop {
            let (status, parsed) = self
                .execute(method.clone(), path, body.as_ref(), &headers, csrf.as_deref())
                .await?;

            if status == StatusCode::UNAUTHORIZED
                && attempt < max_retries
                && path != config::LOGIN_PATH
            {
                attempt += 1;
                tracing::debug!(%path, "unauthorized response; attempting credential refresh");
                if self.run_refresh().await {
                    // Replay with the same body and CSRF header.
                    continue;
                }
                self.session.clear();
                return Err(ApiError::Http {
                    status: status.as_u16(),
                    body: ErrorBody::from_parsed(parsed.as_ref()),
                });
            }

            if !status.is_success() {
                return Err(ApiError::Http {
                    status: status.as_u16(),
                    body: ErrorBody::from_parsed(parsed.as_ref()),
                });
            }

            return Ok(parsed);
        }
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        headers: &HeaderMap,
        csrf: Option<&str>,
    ) -> Result<(StatusCode, Option<Value>), ApiError> {
        let url = self.config.resolve(path);
        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        if !headers.is_empty() {
            request = request.headers(headers.clone());
        }
        if let Some(token) = csrf {
            request = request.header(CSRF_HEADER_NAME, HeaderValue::from_str(token)?);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let parsed = if text.trim().is_empty() {
            None
        } else {
            serde_json::from_str::<Value>(&text).ok()
        };

        Ok((status, parsed))
    }

    /// Read the CSRF token, seeding the cookie with a harmless
    /// unauthenticated request if it is absent.
    async fn csrf_token_or_seed(&self) -> Result<String, ApiError> {
        if let Some(token) = self.credentials.csrf_token() {
            return Ok(token);
        }

        let url = self.config.resolve(config::CSRF_SEED_PATH);
        if let Err(error) = self.http.get(&url).send().await {
            tracing::warn!(error = %error, "CSRF seed request failed");
        }

        self.credentials.csrf_token().ok_or(ApiError::CsrfUnavailable)
    }

    async fn run_refresh(self: &Arc<Self>) -> bool {
        let inner = Arc::clone(self);
        self.refresh_flight
            .run(move || Inner::do_refresh(inner))
            .await
    }

    async fn do_refresh(self: Arc<Self>) -> bool {
        let url = self.config.resolve(config::REFRESH_PATH);
        let mut request = self.http.post(&url);
        if let Some(token) = self.credentials.csrf_token() {
            request = request.header(CSRF_HEADER_NAME, token);
        }

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("credential refresh succeeded");
                self.session.mark_authenticated();
                true
            }
            Ok(response) => {
                tracing::warn!(status = response.status().as_u16(), "credential refresh rejected");
                false
            }
            Err(error) => {
                tracing::warn!(error = %error, "credential refresh did not reach the server");
                false
            }
        }
    }

    async fn do_fetch_user(self: Arc<Self>) -> Option<UserProfile> {
        let mut attempt: u32 = 0;
        loop {
            match self.identity_once().await {
                Ok(user) => {
                    self.session.store_user(user.clone());
                    return Some(user);
                }
                Err(error) => {
                    let transient = matches!(error, ApiError::Network(_))
                        || error.status().is_some_and(|status| status >= 500);
                    if transient && attempt < self.config.identity_retries {
                        attempt += 1;
                        tracing::debug!(attempt, "identity fetch failed; retrying");
                        tokio::time::sleep(self.config.identity_retry_delay).await;
                        continue;
                    }
                    tracing::debug!(error = %error, "identity fetch failed; clearing session");
                    self.session.clear();
                    return None;
                }
            }
        }
    }

    async fn identity_once(self: &Arc<Self>) -> Result<UserProfile, ApiError> {
        let body = self
            .request_with_retries(
                Method::GET,
                config::ME_PATH,
                None,
                HeaderMap::new(),
                self.config.max_auth_retries,
            )
            .await?;
        let value = body.ok_or(ApiError::MissingData("user"))?;
        let envelope: Envelope<UserProfile> = serde_json::from_value(value)?;
        envelope.data.ok_or(ApiError::MissingData("user"))
    }
}
