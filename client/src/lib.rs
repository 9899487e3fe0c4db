//! Session-aware HTTP client for the Solsol mascot backend.
//!
//! ARCHITECTURE
//! ============
//! [`ApiClient`] owns one reqwest client, one cookie jar, and one
//! process-resident session cache. All requests go through a single
//! dispatch path that attaches the CSRF token on mutating methods,
//! replays a request at most once after a transparent credential
//! refresh on 401, and normalizes failures into [`ApiError`].
//!
//! The backend holds the real credential in an HTTP-only cookie; this
//! client never reads it and never persists anything. Route guards and
//! other synchronous call sites read the cached session state via
//! [`ApiClient::is_authenticated`] / [`ApiClient::current_user`];
//! anything needing fresh truth awaits [`ApiClient::fetch_user`].

pub mod api;
pub mod client;
pub mod config;
pub mod credentials;
pub mod envelope;
pub mod error;
mod flight;
pub mod session;

pub use reqwest::Method;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, friendly_message};
pub use session::UserProfile;
