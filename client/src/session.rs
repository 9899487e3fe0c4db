//! Process-resident session cache.
//!
//! The cache is the client's *belief* about authentication, derived
//! entirely from server responses; there is no local expiry clock and
//! nothing is persisted. Reads are synchronous so route guards can make
//! an instantaneous (possibly stale) decision; call sites needing fresh
//! truth await [`crate::ApiClient::fetch_user`] instead.

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

/// Profile returned by the identity endpoint. Treated as a value:
/// replaced wholesale on every successful fetch, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: i64,
    pub username: String,
    pub nickname: String,
    #[serde(default)]
    pub campus: Option<String>,
    #[serde(default)]
    pub total_points: i64,
}

#[derive(Debug, Clone, Default)]
struct Session {
    user: Option<UserProfile>,
    known_authenticated: bool,
}

/// Lock-guarded session state shared by every clone of the client.
///
/// Transitions: unknown -> authenticated on a successful identity fetch
/// or refresh, back to unknown on logout or any failed fetch/refresh.
#[derive(Debug, Default)]
pub(crate) struct SessionCache {
    inner: RwLock<Session>,
}

impl SessionCache {
    pub(crate) fn is_authenticated(&self) -> bool {
        self.read().known_authenticated
    }

    pub(crate) fn user(&self) -> Option<UserProfile> {
        self.read().user.clone()
    }

    pub(crate) fn store_user(&self, user: UserProfile) {
        let mut session = self.write();
        session.user = Some(user);
        session.known_authenticated = true;
    }

    /// A refresh proved the credential is live, but the profile is only
    /// known once the identity endpoint has been consulted.
    pub(crate) fn mark_authenticated(&self) {
        self.write().known_authenticated = true;
    }

    pub(crate) fn clear(&self) {
        *self.write() = Session::default();
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Session> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Session> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
