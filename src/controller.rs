//! Session controller — tri-state auth status over a [`SessionStore`].
//!
//! ARCHITECTURE
//! ============
//! The controller is the only writer of the session keys. Status lives in a
//! `tokio::sync::watch` channel so UI consumers subscribe instead of polling.
//! `initialize`, `login` and `logout` each hold `op_lock` for their whole
//! duration, so their storage calls never interleave and the token/role pair
//! is always written or cleared as a unit from the controller's view.
//!
//! TRADE-OFFS
//! ==========
//! Status only moves after storage confirms the write or delete. A failed
//! logout therefore leaves the user "logged in" in memory; claiming a logout
//! while credentials may still be on disk would be worse.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{Mutex, watch};
use tracing::{info, warn};

use crate::error::{ErrorCode, SessionError, StoreError};
use crate::session::{ROLE_KEY, Role, Session, TOKEN_KEY};
use crate::store::SessionStore;

// =============================================================================
// AUTH STATUS
// =============================================================================

/// Authentication status observed by dependent UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "role", rename_all = "snake_case")]
pub enum AuthStatus {
    /// Storage has not been consulted yet.
    Unknown,
    Authenticated(Role),
    Unauthenticated,
}

impl AuthStatus {
    #[must_use]
    pub fn role(self) -> Option<Role> {
        match self {
            Self::Authenticated(role) => Some(role),
            Self::Unknown | Self::Unauthenticated => None,
        }
    }

    #[must_use]
    pub fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// True once `initialize` (or any other operation) has settled the status.
    #[must_use]
    pub fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Owns the in-memory session status and all mutations of the session keys.
///
/// Share it as `Arc<SessionController>`; every method takes `&self`.
pub struct SessionController {
    store: Arc<dyn SessionStore>,
    status: watch::Sender<AuthStatus>,
    op_lock: Mutex<()>,
    timeout: Option<Duration>,
}

impl SessionController {
    /// Create a controller in the `Unknown` state with no storage timeout.
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let (status, _) = watch::channel(AuthStatus::Unknown);
        Self { store, status, op_lock: Mutex::new(()), timeout: None }
    }

    /// Bound every storage call. `None` waits indefinitely.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> AuthStatus {
        *self.status.borrow()
    }

    /// Role of the current session, if authenticated.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.status().role()
    }

    /// Subscribe to status transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.status.subscribe()
    }

    /// Wait until the status leaves `Unknown`.
    pub async fn ready(&self) -> AuthStatus {
        let mut rx = self.status.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        rx.wait_for(|s| s.is_known()).await.map_or(AuthStatus::Unauthenticated, |s| *s)
    }

    /// Restore the session from storage.
    ///
    /// Reads the token, then the role. Both must be present and the role must
    /// be recognized for `Authenticated`; anything else, including a read
    /// failure or timeout, yields `Unauthenticated`. Never fails and never
    /// leaves the status `Unknown`.
    pub async fn initialize(&self) -> AuthStatus {
        let _guard = self.op_lock.lock().await;

        let next = match self.load_session().await {
            Ok(Some(session)) => AuthStatus::Authenticated(session.role),
            Ok(None) => AuthStatus::Unauthenticated,
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "session restore failed; failing closed");
                AuthStatus::Unauthenticated
            }
        };
        self.transition(next);
        next
    }

    /// Persist a new session and transition to `Authenticated(role)`.
    ///
    /// # Errors
    ///
    /// `MissingToken` for an empty token. `StorageWriteFailed` when either
    /// write fails; the status is left unchanged. A failed token write leaves
    /// the previous pair in place. A failed role write after the token landed
    /// clears both keys on a best-effort basis.
    pub async fn login(&self, token: &str, role: Role) -> Result<AuthStatus, SessionError> {
        if token.is_empty() {
            return Err(SessionError::MissingToken);
        }

        let _guard = self.op_lock.lock().await;

        if let Err(e) = self.put(TOKEN_KEY, token).await {
            warn!(error = %e, code = e.error_code(), %role, "login token write failed");
            return Err(e);
        }
        if let Err(e) = self.put(ROLE_KEY, role.as_str()).await {
            warn!(error = %e, code = e.error_code(), %role, "login role write failed");
            self.discard_partial_pair().await;
            return Err(e);
        }

        let next = AuthStatus::Authenticated(role);
        self.transition(next);
        Ok(next)
    }

    /// Clear the persisted session and transition to `Unauthenticated`.
    ///
    /// Both deletes are attempted. Logging out with nothing stored succeeds.
    ///
    /// # Errors
    ///
    /// `StorageWriteFailed` for the first delete that failed. The status is
    /// left unchanged so the caller can retry.
    pub async fn logout(&self) -> Result<AuthStatus, SessionError> {
        let _guard = self.op_lock.lock().await;

        let token_result = self.remove(TOKEN_KEY).await;
        let role_result = self.remove(ROLE_KEY).await;

        if let Err(e) = token_result.and(role_result) {
            warn!(error = %e, code = e.error_code(), retryable = e.retryable(), "logout delete failed");
            return Err(e);
        }

        self.transition(AuthStatus::Unauthenticated);
        Ok(AuthStatus::Unauthenticated)
    }

    // -------------------------------------------------------------------------
    // storage plumbing
    // -------------------------------------------------------------------------

    async fn load_session(&self) -> Result<Option<Session>, SessionError> {
        let token = self.bounded(self.store.get(TOKEN_KEY)).await.map_err(SessionError::StorageUnavailable)?;
        let role = self.bounded(self.store.get(ROLE_KEY)).await.map_err(SessionError::StorageUnavailable)?;
        Session::from_parts(token, role)
    }

    async fn put(&self, key: &'static str, value: &str) -> Result<(), SessionError> {
        self.bounded(self.store.set(key, value))
            .await
            .map_err(|source| SessionError::StorageWriteFailed { key, source })
    }

    async fn remove(&self, key: &'static str) -> Result<(), SessionError> {
        self.bounded(self.store.delete(key))
            .await
            .map_err(|source| SessionError::StorageWriteFailed { key, source })
    }

    /// Clear both keys after a failed login so a new token never pairs with a stale role.
    async fn discard_partial_pair(&self) {
        for key in [TOKEN_KEY, ROLE_KEY] {
            if let Err(e) = self.remove(key).await {
                warn!(error = %e, key, "failed to clear partial login write");
            }
        }
    }

    async fn bounded<T>(&self, call: impl Future<Output = Result<T, StoreError>>) -> Result<T, StoreError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| StoreError::TimedOut {
                ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
            })?,
            None => call.await,
        }
    }

    fn transition(&self, next: AuthStatus) {
        let mut previous = next;
        let changed = self.status.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            previous = std::mem::replace(current, next);
            true
        });
        if changed {
            info!(from = ?previous, to = ?next, "session status changed");
        }
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
