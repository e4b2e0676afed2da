//! App shell — picks which screen tree to mount from the session status.
//!
//! SYSTEM CONTEXT
//! ==============
//! The shell shows a loading placeholder while the controller restores the
//! session, then mounts either the public (login/register) tree or the gated
//! tree for the session's role. Route tables themselves belong to the UI.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::watch;

use crate::config::SessionConfig;
use crate::controller::{AuthStatus, SessionController};
use crate::session::Role;
use crate::store::FileStore;

/// Which top-level screen tree the shell should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellView {
    Loading,
    Public,
    Gated(Role),
}

impl ShellView {
    #[must_use]
    pub fn for_status(status: AuthStatus) -> Self {
        match status {
            AuthStatus::Unknown => Self::Loading,
            AuthStatus::Unauthenticated => Self::Public,
            AuthStatus::Authenticated(role) => Self::Gated(role),
        }
    }

    /// First route mounted for this view.
    #[must_use]
    pub fn entry_route(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Public => "login",
            Self::Gated(role) => role.home_route(),
        }
    }
}

/// JSON report of a status plus the route the shell would mount for it.
///
/// # Errors
///
/// Returns an error if the status cannot be serialized.
pub fn status_report(status: AuthStatus) -> Result<Value, serde_json::Error> {
    let mut json = serde_json::to_value(status)?;
    if let Value::Object(map) = &mut json {
        map.insert("route".into(), Value::from(ShellView::for_status(status).entry_route()));
    }
    Ok(json)
}

pub struct AppShell {
    controller: Arc<SessionController>,
    splash: Duration,
}

impl AppShell {
    #[must_use]
    pub fn new(controller: Arc<SessionController>, splash: Duration) -> Self {
        Self { controller, splash }
    }

    /// Wire a file-backed controller from config.
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        let store = Arc::new(FileStore::new(&config.store_path));
        let controller = SessionController::new(store).with_timeout(config.storage_timeout);
        Self::new(Arc::new(controller), config.splash)
    }

    /// Handle passed to screens that call `login`/`logout`.
    #[must_use]
    pub fn controller(&self) -> &Arc<SessionController> {
        &self.controller
    }

    #[must_use]
    pub fn view(&self) -> ShellView {
        ShellView::for_status(self.controller.status())
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.controller.subscribe()
    }

    /// Restore the session while the splash is up; returns the first real view.
    pub async fn boot(&self) -> ShellView {
        let (status, ()) = tokio::join!(self.controller.initialize(), tokio::time::sleep(self.splash));
        ShellView::for_status(status)
    }
}

#[cfg(test)]
#[path = "shell_test.rs"]
mod tests;
