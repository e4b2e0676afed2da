//! Client-side session state for the Pasher Dokan marketplace app.
//!
//! DESIGN
//! ======
//! A `SessionController` owns the tri-state auth status and is the only
//! writer of the persisted token/role pair held by a `SessionStore`. The
//! `AppShell` turns that status into the screen tree to mount. Consumers get
//! the controller by handle (`Arc`); there is no global session.

pub mod config;
pub mod controller;
pub mod error;
pub mod session;
pub mod shell;
pub mod store;

pub use config::SessionConfig;
pub use controller::{AuthStatus, SessionController};
pub use error::{ErrorCode, SessionError, StoreError};
pub use session::{Role, Session};
pub use shell::{AppShell, ShellView, status_report};
pub use store::{FileStore, MemoryStore, SessionStore};
