//! Session data model — the persisted token/role pair.
//!
//! DESIGN
//! ======
//! The role tag is a closed enum. Anything read back from storage goes
//! through [`Role::from_str`], so a tampered or stale value can never
//! become an authenticated role.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Storage key holding the opaque session token.
pub const TOKEN_KEY: &str = "userToken";
/// Storage key holding the role tag.
pub const ROLE_KEY: &str = "userRole";

// =============================================================================
// ROLE
// =============================================================================

/// The marketplace role a session was granted at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Shopkeeper,
    Customer,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Shopkeeper, Role::Customer];

    /// Wire/storage representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shopkeeper => "shopkeeper",
            Self::Customer => "customer",
        }
    }

    /// Entry screen of the gated tree for this role.
    #[must_use]
    pub fn home_route(self) -> &'static str {
        match self {
            Self::Shopkeeper => "shopkeeper/dashboard",
            Self::Customer => "customer/dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SessionError;

    /// Exact, case-sensitive match against the stored tags.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shopkeeper" => Ok(Self::Shopkeeper),
            "customer" => Ok(Self::Customer),
            other => Err(SessionError::InvalidRole(other.to_owned())),
        }
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// A validated token/role pair. Both halves are always present.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub role: Role,
}

impl Session {
    /// Validate raw storage values into a session.
    ///
    /// Returns `Ok(None)` when either half is missing or the token is empty,
    /// and `InvalidRole` when the role tag is not recognized.
    pub fn from_parts(token: Option<String>, role: Option<String>) -> Result<Option<Self>, SessionError> {
        let (Some(token), Some(role)) = (token, role) else {
            return Ok(None);
        };
        if token.is_empty() {
            return Ok(None);
        }
        let role = role.parse::<Role>()?;
        Ok(Some(Self { token, role }))
    }
}

// Token is a credential; keep it out of debug output and logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
