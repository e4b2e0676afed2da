//! Session configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_STORE_PATH: &str = ".dokan/session.json";
pub const DEFAULT_STORAGE_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_SPLASH_MS: u64 = 2_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Location of the file-backed session document.
    pub store_path: PathBuf,
    /// Per-call storage timeout. `None` waits indefinitely.
    pub storage_timeout: Option<Duration>,
    /// Minimum time the app shell shows its splash before the first real view.
    pub splash: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            storage_timeout: timeout_from_ms(DEFAULT_STORAGE_TIMEOUT_MS),
            splash: Duration::from_millis(DEFAULT_SPLASH_MS),
        }
    }
}

impl SessionConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `SESSION_STORE_PATH`: default `.dokan/session.json`
    /// - `SESSION_STORAGE_TIMEOUT_MS`: default 5000, `0` disables the timeout
    /// - `SESSION_SPLASH_MS`: default 2000
    ///
    /// Unparsable numbers fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let store_path = lookup("SESSION_STORE_PATH")
            .filter(|p| !p.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STORE_PATH), PathBuf::from);
        let timeout_ms = parse_u64(lookup("SESSION_STORAGE_TIMEOUT_MS"), DEFAULT_STORAGE_TIMEOUT_MS);
        let splash_ms = parse_u64(lookup("SESSION_SPLASH_MS"), DEFAULT_SPLASH_MS);

        Self {
            store_path,
            storage_timeout: timeout_from_ms(timeout_ms),
            splash: Duration::from_millis(splash_ms),
        }
    }
}

/// `0` means "no timeout".
#[must_use]
pub fn timeout_from_ms(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

fn parse_u64(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
