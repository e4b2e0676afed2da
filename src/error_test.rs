use super::*;

fn corrupt() -> StoreError {
    let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    StoreError::Corrupt(err)
}

// =============================================================================
// StoreError
// =============================================================================

#[test]
fn store_error_codes() {
    assert_eq!(StoreError::Unavailable("x".into()).error_code(), "E_STORE_UNAVAILABLE");
    assert_eq!(
        StoreError::WriteFailed { key: "userRole".into(), reason: "disk full".into() }.error_code(),
        "E_STORE_WRITE"
    );
    assert_eq!(StoreError::TimedOut { ms: 10 }.error_code(), "E_STORE_TIMEOUT");
    assert_eq!(corrupt().error_code(), "E_STORE_CORRUPT");
}

#[test]
fn store_error_corrupt_not_retryable() {
    assert!(!corrupt().retryable());
    assert!(StoreError::TimedOut { ms: 10 }.retryable());
    assert!(StoreError::Unavailable("down".into()).retryable());
}

#[test]
fn store_error_display_names_key() {
    let err = StoreError::WriteFailed { key: "userToken".into(), reason: "quota".into() };
    assert_eq!(err.to_string(), "storage write failed for userToken: quota");
}

// =============================================================================
// SessionError
// =============================================================================

#[test]
fn session_error_codes() {
    assert_eq!(SessionError::InvalidRole("admin".into()).error_code(), "E_INVALID_ROLE");
    assert_eq!(SessionError::MissingToken.error_code(), "E_MISSING_TOKEN");
    assert_eq!(
        SessionError::StorageUnavailable(StoreError::Unavailable("x".into())).error_code(),
        "E_STORAGE_UNAVAILABLE"
    );
}

#[test]
fn write_failed_inherits_retryable_from_source() {
    let retry = SessionError::StorageWriteFailed { key: "userRole", source: StoreError::TimedOut { ms: 5 } };
    assert!(retry.retryable());
    assert_eq!(retry.error_code(), "E_STORAGE_WRITE_FAILED");

    let no_retry = SessionError::StorageWriteFailed { key: "userRole", source: corrupt() };
    assert!(!no_retry.retryable());
}

#[test]
fn invalid_role_not_retryable() {
    assert!(!SessionError::InvalidRole("admin".into()).retryable());
    assert!(!SessionError::MissingToken.retryable());
}

#[test]
fn invalid_role_display_quotes_value() {
    assert_eq!(SessionError::InvalidRole("admin".into()).to_string(), "invalid role: \"admin\"");
}
