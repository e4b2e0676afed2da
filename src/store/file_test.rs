use super::*;

/// Unique scratch directory under the system temp dir.
fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("dokan-session-test-{}", Uuid::new_v4()))
}

// =============================================================================
// get
// =============================================================================

#[tokio::test]
async fn get_missing_file_is_none() {
    let dir = scratch_dir();
    let store = FileStore::new(dir.join("session.json"));
    assert_eq!(store.get("userToken").await.unwrap(), None);
}

#[tokio::test]
async fn get_empty_file_is_none() {
    let dir = scratch_dir();
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("session.json");
    std::fs::write(&path, "").unwrap();

    let store = FileStore::new(&path);
    assert_eq!(store.get("userRole").await.unwrap(), None);
    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn get_corrupt_file_errors() {
    let dir = scratch_dir();
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("session.json");
    std::fs::write(&path, "{not json").unwrap();

    let store = FileStore::new(&path);
    assert!(matches!(store.get("userToken").await, Err(StoreError::Corrupt(_))));
    let _ = std::fs::remove_dir_all(dir);
}

// =============================================================================
// set / delete
// =============================================================================

#[tokio::test]
async fn set_creates_parent_dirs_and_persists() {
    let dir = scratch_dir();
    let path = dir.join("nested").join("session.json");
    let store = FileStore::new(&path);

    store.set("userToken", "tok123").await.unwrap();
    store.set("userRole", "customer").await.unwrap();

    // A fresh handle simulates an app restart.
    let reopened = FileStore::new(&path);
    assert_eq!(reopened.get("userToken").await.unwrap().as_deref(), Some("tok123"));
    assert_eq!(reopened.get("userRole").await.unwrap().as_deref(), Some("customer"));
    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn set_leaves_no_temp_files() {
    let dir = scratch_dir();
    let store = FileStore::new(dir.join("session.json"));
    store.set("userToken", "tok").await.unwrap();

    let names: Vec<String> = std::fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["session.json".to_string()]);
    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn delete_removes_only_that_key() {
    let dir = scratch_dir();
    let store = FileStore::new(dir.join("session.json"));
    store.set("userToken", "tok").await.unwrap();
    store.set("userRole", "shopkeeper").await.unwrap();

    store.delete("userToken").await.unwrap();
    assert_eq!(store.get("userToken").await.unwrap(), None);
    assert_eq!(store.get("userRole").await.unwrap().as_deref(), Some("shopkeeper"));
    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn delete_absent_key_without_file_succeeds() {
    let dir = scratch_dir();
    let store = FileStore::new(dir.join("session.json"));
    store.delete("userToken").await.unwrap();
    assert!(!store.path().exists());
}

#[tokio::test]
async fn delete_discards_corrupt_document() {
    let dir = scratch_dir();
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("session.json");
    std::fs::write(&path, "garbage").unwrap();

    let store = FileStore::new(&path);
    store.delete("userToken").await.unwrap();
    assert_eq!(store.get("userToken").await.unwrap(), None);
    assert_eq!(store.get("userRole").await.unwrap(), None);
    let _ = std::fs::remove_dir_all(dir);
}
