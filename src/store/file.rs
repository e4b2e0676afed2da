//! File-backed storage backend — the local-device persistence layer.
//!
//! DESIGN
//! ======
//! All keys live in one small JSON object on disk. Mutations are
//! read-modify-write under an in-process lock, written to a sibling temp
//! file, synced, then renamed over the original so a crash mid-write never
//! leaves a half-written document.
//!
//! TRADE-OFFS
//! ==========
//! A corrupt document fails reads (the controller fails closed on that) but
//! is discarded by the next mutation, so logout can always clear it.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::warn;
use uuid::Uuid;

use super::SessionStore;
use crate::error::StoreError;

type Document = BTreeMap<String, String>;

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Document, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Document::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Document::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Load for mutation. Returns the document and whether a corrupt one was discarded.
    async fn load_for_update(&self) -> Result<(Document, bool), StoreError> {
        match self.load().await {
            Ok(doc) => Ok((doc, false)),
            Err(StoreError::Corrupt(e)) => {
                warn!(path = %self.path.display(), error = %e, "discarding corrupt session document");
                Ok((Document::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    async fn persist(&self, doc: &Document) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let bytes = serde_json::to_vec_pretty(doc)?;
        let file_name = self.path.file_name().and_then(|n| n.to_str()).unwrap_or("session");
        let tmp = self.path.with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4()));

        let written = async {
            let mut file = tokio::fs::File::create(&tmp).await?;
            file.write_all(&bytes).await?;
            file.sync_all().await?;
            tokio::fs::rename(&tmp, &self.path).await
        }
        .await;

        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl SessionStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut doc = self.load().await?;
        Ok(doc.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let (mut doc, _) = self.load_for_update().await?;
        doc.insert(key.to_owned(), value.to_owned());
        self.persist(&doc).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let (mut doc, discarded) = self.load_for_update().await?;
        if doc.remove(key).is_none() && !discarded {
            return Ok(());
        }
        self.persist(&doc).await
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
