//! Durable key-value storage for the persisted session.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tokio::{fs, sync::RwLock};
use tracing::warn;

/// Key holding the session token.
pub const TOKEN_KEY: &str = "userToken";

/// Key holding the JSON encoded public profile.
pub const PROFILE_KEY: &str = "userData";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error")]
    Io(#[from] std::io::Error),

    #[error("storage file is not valid json")]
    Json(#[from] serde_json::Error),
}

/// String key-value side channel that outlives the process.
#[automock]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key was never set or was removed.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing medium cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error when the value could not be made durable.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove every listed key. Absent keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing medium cannot be rewritten.
    async fn remove_all(&self, keys: &[&'static str]) -> Result<(), StorageError>;
}

/// Process-local store, durable only for as long as the value lives.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<FxHashMap<String, String>>,
}

impl MemoryKeyValueStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());

        Ok(())
    }

    async fn remove_all(&self, keys: &[&'static str]) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;

        for key in keys {
            entries.remove(*key);
        }

        Ok(())
    }
}

/// Store backed by a single JSON object file.
///
/// Every write rewrites the whole file. A missing file reads as empty.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<FxHashMap<String, String>, StorageError> {
        match fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(FxHashMap::default()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(FxHashMap::default()),
            Err(error) => Err(error.into()),
        }
    }

    /// Like `load`, but a file that is not valid JSON is discarded so the
    /// next write replaces it. The flag reports whether that happened.
    async fn load_for_write(&self) -> Result<(FxHashMap<String, String>, bool), StorageError> {
        match self.load().await {
            Ok(entries) => Ok((entries, false)),
            Err(StorageError::Json(error)) => {
                warn!(
                    path = %self.path.display(),
                    %error,
                    "discarding unreadable session file"
                );

                Ok((FxHashMap::default(), true))
            }
            Err(error) => Err(error),
        }
    }

    async fn save(&self, entries: &FxHashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&self.path, serde_json::to_vec_pretty(entries)?).await?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.read().await;

        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.write().await;

        let (mut entries, _) = self.load_for_write().await?;
        entries.insert(key.to_string(), value.to_string());

        self.save(&entries).await
    }

    async fn remove_all(&self, keys: &[&'static str]) -> Result<(), StorageError> {
        let _guard = self.lock.write().await;

        let (mut entries, discarded) = self.load_for_write().await?;
        let before = entries.len();

        for key in keys {
            entries.remove(*key);
        }

        if entries.len() == before && !discarded {
            return Ok(());
        }

        self.save(&entries).await
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn memory_store_round_trips_and_removes() -> TestResult {
        let store = MemoryKeyValueStore::new();

        store.set(TOKEN_KEY, "abc").await?;
        assert_eq!(store.get(TOKEN_KEY).await?.as_deref(), Some("abc"));

        store.remove_all(&[TOKEN_KEY, PROFILE_KEY]).await?;
        assert_eq!(store.get(TOKEN_KEY).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn file_store_reads_missing_file_as_empty() -> TestResult {
        let dir = TempDir::new()?;
        let store = FileKeyValueStore::new(dir.path().join("nested/session.json"));

        assert_eq!(store.get(TOKEN_KEY).await?, None);

        store.remove_all(&[TOKEN_KEY]).await?;

        assert!(!store.path().exists(), "removing nothing should not create the file");

        Ok(())
    }

    #[tokio::test]
    async fn file_store_persists_across_instances() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested/session.json");

        FileKeyValueStore::new(&path).set(TOKEN_KEY, "abc").await?;

        let reopened = FileKeyValueStore::new(&path);

        assert_eq!(reopened.get(TOKEN_KEY).await?.as_deref(), Some("abc"));

        reopened.remove_all(&[TOKEN_KEY, PROFILE_KEY]).await?;

        assert_eq!(FileKeyValueStore::new(&path).get(TOKEN_KEY).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn file_store_reports_corrupt_file() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"{not json")?;

        let result = FileKeyValueStore::new(&path).get(TOKEN_KEY).await;

        assert!(
            matches!(result, Err(StorageError::Json(_))),
            "expected Json error, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn file_store_writes_replace_a_corrupt_file() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"not json at all")?;

        let store = FileKeyValueStore::new(&path);
        store.set(TOKEN_KEY, "abc").await?;

        assert_eq!(store.get(TOKEN_KEY).await?.as_deref(), Some("abc"));

        Ok(())
    }

    #[tokio::test]
    async fn file_store_removal_clears_a_corrupt_file() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"{not json")?;

        let store = FileKeyValueStore::new(&path);
        store.remove_all(&[TOKEN_KEY, PROFILE_KEY]).await?;

        assert_eq!(store.get(TOKEN_KEY).await?, None);

        Ok(())
    }
}
