pub mod keys;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// String-keyed preference storage. The core persists a handful of opaque
/// values (see [`keys`]); everything else about the storage medium is the
/// implementation's business.
#[async_trait]
pub trait PreferenceStorage: Send + Sync + 'static {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

pub struct InMemoryPreferenceStorage {
    store: RwLock<HashMap<String, String>>,
}

impl InMemoryPreferenceStorage {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPreferenceStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PreferenceStorage for InMemoryPreferenceStorage {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let store = self.store.read().await;
        Ok(store.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut store = self.store.write().await;
        store.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed storage: one JSON object of key/value strings, rewritten in
/// full on every set. Reads are served from memory after the initial load.
pub struct JsonFilePreferenceStorage {
    path: PathBuf,
    store: RwLock<HashMap<String, String>>,
}

impl JsonFilePreferenceStorage {
    pub async fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let store = match tokio::fs::read_to_string(&path).await {
            Ok(text) => serde_json::from_str(&text)
                .with_context(|| format!("preference file {} is not valid JSON", path.display()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                return Err(err).with_context(|| format!("cannot read {}", path.display()));
            }
        };

        Ok(Self {
            path,
            store: RwLock::new(store),
        })
    }
}

#[async_trait]
impl PreferenceStorage for JsonFilePreferenceStorage {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let store = self.store.read().await;
        Ok(store.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut store = self.store.write().await;
        store.insert(key.to_string(), value.to_string());

        let text = serde_json::to_string_pretty(&*store)?;
        tokio::fs::write(&self.path, text)
            .await
            .with_context(|| format!("cannot write {}", self.path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    pub async fn in_memory_storage_should_return_what_was_set() {
        let storage = InMemoryPreferenceStorage::new();

        assert_eq!(storage.get(keys::PREFERRED_SCHEDULE).await.unwrap(), None);

        storage.set(keys::PREFERRED_SCHEDULE, "Monday").await.unwrap();
        assert_eq!(
            storage.get(keys::PREFERRED_SCHEDULE).await.unwrap(),
            Some("Monday".to_string())
        );
    }

    #[tokio::test]
    pub async fn set_should_overwrite_previous_value() {
        let storage = InMemoryPreferenceStorage::new();
        storage.set(keys::THEME, "light").await.unwrap();
        storage.set(keys::THEME, "dark").await.unwrap();

        assert_eq!(
            storage.get(keys::THEME).await.unwrap(),
            Some("dark".to_string())
        );
    }

    #[tokio::test]
    pub async fn file_storage_should_survive_reopen() {
        let path = temp_path("reopen");

        {
            let storage = JsonFilePreferenceStorage::open(&path).await.unwrap();
            storage.set(keys::DEFAULT_MINUTES_BEFORE, "5").await.unwrap();
            storage.set(keys::PREFERRED_SCHEDULE, "Monday").await.unwrap();
        }

        let reopened = JsonFilePreferenceStorage::open(&path).await.unwrap();
        assert_eq!(
            reopened.get(keys::DEFAULT_MINUTES_BEFORE).await.unwrap(),
            Some("5".to_string())
        );
        assert_eq!(
            reopened.get(keys::PREFERRED_SCHEDULE).await.unwrap(),
            Some("Monday".to_string())
        );

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    pub async fn missing_file_should_open_as_empty_storage() {
        let path = temp_path("missing");
        let storage = JsonFilePreferenceStorage::open(&path).await.unwrap();
        assert_eq!(storage.get(keys::THEME).await.unwrap(), None);
    }

    #[tokio::test]
    pub async fn corrupt_file_should_be_a_recoverable_error() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not json").unwrap();

        assert!(JsonFilePreferenceStorage::open(&path).await.is_err());

        let _ = std::fs::remove_file(&path);
    }

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "bellwatch-storage-test-{tag}-{}.json",
            std::process::id()
        ))
    }
}
