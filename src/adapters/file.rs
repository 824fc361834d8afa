use crate::domain::model::Record;
use crate::domain::ports::Store;
use crate::utils::error::StoreError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, PoisonError};
use tokio::sync::Mutex;

static NEXT_TMP_SUFFIX: AtomicU64 = AtomicU64::new(0);

/// One write lock per store file, shared by every instance in the process.
fn path_lock(path: &Path) -> Arc<Mutex<()>> {
    static LOCKS: OnceLock<std::sync::Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> = OnceLock::new();

    let key = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut locks = LOCKS
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    Arc::clone(locks.entry(key).or_default())
}

/// Keeps every record of one type in a single JSON object file, keyed by id.
///
/// The file is re-read on each fetch and rewritten on each insert. Writes go
/// to a sibling temp file first and are renamed into place, so readers never
/// see a partial document. A missing file is an empty store.
///
/// Instances opened on the same path inside one process share a write lock,
/// so their inserts never overwrite each other. Separate processes writing
/// the same file are not coordinated.
#[derive(Debug)]
pub struct JsonFileStore<R> {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
    _record: PhantomData<fn() -> R>,
}

impl<R> JsonFileStore<R>
where
    R: Record + Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            write_lock: path_lock(&path),
            path,
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, R>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, records: &BTreeMap<String, R>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let data = serde_json::to_vec_pretty(records)?;
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "store".to_string());
        let tmp_path = self.path.with_file_name(format!(
            ".{}.{}.{}.tmp",
            file_name,
            std::process::id(),
            NEXT_TMP_SUFFIX.fetch_add(1, Ordering::Relaxed)
        ));
        tokio::fs::write(&tmp_path, data).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl<R> Store<R> for JsonFileStore<R>
where
    R: Record + Serialize + DeserializeOwned,
{
    async fn insert(&self, record: R) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await?;
        records.insert(record.record_id().to_string(), record);
        self.save(&records).await?;

        tracing::debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    async fn fetch(&self, id: &str, out: &mut R) -> Result<(), StoreError> {
        let mut records = self.load().await?;
        *out = records.remove(id).ok_or_else(|| StoreError::not_found(id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::User;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let store: JsonFileStore<User> = JsonFileStore::new(temp_dir.path().join("users.json"));

        let mut out = User::default();
        let err = store.fetch("1", &mut out).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(out, User::default());
    }

    #[tokio::test]
    async fn test_insert_creates_parent_dirs_and_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("users.json");

        let store: JsonFileStore<User> = JsonFileStore::new(&path);
        store.insert(User::new("1", "a@example.com")).await.unwrap();
        assert!(path.exists());

        let reopened: JsonFileStore<User> = JsonFileStore::new(&path);
        let mut out = User::default();
        reopened.fetch("1", &mut out).await.unwrap();
        assert_eq!(out, User::new("1", "a@example.com"));
    }

    #[tokio::test]
    async fn test_file_layout_is_object_keyed_by_id() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users.json");
        let store: JsonFileStore<User> = JsonFileStore::new(&path);

        store.insert(User::new("b", "b@example.com")).await.unwrap();
        store.insert(User::new("a", "a@example.com")).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["a"]["email"], "a@example.com");
        assert_eq!(raw["b"]["id"], "b");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_instances_on_same_path_keep_every_insert() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users.json");
        let first: Arc<JsonFileStore<User>> = Arc::new(JsonFileStore::new(&path));
        let second: Arc<JsonFileStore<User>> = Arc::new(JsonFileStore::new(&path));

        let mut handles = Vec::new();
        for i in 0..20 {
            let store = if i % 2 == 0 {
                Arc::clone(&first)
            } else {
                Arc::clone(&second)
            };
            handles.push(tokio::spawn(async move {
                store
                    .insert(User::new(i.to_string(), format!("{}@example.com", i)))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let raw: serde_json::Map<String, serde_json::Value> =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw.len(), 20);

        let leftovers: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users.json");
        std::fs::write(&path, b"not json").unwrap();

        let store: JsonFileStore<User> = JsonFileStore::new(&path);
        let mut out = User::default();
        let err = store.fetch("1", &mut out).await.unwrap_err();

        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
