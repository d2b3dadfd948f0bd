use crate::models::{Product, SavedProduct, StoreData};
use chrono::Utc;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error;
use tokio::{fs, sync::Mutex, task::JoinError};
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("store write did not complete: {0}")]
    Task(#[from] JoinError),
}

/// Name-keyed product records kept in a JSON file.
///
/// Every upsert rewrites the whole file through a temp file and a rename.
/// Concurrent upserts to the same name resolve to whichever finishes last.
#[derive(Clone)]
pub struct ProductStore {
    path: PathBuf,
    data: Arc<Mutex<StoreData>>,
}

impl ProductStore {
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = load_data(&path).await;
        info!(
            "opened product store at {} ({} records)",
            path.display(),
            data.products.len()
        );
        Self {
            path,
            data: Arc::new(Mutex::new(data)),
        }
    }

    /// Makes sure the backing directory exists.
    pub async fn ensure_connected(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Replaces the record named `product.name`, or inserts it, and returns
    /// what was written.
    ///
    /// The write runs on its own task holding the lock, so it finishes even
    /// if the caller is dropped. Memory only changes once the file is in place.
    pub async fn upsert_by_name(&self, product: Product) -> Result<SavedProduct, StoreError> {
        let saved = SavedProduct {
            product,
            updated_at: Utc::now().to_rfc3339(),
        };

        let data = Arc::clone(&self.data);
        let path = self.path.clone();
        let record = saved.clone();
        tokio::spawn(async move {
            let mut guard = data.lock_owned().await;
            let mut next = (*guard).clone();
            next.products.insert(record.product.name.clone(), record);
            persist_data(&path, &next).await?;
            *guard = next;
            Ok::<_, StoreError>(())
        })
        .await??;

        Ok(saved)
    }

    /// Blocks every other store operation until the guard drops.
    #[cfg(test)]
    pub(crate) async fn hold(&self) -> tokio::sync::MutexGuard<'_, StoreData> {
        self.data.lock().await
    }

    pub async fn all(&self) -> Vec<SavedProduct> {
        self.data.lock().await.products.values().cloned().collect()
    }
}

pub async fn load_data(path: &Path) -> StoreData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse store file: {err}");
                StoreData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoreData::default(),
        Err(err) => {
            error!("failed to read store file: {err}");
            StoreData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &StoreData) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(data)?;
    let staging = staging_path(path);
    fs::write(&staging, payload).await?;
    if let Err(err) = fs::rename(&staging, path).await {
        let _ = fs::remove_file(&staging).await;
        return Err(err.into());
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
pub(crate) fn temp_store_path(label: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("product_tally_{label}_{}_{nanos}", std::process::id()));
    path.push("products.json");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upsert_inserts_then_replaces() {
        let store = ProductStore::open(temp_store_path("replace")).await;
        store.ensure_connected().await.unwrap();

        store.upsert_by_name(Product::new("A", 3, false)).await.unwrap();
        let saved = store.upsert_by_name(Product::new("A", 9, true)).await.unwrap();
        assert_eq!(saved.product, Product::new("A", 9, true));

        let all = store.all().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].product, Product::new("A", 9, true));
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let path = temp_store_path("reopen");
        let store = ProductStore::open(path.clone()).await;
        store.ensure_connected().await.unwrap();
        store.upsert_by_name(Product::new("B", 2, true)).await.unwrap();

        let reopened = ProductStore::open(path).await;
        let all = reopened.all().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].product.name, "B");
    }

    #[tokio::test]
    async fn failed_write_leaves_memory_untouched() {
        // No ensure_connected, so the parent directory is missing.
        let store = ProductStore::open(temp_store_path("missing_dir")).await;
        let err = store.upsert_by_name(Product::new("C", 1, false)).await;
        assert!(matches!(err, Err(StoreError::Io(_))));
        assert!(store.all().await.is_empty());
    }

    #[tokio::test]
    async fn write_finishes_after_caller_gives_up() {
        let path = temp_store_path("detached");
        let store = ProductStore::open(path.clone()).await;
        store.ensure_connected().await.unwrap();

        let held = store.hold().await;
        let pending = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            store.upsert_by_name(Product::new("D", 4, false)),
        )
        .await;
        assert!(pending.is_err());
        drop(held);

        // The lock is fair, so this waits behind the detached write.
        let all = store.all().await;
        assert_eq!(all.len(), 1);

        let reopened = ProductStore::open(path.clone()).await;
        assert_eq!(reopened.all().await, all);
        assert!(!staging_path(&path).exists());
    }

    #[tokio::test]
    async fn unreadable_file_starts_empty() {
        let path = temp_store_path("garbage");
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(&path, b"not json").await.unwrap();
        let store = ProductStore::open(path).await;
        assert!(store.all().await.is_empty());
    }
}
