use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::error;

/// One record collection persisted as a single JSON array file.
///
/// Every read loads the whole file and every write replaces it, so each
/// request pays full (de)serialization cost proportional to collection size.
/// Mutations go through [`Collection::update`], which serializes the
/// read-modify-write cycle per collection behind a mutex.
pub struct Collection<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> Collection<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    /// Load all records. A missing file is seeded with an empty collection;
    /// any other read or parse failure is logged and degraded to empty
    /// rather than failing the request.
    pub async fn load(&self) -> Vec<T> {
        self.read_records().await
    }

    /// Replace the whole backing collection.
    pub async fn save(&self, records: &[T]) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.write_records(records).await
    }

    /// Serialized read-modify-write: loads the collection, runs `f` on it,
    /// and writes the result back, all under the per-collection lock so two
    /// concurrent mutations cannot drop each other's changes.
    pub async fn update<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Vec<T>) -> R,
    {
        let _guard = self.lock.lock().await;
        let mut records = self.read_records().await;
        let out = f(&mut records);
        self.write_records(&records).await?;
        Ok(out)
    }

    async fn read_records(&self) -> Vec<T> {
        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(records) => records,
                Err(e) => {
                    error!("Corrupt collection {}: {}", self.path.display(), e);
                    Vec::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // First access: seed the file so later saves have a home.
                if let Err(e) = fs::write(&self.path, b"[]").await {
                    error!("Failed to seed collection {}: {}", self.path.display(), e);
                }
                Vec::new()
            }
            Err(e) => {
                error!("Failed to read collection {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    async fn write_records(&self, records: &[T]) -> Result<()> {
        let json = serde_json::to_vec_pretty(records)?;
        // Write-then-rename so readers never observe a half-written file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
