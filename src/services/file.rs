use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::models::PlayerPreferences;
use crate::services::store::{PreferenceStore, StoreError};

/// Preference store backed by a single JSON file
///
/// The file holds a pretty-printed array of records sorted by `player_id`.
/// A missing file reads as an empty store. Writes land in a sibling temp file
/// that is renamed over the original.
pub struct JsonFileStore {
    path: PathBuf,
    // serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load_all(&self) -> Result<Vec<PlayerPreferences>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let mut records: Vec<PlayerPreferences> = serde_json::from_slice(&bytes)?;
        records.sort_by(|a, b| a.player_id.cmp(&b.player_id));
        Ok(records)
    }

    async fn save_all(&self, mut records: Vec<PlayerPreferences>) -> Result<(), StoreError> {
        records.sort_by(|a, b| a.player_id.cmp(&b.player_id));
        let json = serde_json::to_vec_pretty(&records)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp_path = self.path.clone().into_os_string();
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);

        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        tracing::debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for JsonFileStore {
    async fn get(&self, player_id: &str) -> Result<Option<PlayerPreferences>, StoreError> {
        Ok(self
            .load_all()
            .await?
            .into_iter()
            .find(|record| record.player_id == player_id))
    }

    async fn list_all(&self) -> Result<Vec<PlayerPreferences>, StoreError> {
        self.load_all().await
    }

    async fn upsert(&self, record: &PlayerPreferences) -> Result<(), StoreError> {
        record.ensure_valid()?;
        let _guard = self.write_lock.lock().await;

        let mut records = self.load_all().await?;
        match records.iter_mut().find(|r| r.player_id == record.player_id) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }

        self.save_all(records).await?;
        tracing::info!("Stored preferences for {}", record.player_id);
        Ok(())
    }

    async fn remove(&self, player_id: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;

        let records = self.load_all().await?;
        let before = records.len();
        let remaining: Vec<PlayerPreferences> = records
            .into_iter()
            .filter(|record| record.player_id != player_id)
            .collect();

        if remaining.len() == before {
            return Ok(false);
        }

        self.save_all(remaining).await?;
        tracing::info!("Removed preferences for {}", player_id);
        Ok(true)
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        self.load_all().await.map(|_| true)
    }
}
