//! The [`PreferenceStore`] trait every storage backend implements.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{PlayerPreferences, RecordError};

/// Errors that can occur when reading or writing preferences
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] RecordError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Durable keyed storage for player preferences
///
/// A completed `upsert` or `remove` must be visible to every `get` and
/// `list_all` issued after it returns.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Fetch one record, `Ok(None)` if the player is unknown
    async fn get(&self, player_id: &str) -> Result<Option<PlayerPreferences>, StoreError>;

    /// Every stored record, ordered by `player_id`
    async fn list_all(&self) -> Result<Vec<PlayerPreferences>, StoreError>;

    /// Insert the record, or replace the one with the same `player_id`
    async fn upsert(&self, record: &PlayerPreferences) -> Result<(), StoreError>;

    /// Delete a record; `Ok(true)` if one existed
    async fn remove(&self, player_id: &str) -> Result<bool, StoreError>;

    /// Short name of the backend for logs and health output
    fn backend_name(&self) -> &'static str;

    /// Every record except the seeker's own
    async fn candidates_for(&self, seeker_id: &str) -> Result<Vec<PlayerPreferences>, StoreError> {
        let mut records = self.list_all().await?;
        records.retain(|record| record.player_id != seeker_id);
        Ok(records)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
