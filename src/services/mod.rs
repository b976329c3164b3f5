// Service exports
pub mod file;
pub mod postgres;
pub mod store;

pub use file::JsonFileStore;
pub use postgres::PostgresStore;
pub use store::{PreferenceStore, StoreError};

use crate::config::{StorageBackend, StorageSettings};
use std::sync::Arc;

/// Open the preference store selected by configuration
pub async fn connect_store(settings: &StorageSettings) -> Result<Arc<dyn PreferenceStore>, StoreError> {
    match settings.backend {
        StorageBackend::File => {
            tracing::info!("Using JSON file store at {}", settings.path.display());
            Ok(Arc::new(JsonFileStore::new(settings.path.clone())))
        }
        StorageBackend::Postgres => {
            let url = settings.database_url.as_deref().ok_or_else(|| {
                StoreError::Configuration("storage.database_url is required for the postgres backend".to_string())
            })?;
            let store = PostgresStore::from_settings(
                url,
                settings.max_connections,
                settings.min_connections,
                settings.acquire_timeout_secs,
                settings.idle_timeout_secs,
            )
            .await?;
            Ok(Arc::new(store))
        }
    }
}
