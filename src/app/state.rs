use std::sync::Arc;

use crate::adapter::SqliteHeadlineStore;
use crate::config::Settings;
use crate::error::LabelerError;
use crate::port::HeadlineStore;

/// Shared application state holding the headline store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn HeadlineStore>,
}

impl AppState {
    /// Create `AppState` from configuration settings.
    ///
    /// Opens the SQLite pool and creates the schema if this is a fresh
    /// database file.
    pub async fn from_settings(settings: &Settings) -> Result<Self, LabelerError> {
        let store = SqliteHeadlineStore::connect(&settings.database_url).await?;
        Ok(Self {
            store: Arc::new(store),
        })
    }
}
