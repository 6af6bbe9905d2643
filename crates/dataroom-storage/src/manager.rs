//! Storage manager — owns the active provider and the path layout.

use std::sync::Arc;

use uuid::Uuid;

use dataroom_core::config::storage::StorageConfig;
use dataroom_core::result::AppResult;
use dataroom_core::traits::storage::StorageProvider;

use crate::providers::LocalStorageProvider;

/// Owns the configured storage provider and the room content path layout.
#[derive(Debug, Clone)]
pub struct StorageManager {
    provider: Arc<dyn StorageProvider>,
}

impl StorageManager {
    /// Initialize the manager from configuration.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let provider = LocalStorageProvider::new(&config.local.root_path).await?;
        Ok(Self {
            provider: Arc::new(provider),
        })
    }

    /// Construct a manager around an existing provider (used by tests).
    pub fn with_provider(provider: Arc<dyn StorageProvider>) -> Self {
        Self { provider }
    }

    /// The active provider.
    pub fn provider(&self) -> &Arc<dyn StorageProvider> {
        &self.provider
    }

    /// Storage path for a freshly uploaded file object.
    ///
    /// Each upload gets its own object key, so version history can keep
    /// pointing at superseded content.
    pub fn object_path(&self, room_id: Uuid, file_id: Uuid, version: i32) -> String {
        format!("rooms/{room_id}/{file_id}/v{version}")
    }

    /// Check provider health.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.provider.health_check().await
    }
}
