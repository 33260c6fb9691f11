use std::sync::Arc;
use tokio::sync::RwLock;

use async_trait::async_trait;
use inkbound_core::{MediaAsset, MediaStore, MediaStoreError};
use uuid::Uuid;

const MOCK_BASE: &str = "https://media.test/inkbound/";

/// In-memory media host for tests and local development. Remembers which
/// asset ids are live so cleanup behaviour is observable.
#[derive(Debug, Clone, Default)]
pub struct MockMediaStore {
    assets: Arc<RwLock<Vec<String>>>,
}

impl MockMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn live_assets(&self) -> Vec<String> {
        self.assets.read().await.clone()
    }
}

#[async_trait]
impl MediaStore for MockMediaStore {
    async fn upload(
        &self,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<MediaAsset, MediaStoreError> {
        let asset_id = Uuid::new_v4().to_string();
        self.assets.write().await.push(asset_id.clone());
        Ok(MediaAsset {
            url: format!("{MOCK_BASE}{asset_id}.png"),
            asset_id,
        })
    }

    async fn delete(&self, asset_id: &str) -> Result<(), MediaStoreError> {
        self.assets.write().await.retain(|id| id != asset_id);
        Ok(())
    }

    fn asset_id_for_url(&self, url: &str) -> Option<String> {
        let rest = url.strip_prefix(MOCK_BASE)?;
        let asset_id = rest.split('.').next().unwrap_or(rest);
        if asset_id.is_empty() {
            return None;
        }
        Some(asset_id.to_string())
    }
}
