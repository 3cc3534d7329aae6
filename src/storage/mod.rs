pub mod cloud;
pub mod local;

use async_trait::async_trait;
use bytes::Bytes;

pub use cloud::CloudStore;
pub use local::LocalStore;

#[derive(Debug, Clone)]
pub struct StoredAsset {
    /// URL the asset can be fetched from afterwards.
    pub url: String,
    /// Handle usable for later deletion. Absent for backends that
    /// cannot delete (local files keep no handle on purpose).
    pub deletion_handle: Option<String>,
}

/// Where uploaded binaries live. Chosen once at startup from config,
/// never per request.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn store(&self, bytes: Bytes, filename: &str) -> Result<StoredAsset, String>;

    /// Remove a previously stored asset. Callers that cannot tolerate
    /// failure should go through [`purge_best_effort`] instead.
    async fn purge(&self, handle: &str) -> Result<(), String>;
}

/// Try to purge, log on failure, continue. Record deletion must never
/// block on asset cleanup; an orphaned asset beats inconsistent
/// metadata.
pub async fn purge_best_effort(store: &dyn AssetStore, handle: Option<&str>) {
    let Some(handle) = handle else {
        return;
    };
    if let Err(e) = store.purge(handle).await {
        tracing::warn!("Asset purge failed for handle {handle}: {e}");
    }
}
