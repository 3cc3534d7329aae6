use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;

use super::{AssetStore, StoredAsset};

/// Filesystem storage under the uploads directory, served statically at
/// `/uploads`. Deletion is a no-op: local deployments accept unbounded
/// uploads growth in exchange for zero external dependencies.
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: PathBuf) -> Result<Self, String> {
        std::fs::create_dir_all(&dir)
            .map_err(|e| format!("Cannot create upload dir {}: {e}", dir.display()))?;
        Ok(Self { dir })
    }
}

fn sanitize(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[async_trait]
impl AssetStore for LocalStore {
    async fn store(&self, bytes: Bytes, filename: &str) -> Result<StoredAsset, String> {
        let name = format!("{}-{}", Utc::now().timestamp_millis(), sanitize(filename));
        let path = self.dir.join(&name);

        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;

        Ok(StoredAsset {
            url: format!("/uploads/{name}"),
            deletion_handle: None,
        })
    }

    async fn purge(&self, _handle: &str) -> Result<(), String> {
        Ok(())
    }
}
