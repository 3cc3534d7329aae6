use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;

use super::{AssetStore, StoredAsset};
use crate::config::AssetHostConfig;

/// Remote asset host. Upload is a multipart POST; the host answers with
/// a public URL and an opaque id usable for later deletion.
pub struct CloudStore {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
    public_id: String,
}

impl CloudStore {
    pub fn new(config: &AssetHostConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }
}

#[async_trait]
impl AssetStore for CloudStore {
    async fn store(&self, bytes: Bytes, filename: &str) -> Result<StoredAsset, String> {
        let part = reqwest::multipart::Part::bytes(bytes.to_vec())
            .file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self
            .client
            .post(format!("{}/upload", self.base_url))
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| format!("Asset host unreachable: {e}"))?;

        if !resp.status().is_success() {
            return Err(format!("Asset host returned {}", resp.status()));
        }

        let body: UploadResponse = resp
            .json()
            .await
            .map_err(|e| format!("Invalid asset host response: {e}"))?;

        Ok(StoredAsset {
            url: body.url,
            deletion_handle: Some(body.public_id),
        })
    }

    async fn purge(&self, handle: &str) -> Result<(), String> {
        let resp = self
            .client
            .delete(format!("{}/assets/{handle}", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| format!("Asset host unreachable: {e}"))?;

        if !resp.status().is_success() {
            return Err(format!("Asset host returned {}", resp.status()));
        }
        Ok(())
    }
}
