use async_trait::async_trait;
use inkbound_core::{MediaAsset, MediaStore, MediaStoreError};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

const MEDIA_AUTH_HEADER: &str = "X-Api-Key";

/// Client for the media host: store bytes, get back a URL and an asset id
/// usable for later deletion.
#[derive(Clone)]
pub struct HttpMediaClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
}

impl HttpMediaClient {
    pub fn new(base_url: String, api_key: Secret<String>, http_client: Client) -> Self {
        Self {
            http_client,
            base_url,
            api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
    asset_id: String,
}

#[async_trait]
impl MediaStore for HttpMediaClient {
    #[tracing::instrument(name = "Uploading media asset", skip_all)]
    async fn upload(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<MediaAsset, MediaStoreError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?;
        let url = base
            .join("/assets")
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?;

        let part = Part::bytes(bytes)
            .file_name("upload")
            .mime_str(content_type)
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?;
        let form = Form::new().part("file", part);

        let response = self
            .http_client
            .post(url)
            .header(MEDIA_AUTH_HEADER, self.api_key.expose_secret())
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?
            .json::<UploadResponse>()
            .await
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?;

        Ok(MediaAsset {
            url: response.url,
            asset_id: response.asset_id,
        })
    }

    #[tracing::instrument(name = "Deleting media asset", skip_all, fields(asset_id = %asset_id))]
    async fn delete(&self, asset_id: &str) -> Result<(), MediaStoreError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| MediaStoreError::DeleteFailed(e.to_string()))?;
        let url = base
            .join(&format!("/assets/{asset_id}"))
            .map_err(|e| MediaStoreError::DeleteFailed(e.to_string()))?;

        self.http_client
            .delete(url)
            .header(MEDIA_AUTH_HEADER, self.api_key.expose_secret())
            .send()
            .await
            .map_err(|e| MediaStoreError::DeleteFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| MediaStoreError::DeleteFailed(e.to_string()))?;

        Ok(())
    }

    fn asset_id_for_url(&self, url: &str) -> Option<String> {
        let base = Url::parse(&self.base_url).ok()?;
        let url = Url::parse(url).ok()?;
        if url.host_str() != base.host_str() {
            return None;
        }

        let segment = url.path_segments()?.next_back()?;
        let asset_id = segment.split('.').next().unwrap_or(segment);
        if asset_id.is_empty() {
            return None;
        }
        Some(asset_id.to_string())
    }
}
