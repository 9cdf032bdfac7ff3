use crate::domain::ports::MediaHost;
use crate::domain::submission::{BinaryAsset, UploadReceipt};
use crate::error::UploadError;
use async_trait::async_trait;
use serde::Deserialize;

const MEDIA_HOST_BASE_URL: &str = "https://api.cloudinary.com/v1_1";

/// Media host upload client.
///
/// Sends the asset as an authenticated multipart transfer to
/// `<base>/<namespace>/image/upload` and reads the stored URL from the
/// JSON response. Any non-success status is a single failure class; no
/// structured error body is consumed. The client deliberately carries
/// no request timeout — a non-responding host stalls the caller.
pub struct HttpMediaHost {
    http_client: reqwest::Client,
    base_url: String,
    namespace: String,
    preset: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl HttpMediaHost {
    pub fn new(
        namespace: impl Into<String>,
        preset: impl Into<String>,
    ) -> Result<Self, UploadError> {
        Self::with_base_url(MEDIA_HOST_BASE_URL, namespace, preset)
    }

    /// Same client against a different endpoint; used to point tests at
    /// a local stand-in server.
    pub fn with_base_url(
        base_url: impl Into<String>,
        namespace: impl Into<String>,
        preset: impl Into<String>,
    ) -> Result<Self, UploadError> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| UploadError::Unreachable(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            namespace: namespace.into(),
            preset: preset.into(),
        })
    }
}

#[async_trait]
impl MediaHost for HttpMediaHost {
    async fn upload(&self, asset: &BinaryAsset) -> Result<UploadReceipt, UploadError> {
        let part = reqwest::multipart::Part::bytes(asset.bytes.clone())
            .file_name("attachment")
            .mime_str(&asset.mime_type)
            .map_err(|e| UploadError::BadAsset(e.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.preset.clone());

        let url = format!("{}/{}/image/upload", self.base_url, self.namespace);
        tracing::debug!(mime_type = %asset.mime_type, bytes = asset.bytes.len(), "uploading attachment");

        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Rejected(status.as_u16()));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| UploadError::MalformedResponse(e.to_string()))?;

        tracing::info!(remote_url = %body.secure_url, "attachment uploaded");
        Ok(UploadReceipt {
            remote_url: body.secure_url,
        })
    }
}
