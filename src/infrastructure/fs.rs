use crate::domain::ports::AttachmentSource;
use crate::domain::submission::BinaryAsset;
use crate::error::Result;
use std::path::PathBuf;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Yields the attachment for a submission from an optional file path.
///
/// Lazy and restartable: nothing is read until `select` is called, and
/// every call re-reads the file. The mime type is sniffed from the
/// content rather than trusted from the file name.
pub struct FileAttachmentSource {
    path: Option<PathBuf>,
}

impl FileAttachmentSource {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl AttachmentSource for FileAttachmentSource {
    fn select(&self) -> Result<Option<BinaryAsset>> {
        let Some(path) = &self.path else {
            return Ok(None);
        };

        let bytes = std::fs::read(path)?;
        let mime_type = infer::get(&bytes)
            .map(|kind| kind.mime_type().to_string())
            .unwrap_or_else(|| FALLBACK_MIME.to_string());

        Ok(Some(BinaryAsset::new(bytes, mime_type)))
    }
}
