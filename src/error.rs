use thiserror::Error;

pub type Result<T, E = DeskError> = std::result::Result<T, E>;

/// Failures at the media host seam.
///
/// Any non-success response is one failure class as far as the pipeline
/// is concerned; the variants exist for diagnostic logging only.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("media host unreachable: {0}")]
    Unreachable(String),
    #[error("media host rejected the upload (status {0})")]
    Rejected(u16),
    #[error("malformed media host response: {0}")]
    MalformedResponse(String),
    #[error("unusable attachment: {0}")]
    BadAsset(String),
}

/// Failures at the notification relay seam.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("notifier unreachable: {0}")]
    Unreachable(String),
    #[error("notifier rejected the payload (status {0})")]
    Rejected(u16),
}

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
