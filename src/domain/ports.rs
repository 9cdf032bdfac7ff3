use super::submission::{BinaryAsset, NotificationPayload, UploadReceipt};
use crate::error::{DispatchError, Result, UploadError};
use async_trait::async_trait;

/// External media-hosting service the pipeline uploads attachments to.
#[async_trait]
pub trait MediaHost: Send + Sync {
    async fn upload(&self, asset: &BinaryAsset) -> Result<UploadReceipt, UploadError>;
}

/// External transactional-notification relay.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn dispatch(&self, payload: &NotificationPayload) -> Result<(), DispatchError>;
}

/// Capability that yields the attachment for a submission, if any.
///
/// Restartable: every call re-evaluates the source, so a caller can
/// select again for the next submission.
pub trait AttachmentSource: Send + Sync {
    fn select(&self) -> Result<Option<BinaryAsset>>;
}

pub type MediaHostBox = Box<dyn MediaHost>;
pub type NotifierBox = Box<dyn Notifier>;
pub type AttachmentSourceBox = Box<dyn AttachmentSource>;
