use crate::domain::ports::{MediaHost, Notifier};
use crate::domain::submission::{BinaryAsset, NotificationPayload, UploadReceipt};
use crate::error::{DispatchError, UploadError};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// An in-memory stand-in for the media host.
///
/// Records every uploaded asset and hands back a synthetic URL. Used by
/// the dry-run shell and as a substitute collaborator in tests; the
/// failing variant rejects every upload.
#[derive(Default, Clone)]
pub struct InMemoryMediaHost {
    uploads: Arc<RwLock<Vec<BinaryAsset>>>,
    fail: bool,
}

impl InMemoryMediaHost {
    /// Creates a stand-in that accepts every upload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stand-in that rejects every upload.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn upload_count(&self) -> usize {
        self.uploads.read().await.len()
    }
}

#[async_trait]
impl MediaHost for InMemoryMediaHost {
    async fn upload(&self, asset: &BinaryAsset) -> Result<UploadReceipt, UploadError> {
        if self.fail {
            return Err(UploadError::Rejected(500));
        }
        let mut uploads = self.uploads.write().await;
        uploads.push(asset.clone());
        Ok(UploadReceipt {
            remote_url: format!("memory://upload/{}", uploads.len()),
        })
    }
}

/// An in-memory stand-in for the notification relay.
///
/// Records every dispatched payload instead of sending anything.
#[derive(Default, Clone)]
pub struct InMemoryNotifier {
    dispatched: Arc<RwLock<Vec<NotificationPayload>>>,
    fail: bool,
}

impl InMemoryNotifier {
    /// Creates a stand-in that accepts every payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stand-in that rejects every payload.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn sent(&self) -> Vec<NotificationPayload> {
        self.dispatched.read().await.clone()
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn dispatch(&self, payload: &NotificationPayload) -> Result<(), DispatchError> {
        if self.fail {
            return Err(DispatchError::Rejected(500));
        }
        self.dispatched.write().await.push(payload.clone());
        Ok(())
    }
}
