use serde::Serialize;
use std::fmt;

/// An opaque attached file (e.g. a payment screenshot).
///
/// Owned by the pending request and dropped with it once the pipeline
/// reaches a terminal state; nothing retains the bytes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryAsset {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl BinaryAsset {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }
}

/// One submit action. Constructed fresh per submission and consumed by
/// the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub sender_name: String,
    pub sender_email: String,
    pub message: String,
    pub attachment: Option<BinaryAsset>,
    /// Fixed destination label, supplied by the caller's configuration.
    pub recipient_label: String,
}

impl SubmissionRequest {
    pub fn new(
        sender_name: impl Into<String>,
        sender_email: impl Into<String>,
        message: impl Into<String>,
        attachment: Option<BinaryAsset>,
        recipient_label: impl Into<String>,
    ) -> Self {
        Self {
            sender_name: sender_name.into(),
            sender_email: sender_email.into(),
            message: message.into(),
            attachment,
            recipient_label: recipient_label.into(),
        }
    }
}

/// Successful upload outcome: where the media host stored the asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub remote_url: String,
}

/// The field set substituted into the relay's message template.
///
/// Serializes with the template parameter names the relay expects;
/// `remote_url` is the empty string, never absent, when the submission
/// carried no attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    #[serde(rename = "to_name")]
    pub recipient: String,
    #[serde(rename = "from_name")]
    pub sender_name: String,
    #[serde(rename = "email")]
    pub sender_email: String,
    pub message: String,
    #[serde(rename = "image_url")]
    pub remote_url: String,
    #[serde(rename = "timestamp")]
    pub submitted_at: String,
}

/// Why a run failed, as surfaced to the caller.
///
/// Deliberately coarse: the underlying cause is logged, not reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    UploadFailed,
    SendFailed,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UploadFailed => write!(f, "upload failed"),
            Self::SendFailed => write!(f, "send failed"),
        }
    }
}

/// Lifecycle of one submission run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    #[default]
    Idle,
    Uploading,
    Dispatching,
    Succeeded,
    Failed(FailureReason),
}

impl PipelineState {
    /// Terminal states admit no further transition for the run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed(_))
    }
}
