use crate::domain::ports::{MediaHostBox, NotifierBox};
use crate::domain::submission::{
    FailureReason, NotificationPayload, PipelineState, SubmissionRequest,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

/// The main entry point for handling submissions.
///
/// `SubmissionPipeline` sequences an optional attachment upload with a
/// notification dispatch. It owns the run state and the in-flight flag;
/// callers read both to render progress and to gate re-entry, but never
/// write them. The pipeline does not serialize concurrent `execute`
/// calls itself — at most one run may be active per instance, and the
/// caller enforces that by checking `is_busy` first.
pub struct SubmissionPipeline {
    media_host: MediaHostBox,
    notifier: NotifierBox,
    in_flight: Arc<AtomicBool>,
    state: watch::Sender<PipelineState>,
}

/// Clears the in-flight flag when dropped, so the flag is released on
/// every exit path, a panicking collaborator included.
struct BusyGuard(Arc<AtomicBool>);

impl BusyGuard {
    fn engage(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(Arc::clone(flag))
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl SubmissionPipeline {
    /// Creates a new `SubmissionPipeline` instance.
    ///
    /// # Arguments
    ///
    /// * `media_host` - The collaborator attachments are uploaded to.
    /// * `notifier` - The collaborator the notification is dispatched to.
    pub fn new(media_host: MediaHostBox, notifier: NotifierBox) -> Self {
        let (state, _) = watch::channel(PipelineState::Idle);
        Self {
            media_host,
            notifier,
            in_flight: Arc::new(AtomicBool::new(false)),
            state,
        }
    }

    /// Whether a run is currently between invocation and its terminal
    /// state. Callers must not invoke `execute` while this is true.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// The current run state.
    pub fn state(&self) -> PipelineState {
        *self.state.borrow()
    }

    /// A receiver over state transitions, for rendering intermediate
    /// progress while a run is in flight.
    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state.subscribe()
    }

    /// Runs one submission to its terminal state.
    ///
    /// Consumes the request, so the attachment bytes are dropped once
    /// the run ends. Returns the terminal state; the same value is
    /// published on the watch channel. Failures are normalized to a
    /// coarse [`FailureReason`] — the underlying collaborator error is
    /// only logged.
    pub async fn execute(&self, request: SubmissionRequest) -> PipelineState {
        let _busy = BusyGuard::engage(&self.in_flight);

        let terminal = match self.run(request).await {
            Ok(()) => PipelineState::Succeeded,
            Err(reason) => PipelineState::Failed(reason),
        };
        self.state.send_replace(terminal);
        terminal
    }

    async fn run(&self, request: SubmissionRequest) -> Result<(), FailureReason> {
        // No attachment is not a failure; the payload carries "".
        let remote_url = match &request.attachment {
            Some(asset) => {
                self.state.send_replace(PipelineState::Uploading);
                match self.media_host.upload(asset).await {
                    Ok(receipt) => receipt.remote_url,
                    Err(err) => {
                        tracing::warn!(error = %err, "attachment upload failed");
                        return Err(FailureReason::UploadFailed);
                    }
                }
            }
            None => String::new(),
        };

        self.state.send_replace(PipelineState::Dispatching);
        let payload = NotificationPayload {
            recipient: request.recipient_label,
            sender_name: request.sender_name,
            sender_email: request.sender_email,
            message: request.message,
            remote_url,
            submitted_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };

        match self.notifier.dispatch(&payload).await {
            Ok(()) => {
                tracing::debug!(recipient = %payload.recipient, "notification dispatched");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "notification dispatch failed");
                Err(FailureReason::SendFailed)
            }
        }
    }
}
