use async_trait::async_trait;
use fxdesk::application::pipeline::SubmissionPipeline;
use fxdesk::domain::ports::{MediaHost, Notifier};
use fxdesk::domain::submission::{
    BinaryAsset, FailureReason, NotificationPayload, PipelineState, SubmissionRequest,
    UploadReceipt,
};
use fxdesk::error::{DispatchError, UploadError};
use fxdesk::infrastructure::in_memory::{InMemoryMediaHost, InMemoryNotifier};
use std::sync::Arc;
use tokio::sync::{Mutex, oneshot};

fn request(attachment: Option<BinaryAsset>) -> SubmissionRequest {
    SubmissionRequest::new(
        "Alice",
        "alice@example.com",
        "payment sent",
        attachment,
        "DESK OPERATOR",
    )
}

fn asset() -> BinaryAsset {
    BinaryAsset::new(vec![0xff, 0xd8, 0xff], "image/jpeg")
}

/// A notifier that blocks until the test releases it, so the test can
/// observe the pipeline mid-flight.
struct GatedNotifier {
    release: Mutex<Option<oneshot::Receiver<()>>>,
}

impl GatedNotifier {
    fn new(release: oneshot::Receiver<()>) -> Self {
        Self {
            release: Mutex::new(Some(release)),
        }
    }
}

#[async_trait]
impl Notifier for GatedNotifier {
    async fn dispatch(&self, _payload: &NotificationPayload) -> Result<(), DispatchError> {
        if let Some(gate) = self.release.lock().await.take() {
            let _ = gate.await;
        }
        Ok(())
    }
}

/// A media host that blocks until released.
struct GatedMediaHost {
    release: Mutex<Option<oneshot::Receiver<()>>>,
}

impl GatedMediaHost {
    fn new(release: oneshot::Receiver<()>) -> Self {
        Self {
            release: Mutex::new(Some(release)),
        }
    }
}

#[async_trait]
impl MediaHost for GatedMediaHost {
    async fn upload(&self, _asset: &BinaryAsset) -> Result<UploadReceipt, UploadError> {
        if let Some(gate) = self.release.lock().await.take() {
            let _ = gate.await;
        }
        Ok(UploadReceipt {
            remote_url: "https://media.example/gated.jpg".to_string(),
        })
    }
}

#[tokio::test]
async fn test_run_without_attachment_reaches_succeeded() {
    let pipeline = SubmissionPipeline::new(
        Box::new(InMemoryMediaHost::new()),
        Box::new(InMemoryNotifier::new()),
    );

    assert_eq!(pipeline.state(), PipelineState::Idle);
    let terminal = pipeline.execute(request(None)).await;

    assert_eq!(terminal, PipelineState::Succeeded);
    assert!(terminal.is_terminal());
    assert_eq!(pipeline.state(), terminal);
    assert!(!pipeline.is_busy());
}

#[tokio::test]
async fn test_busy_spans_dispatch_until_terminal() {
    let (release, gate) = oneshot::channel();
    let pipeline = Arc::new(SubmissionPipeline::new(
        Box::new(InMemoryMediaHost::new()),
        Box::new(GatedNotifier::new(gate)),
    ));
    assert!(!pipeline.is_busy());

    let mut states = pipeline.subscribe();
    let runner = {
        let pipeline = Arc::clone(&pipeline);
        tokio::spawn(async move { pipeline.execute(request(None)).await })
    };

    while *states.borrow_and_update() != PipelineState::Dispatching {
        states.changed().await.unwrap();
    }
    // Mid-flight: the notifier is parked on the gate
    assert!(pipeline.is_busy());

    release.send(()).unwrap();
    let terminal = runner.await.unwrap();

    assert_eq!(terminal, PipelineState::Succeeded);
    assert!(!pipeline.is_busy());
}

#[tokio::test]
async fn test_busy_spans_upload_phase() {
    let (release, gate) = oneshot::channel();
    let pipeline = Arc::new(SubmissionPipeline::new(
        Box::new(GatedMediaHost::new(gate)),
        Box::new(InMemoryNotifier::new()),
    ));

    let mut states = pipeline.subscribe();
    let runner = {
        let pipeline = Arc::clone(&pipeline);
        tokio::spawn(async move { pipeline.execute(request(Some(asset()))).await })
    };

    while *states.borrow_and_update() != PipelineState::Uploading {
        states.changed().await.unwrap();
    }
    assert!(pipeline.is_busy());

    release.send(()).unwrap();
    let terminal = runner.await.unwrap();

    assert_eq!(terminal, PipelineState::Succeeded);
    assert!(!pipeline.is_busy());
}

#[tokio::test]
async fn test_upload_failure_is_terminal_and_skips_dispatch() {
    let notifier = InMemoryNotifier::new();
    let pipeline = SubmissionPipeline::new(
        Box::new(InMemoryMediaHost::failing()),
        Box::new(notifier.clone()),
    );

    let terminal = pipeline.execute(request(Some(asset()))).await;

    assert_eq!(terminal, PipelineState::Failed(FailureReason::UploadFailed));
    assert!(notifier.sent().await.is_empty());
    assert!(!pipeline.is_busy());
}

#[tokio::test]
async fn test_resolved_url_is_discarded_not_cached() {
    let media_host = InMemoryMediaHost::new();
    let pipeline = SubmissionPipeline::new(
        Box::new(media_host.clone()),
        Box::new(InMemoryNotifier::failing()),
    );

    let first = pipeline.execute(request(Some(asset()))).await;
    assert_eq!(first, PipelineState::Failed(FailureReason::SendFailed));
    assert_eq!(media_host.upload_count().await, 1);

    // A later run starts over; the earlier upload is not reused
    let second = pipeline.execute(request(Some(asset()))).await;
    assert_eq!(second, PipelineState::Failed(FailureReason::SendFailed));
    assert_eq!(media_host.upload_count().await, 2);
}

#[tokio::test]
async fn test_payload_remote_url_empty_without_attachment() {
    let notifier = InMemoryNotifier::new();
    let pipeline = SubmissionPipeline::new(
        Box::new(InMemoryMediaHost::new()),
        Box::new(notifier.clone()),
    );

    pipeline.execute(request(None)).await;

    let sent = notifier.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].remote_url, "");
    assert_eq!(sent[0].recipient, "DESK OPERATOR");
    assert!(!sent[0].submitted_at.is_empty());
}
