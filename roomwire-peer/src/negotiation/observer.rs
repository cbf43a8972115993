use crate::error::CaptureError;
use crate::media::RemoteStream;
use async_trait::async_trait;

/// Hooks the hosting application can implement to surface session activity
/// (room log lines, capture failures, remote media changes). All methods
/// default to no-ops.
#[async_trait]
pub trait SessionObserver: Send + Sync {
    async fn on_room_log(&self, _text: &str) {}

    async fn on_capture_failed(&self, _error: &CaptureError) {}

    async fn on_remote_stream(&self, _stream: &RemoteStream) {}

    async fn on_remote_cleared(&self) {}
}

/// Observer relying solely on the session's own tracing output.
pub struct NoopObserver;

#[async_trait]
impl SessionObserver for NoopObserver {}
