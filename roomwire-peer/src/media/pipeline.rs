use crate::error::{CaptureError, RenderError};
use crate::media::source::MediaSource;
use crate::media::stream::{LocalStream, MediaConstraints, RemoteStream};
use tracing::{debug, info, warn};

/// Display surface for the one remote stream. Attachment failure is
/// reported but the stream is retained regardless.
pub trait RenderSurface: Send + Sync {
    fn attach(&self, stream: &RemoteStream) -> Result<(), RenderError>;
    fn detach(&self);
}

/// Acquires local capture and holds the remote-stream slot: at most one
/// remote stream is attached, first delivery wins, and the slot empties
/// only when the peer leaves the room.
pub struct MediaPipeline {
    source: Box<dyn MediaSource>,
    surface: Box<dyn RenderSurface>,
    remote_slot: Option<RemoteStream>,
}

impl MediaPipeline {
    pub fn new(source: Box<dyn MediaSource>, surface: Box<dyn RenderSurface>) -> Self {
        Self {
            source,
            surface,
            remote_slot: None,
        }
    }

    pub async fn acquire_local(
        &self,
        constraints: &MediaConstraints,
    ) -> Result<LocalStream, CaptureError> {
        self.source.acquire(constraints).await
    }

    /// Attach a delivered remote stream. Returns false when a stream is
    /// already attached; later deliveries are ignored while the slot is set.
    pub fn attach_remote(&mut self, stream: RemoteStream) -> bool {
        if self.remote_slot.is_some() {
            debug!(
                "ignoring remote stream {}: slot already occupied",
                stream.stream_id
            );
            return false;
        }

        if let Err(e) = self.surface.attach(&stream) {
            warn!("{e}");
        }
        info!("remote stream {} attached", stream.stream_id);
        self.remote_slot = Some(stream);
        true
    }

    /// Empty the slot on peer departure. A subsequent delivery is accepted
    /// again.
    pub fn clear_remote(&mut self) {
        if self.remote_slot.take().is_some() {
            self.surface.detach();
            info!("remote stream detached");
        }
    }

    pub fn remote(&self) -> Option<&RemoteStream> {
        self.remote_slot.as_ref()
    }
}
