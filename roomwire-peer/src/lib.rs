mod error;
pub mod media;
pub mod negotiation;
pub mod signaling;
pub mod transport;

pub use error::{CaptureError, NegotiationApplyError, RenderError};
pub use media::{
    LocalStream, MediaConstraints, MediaPipeline, MediaSource, RemoteStream, RemoteTrackInfo,
    RenderSurface, StaticMediaSource,
};
pub use negotiation::{NegotiationSession, NoopObserver, SessionConfig, SessionObserver, SessionState};
pub use signaling::{RelayEvent, SignalingChannel, SignalingOutput};
pub use transport::{
    EngineEvent, LocalTrack, PeerConnector, PeerHandle, TransportConfig, WebRtcConnector,
};
