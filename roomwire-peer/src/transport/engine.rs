use crate::error::NegotiationApplyError;
use crate::media::RemoteStream;
use anyhow::Result;
use async_trait::async_trait;
use roomwire_core::{ConnectivityCandidate, SessionDescription};
use std::sync::Arc;
use tokio::sync::mpsc;
use webrtc::track::track_local::TrackLocal;

/// A local media track handed to the engine at handle-creation time.
pub type LocalTrack = Arc<dyn TrackLocal + Send + Sync>;

/// Events raised asynchronously by the transport engine once a handle
/// exists, delivered on the channel given to [`PeerConnector::connect`].
#[derive(Debug)]
pub enum EngineEvent {
    /// A local connectivity candidate was discovered and should be sent to
    /// the remote peer immediately.
    CandidateDiscovered(ConnectivityCandidate),
    /// The engine will produce no further candidates. Produces no outbound
    /// message.
    CandidateGatheringComplete,
    /// The remote peer's media arrived.
    TrackDelivered(RemoteStream),
    /// The direct connection completed. Observability only.
    Connected,
    /// The direct connection dropped. No reconnection is attempted.
    Disconnected,
}

/// Description/candidate surface of one peer-connection instance. Owned
/// exclusively by the negotiation session; never shared for concurrent
/// mutation.
#[async_trait]
pub trait PeerHandle: Send + Sync {
    async fn create_offer(&self) -> Result<SessionDescription, NegotiationApplyError>;

    async fn create_answer(&self) -> Result<SessionDescription, NegotiationApplyError>;

    async fn set_local_description(
        &self,
        desc: SessionDescription,
    ) -> Result<(), NegotiationApplyError>;

    async fn set_remote_description(
        &self,
        desc: SessionDescription,
    ) -> Result<(), NegotiationApplyError>;

    async fn add_candidate(
        &self,
        candidate: ConnectivityCandidate,
    ) -> Result<(), NegotiationApplyError>;
}

/// Builds the single peer-connection handle for a session, wiring local
/// tracks in at creation time and engine callbacks onto `events`.
#[async_trait]
pub trait PeerConnector: Send + Sync {
    async fn connect(
        &self,
        tracks: Vec<LocalTrack>,
        events: mpsc::Sender<EngineEvent>,
    ) -> Result<Box<dyn PeerHandle>>;
}
