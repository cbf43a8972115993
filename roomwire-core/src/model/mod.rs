mod envelope;
mod relay;
mod room;

pub use envelope::{ConnectivityCandidate, SdpKind, SessionDescription, SignalingEnvelope};
pub use relay::RelayFrame;
pub use room::{ParticipantName, RoomId};
