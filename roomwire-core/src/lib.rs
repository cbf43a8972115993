pub mod codec;
mod error;
pub mod model;

pub use error::ParseError;
pub use model::{
    ConnectivityCandidate, ParticipantName, RelayFrame, RoomId, SdpKind, SessionDescription,
    SignalingEnvelope,
};
