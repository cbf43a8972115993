use crate::media::MediaConstraints;
use roomwire_core::{ParticipantName, RoomId};

/// Immutable identity and capture configuration of one session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub room: RoomId,
    pub name: ParticipantName,
    pub constraints: MediaConstraints,
}
