use async_trait::async_trait;
use roomwire_core::{ParticipantName, RoomId};

/// Outbound half of the relay connection. The negotiation session speaks
/// through this trait so it never owns a socket; send failures are handled
/// (logged) by the implementation.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Announce presence to a room, once, after the relay connects.
    async fn announce(&self, room: RoomId, name: ParticipantName);

    /// Forward an encoded signaling envelope to the other room member.
    async fn send_envelope(&self, raw: String);
}
