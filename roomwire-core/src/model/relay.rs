use crate::model::{ParticipantName, RoomId};
use serde::{Deserialize, Serialize};

/// Frames exchanged with the relay service over its websocket. The relay
/// treats `Message` payloads as opaque strings and forwards them to the
/// other room member; the remaining frames carry room membership.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", content = "d", rename_all = "snake_case")]
pub enum RelayFrame {
    /// Presence announcement, sent once after connecting.
    Init {
        room: RoomId,
        name: ParticipantName,
    },
    /// Another participant entered the room.
    ReqJoinRoom { text: String },
    /// Another participant left the room.
    ReqLeaveRoom { text: String },
    /// An opaque signaling envelope, JSON-encoded by the sender.
    Message { raw: String },
}
