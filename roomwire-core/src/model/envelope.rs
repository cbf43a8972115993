use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SdpKind {
    Offer,
    Answer,
}

/// One side's proposed or accepted media session parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionDescription {
    #[serde(rename = "type")]
    pub kind: SdpKind,
    pub sdp: String,
}

/// One possible network path for the direct connection, trickled
/// incrementally. Candidate order is not significant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConnectivityCandidate {
    pub candidate: String,
    #[serde(default)]
    pub sdp_mid: Option<String>,
    #[serde(default)]
    pub sdp_m_line_index: Option<u16>,
}

/// The wire unit exchanged over the relay: exactly one of a session
/// description or a connectivity candidate. Frames that are valid JSON but
/// match neither shape (or both at once) decode to `Unknown`, a recognized
/// no-op, so future message kinds pass through without breaking older peers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalingEnvelope {
    Description(SessionDescription),
    Candidate(ConnectivityCandidate),
    Unknown,
}
