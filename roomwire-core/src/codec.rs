//! Pure encode/decode boundary for signaling envelopes.
//!
//! The wire format is the browser-compatible envelope exchanged over the
//! relay's generic message channel:
//!
//! ```json
//! { "sdp": { "type": "offer", "sdp": "v=0..." } }
//! { "candidate": { "candidate": "...", "sdpMid": "0", "sdpMLineIndex": 0 } }
//! ```
//!
//! Encoding is driven by the typed model, so a frame can never carry both
//! fields. Decoding classifies anything else as [`SignalingEnvelope::Unknown`]
//! rather than failing; only payloads that are not JSON yield [`ParseError`].

use crate::error::ParseError;
use crate::model::{ConnectivityCandidate, SessionDescription, SignalingEnvelope};
use serde_json::{Value, json};

pub fn encode_description(desc: &SessionDescription) -> String {
    json!({ "sdp": desc }).to_string()
}

pub fn encode_candidate(candidate: &ConnectivityCandidate) -> String {
    json!({ "candidate": candidate }).to_string()
}

pub fn decode(raw: &str) -> Result<SignalingEnvelope, ParseError> {
    let value: Value = serde_json::from_str(raw)?;

    let envelope = match (value.get("sdp"), value.get("candidate")) {
        (Some(sdp), None) => serde_json::from_value(sdp.clone())
            .map(SignalingEnvelope::Description)
            .unwrap_or(SignalingEnvelope::Unknown),
        (None, Some(candidate)) => serde_json::from_value(candidate.clone())
            .map(SignalingEnvelope::Candidate)
            .unwrap_or(SignalingEnvelope::Unknown),
        // Neither field, or both at once: a recognized no-op.
        _ => SignalingEnvelope::Unknown,
    };

    Ok(envelope)
}
