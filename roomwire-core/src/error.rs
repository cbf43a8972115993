use thiserror::Error;

/// A relay payload that is not valid JSON at all. Structurally unexpected
/// but well-formed JSON is not an error; it decodes to
/// [`SignalingEnvelope::Unknown`](crate::SignalingEnvelope::Unknown).
#[derive(Debug, Error)]
#[error("malformed signaling envelope: {0}")]
pub struct ParseError(#[from] serde_json::Error);
