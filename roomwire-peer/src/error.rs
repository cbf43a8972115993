use thiserror::Error;

/// Local media could not be acquired. Surfaced to the operator; the
/// negotiation attempt is abandoned without retry.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no capture source available for the requested constraints")]
    Unavailable,
    #[error("local capture failed: {0}")]
    Failed(String),
}

/// The transport engine rejected a description or candidate application,
/// typically because of a signaling-state mismatch. Logged as a warning;
/// the negotiation may remain stalled.
#[derive(Debug, Error)]
#[error("{operation} rejected by transport engine: {reason}")]
pub struct NegotiationApplyError {
    pub operation: &'static str,
    pub reason: String,
}

impl NegotiationApplyError {
    pub fn new(operation: &'static str, reason: impl Into<String>) -> Self {
        Self {
            operation,
            reason: reason.into(),
        }
    }
}

/// The remote stream could not be attached to the display surface. The
/// stream itself is retained.
#[derive(Debug, Error)]
#[error("failed to attach remote stream: {0}")]
pub struct RenderError(pub String);
