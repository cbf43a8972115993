/// Lifecycle of one negotiation session. `Connected` is inferred from the
/// transport engine's own completion signal and exists for observability;
/// nothing reads it for correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingLocalMedia,
    Negotiating,
    Connected,
}
