mod channel;
mod output;

pub use channel::{RelayEvent, SignalingChannel};
pub use output::SignalingOutput;
