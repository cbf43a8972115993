mod config;
mod observer;
mod session;
mod state;

pub use config::SessionConfig;
pub use observer::{NoopObserver, SessionObserver};
pub use session::NegotiationSession;
pub use state::SessionState;
