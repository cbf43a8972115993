mod engine;
mod transport_config;
mod webrtc_engine;

pub use engine::{EngineEvent, LocalTrack, PeerConnector, PeerHandle};
pub use transport_config::TransportConfig;
pub use webrtc_engine::WebRtcConnector;
