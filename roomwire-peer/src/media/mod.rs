mod pipeline;
mod source;
mod stream;

pub use pipeline::{MediaPipeline, RenderSurface};
pub use source::{MediaSource, StaticMediaSource};
pub use stream::{LocalStream, MediaConstraints, RemoteStream, RemoteTrackInfo};
