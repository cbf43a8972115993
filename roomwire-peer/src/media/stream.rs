use crate::transport::LocalTrack;

/// Which media the local capture should yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaConstraints {
    pub audio: bool,
    pub video: bool,
}

impl Default for MediaConstraints {
    fn default() -> Self {
        Self {
            audio: true,
            video: true,
        }
    }
}

/// Captured local media: the tracks handed to the peer connection at
/// handle-creation time.
pub struct LocalStream {
    pub id: String,
    pub tracks: Vec<LocalTrack>,
}

/// Metadata view of media delivered by the remote peer. Rendering happens
/// on an external surface; the session only tracks attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteStream {
    pub stream_id: String,
    pub tracks: Vec<RemoteTrackInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTrackInfo {
    pub id: String,
    pub kind: String,
}
