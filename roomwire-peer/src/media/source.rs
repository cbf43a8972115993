use crate::error::CaptureError;
use crate::media::stream::{LocalStream, MediaConstraints};
use crate::transport::LocalTrack;
use async_trait::async_trait;
use std::sync::Arc;
use webrtc::api::media_engine::{MIME_TYPE_OPUS, MIME_TYPE_VP8};
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

/// Capability that yields a capturable local stream or fails. The actual
/// capture device lives outside this crate.
#[async_trait]
pub trait MediaSource: Send + Sync {
    async fn acquire(&self, constraints: &MediaConstraints) -> Result<LocalStream, CaptureError>;
}

/// [`MediaSource`] producing sample-fed opus/vp8 tracks. Frame data is
/// pushed by whoever owns the capture device; this source only shapes the
/// tracks the engine negotiates.
pub struct StaticMediaSource {
    stream_id: String,
}

impl StaticMediaSource {
    pub fn new(stream_id: impl Into<String>) -> Self {
        Self {
            stream_id: stream_id.into(),
        }
    }
}

#[async_trait]
impl MediaSource for StaticMediaSource {
    async fn acquire(&self, constraints: &MediaConstraints) -> Result<LocalStream, CaptureError> {
        if !constraints.audio && !constraints.video {
            return Err(CaptureError::Unavailable);
        }

        let mut tracks: Vec<LocalTrack> = Vec::new();

        if constraints.audio {
            tracks.push(Arc::new(TrackLocalStaticSample::new(
                RTCRtpCodecCapability {
                    mime_type: MIME_TYPE_OPUS.to_owned(),
                    clock_rate: 48000,
                    channels: 2,
                    ..Default::default()
                },
                "audio".to_owned(),
                self.stream_id.clone(),
            )));
        }

        if constraints.video {
            tracks.push(Arc::new(TrackLocalStaticSample::new(
                RTCRtpCodecCapability {
                    mime_type: MIME_TYPE_VP8.to_owned(),
                    clock_rate: 90000,
                    ..Default::default()
                },
                "video".to_owned(),
                self.stream_id.clone(),
            )));
        }

        Ok(LocalStream {
            id: self.stream_id.clone(),
            tracks,
        })
    }
}
