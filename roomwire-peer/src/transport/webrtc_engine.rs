use crate::error::NegotiationApplyError;
use crate::media::{RemoteStream, RemoteTrackInfo};
use crate::transport::engine::{EngineEvent, LocalTrack, PeerConnector, PeerHandle};
use crate::transport::transport_config::TransportConfig;
use anyhow::Result;
use async_trait::async_trait;
use roomwire_core::{ConnectivityCandidate, SdpKind, SessionDescription};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;

/// [`PeerConnector`] backed by the `webrtc` crate: builds one
/// `RTCPeerConnection` with default codecs and interceptors and translates
/// its callbacks into [`EngineEvent`]s.
pub struct WebRtcConnector {
    config: TransportConfig,
}

impl WebRtcConnector {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl PeerConnector for WebRtcConnector {
    async fn connect(
        &self,
        tracks: Vec<LocalTrack>,
        events: mpsc::Sender<EngineEvent>,
    ) -> Result<Box<dyn PeerHandle>> {
        let mut media_engine = MediaEngine::default();
        media_engine.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut media_engine)?;

        let api = APIBuilder::new()
            .with_media_engine(media_engine)
            .with_interceptor_registry(registry)
            .build();

        let rtc_config = RTCConfiguration {
            ice_servers: vec![RTCIceServer {
                urls: self.config.ice_servers.clone(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let pc = Arc::new(api.new_peer_connection(rtc_config).await?);

        // Local tracks are attached at creation time only.
        for track in tracks {
            pc.add_track(track).await?;
        }

        let ice_tx = events.clone();
        pc.on_ice_candidate(Box::new(move |candidate: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();
            Box::pin(async move {
                match candidate {
                    Some(candidate) => {
                        let Ok(init) = candidate.to_json() else {
                            return;
                        };
                        let _ = tx
                            .send(EngineEvent::CandidateDiscovered(ConnectivityCandidate {
                                candidate: init.candidate,
                                sdp_mid: init.sdp_mid,
                                sdp_m_line_index: init.sdp_mline_index,
                            }))
                            .await;
                    }
                    None => {
                        let _ = tx.send(EngineEvent::CandidateGatheringComplete).await;
                    }
                }
            })
        }));

        let track_tx = events.clone();
        pc.on_track(Box::new(move |track, _receiver, _transceiver| {
            let tx = track_tx.clone();
            Box::pin(async move {
                debug!(
                    "remote track delivered: stream={} kind={}",
                    track.stream_id(),
                    track.kind()
                );
                let stream = RemoteStream {
                    stream_id: track.stream_id(),
                    tracks: vec![RemoteTrackInfo {
                        id: track.id(),
                        kind: track.kind().to_string(),
                    }],
                };
                let _ = tx.send(EngineEvent::TrackDelivered(stream)).await;
            })
        }));

        let state_tx = events.clone();
        pc.on_peer_connection_state_change(Box::new(move |state: RTCPeerConnectionState| {
            let tx = state_tx.clone();
            Box::pin(async move {
                match state {
                    RTCPeerConnectionState::Connected => {
                        let _ = tx.send(EngineEvent::Connected).await;
                    }
                    RTCPeerConnectionState::Failed
                    | RTCPeerConnectionState::Disconnected
                    | RTCPeerConnectionState::Closed => {
                        let _ = tx.send(EngineEvent::Disconnected).await;
                    }
                    _ => {}
                }
            })
        }));

        Ok(Box::new(WebRtcHandle { pc }))
    }
}

struct WebRtcHandle {
    pc: Arc<RTCPeerConnection>,
}

fn to_engine_description(
    desc: SessionDescription,
    operation: &'static str,
) -> Result<RTCSessionDescription, NegotiationApplyError> {
    let result = match desc.kind {
        SdpKind::Offer => RTCSessionDescription::offer(desc.sdp),
        SdpKind::Answer => RTCSessionDescription::answer(desc.sdp),
    };
    result.map_err(|e| NegotiationApplyError::new(operation, e.to_string()))
}

#[async_trait]
impl PeerHandle for WebRtcHandle {
    async fn create_offer(&self) -> Result<SessionDescription, NegotiationApplyError> {
        let offer = self
            .pc
            .create_offer(None)
            .await
            .map_err(|e| NegotiationApplyError::new("create_offer", e.to_string()))?;
        Ok(SessionDescription {
            kind: SdpKind::Offer,
            sdp: offer.sdp,
        })
    }

    async fn create_answer(&self) -> Result<SessionDescription, NegotiationApplyError> {
        let answer = self
            .pc
            .create_answer(None)
            .await
            .map_err(|e| NegotiationApplyError::new("create_answer", e.to_string()))?;
        Ok(SessionDescription {
            kind: SdpKind::Answer,
            sdp: answer.sdp,
        })
    }

    async fn set_local_description(
        &self,
        desc: SessionDescription,
    ) -> Result<(), NegotiationApplyError> {
        let desc = to_engine_description(desc, "set_local_description")?;
        self.pc
            .set_local_description(desc)
            .await
            .map_err(|e| NegotiationApplyError::new("set_local_description", e.to_string()))
    }

    async fn set_remote_description(
        &self,
        desc: SessionDescription,
    ) -> Result<(), NegotiationApplyError> {
        let desc = to_engine_description(desc, "set_remote_description")?;
        self.pc
            .set_remote_description(desc)
            .await
            .map_err(|e| NegotiationApplyError::new("set_remote_description", e.to_string()))
    }

    async fn add_candidate(
        &self,
        candidate: ConnectivityCandidate,
    ) -> Result<(), NegotiationApplyError> {
        let init = RTCIceCandidateInit {
            candidate: candidate.candidate,
            sdp_mid: candidate.sdp_mid,
            sdp_mline_index: candidate.sdp_m_line_index,
            ..Default::default()
        };
        self.pc
            .add_ice_candidate(init)
            .await
            .map_err(|e| NegotiationApplyError::new("add_candidate", e.to_string()))
    }
}
