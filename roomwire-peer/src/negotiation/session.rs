use crate::media::MediaPipeline;
use crate::negotiation::config::SessionConfig;
use crate::negotiation::observer::SessionObserver;
use crate::negotiation::state::SessionState;
use crate::signaling::{RelayEvent, SignalingOutput};
use crate::transport::{EngineEvent, LocalTrack, PeerConnector, PeerHandle};
use anyhow::Result;
use roomwire_core::{SdpKind, SignalingEnvelope, codec};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

/// Drives the offer/answer exchange for one two-party room.
///
/// The session owns the single peer-connection handle and runs as one task:
/// relay events and engine events are handled one at a time in arrival
/// order, so the handle is never mutated concurrently. Session state is
/// published on a watch channel for observability.
pub struct NegotiationSession {
    config: SessionConfig,
    signaling: Arc<dyn SignalingOutput>,
    connector: Box<dyn PeerConnector>,
    pipeline: MediaPipeline,
    observer: Box<dyn SessionObserver>,
    handle: Option<Box<dyn PeerHandle>>,
    engine_tx: mpsc::Sender<EngineEvent>,
    engine_rx: mpsc::Receiver<EngineEvent>,
    state_tx: watch::Sender<SessionState>,
}

impl NegotiationSession {
    pub fn new(
        config: SessionConfig,
        signaling: Arc<dyn SignalingOutput>,
        connector: Box<dyn PeerConnector>,
        pipeline: MediaPipeline,
        observer: Box<dyn SessionObserver>,
    ) -> (Self, watch::Receiver<SessionState>) {
        let (engine_tx, engine_rx) = mpsc::channel(256);
        let (state_tx, state_rx) = watch::channel(SessionState::Idle);

        let session = Self {
            config,
            signaling,
            connector,
            pipeline,
            observer,
            handle: None,
            engine_tx,
            engine_rx,
            state_tx,
        };

        (session, state_rx)
    }

    /// Event loop. Ends when the relay event stream closes.
    pub async fn run(mut self, mut relay_rx: mpsc::Receiver<RelayEvent>) {
        info!("negotiation session started for room {}", self.config.room);

        loop {
            tokio::select! {
                event = relay_rx.recv() => {
                    match event {
                        Some(e) => self.handle_relay_event(e).await,
                        None => {
                            info!("relay event stream ended, session finished");
                            break;
                        }
                    }
                }

                event = self.engine_rx.recv() => {
                    match event {
                        Some(e) => self.handle_engine_event(e).await,
                        // Unreachable while the session holds engine_tx.
                        None => break,
                    }
                }
            }
        }
    }

    async fn handle_relay_event(&mut self, event: RelayEvent) {
        match event {
            RelayEvent::Connected => self.start_negotiation().await,

            RelayEvent::PeerJoined(text) => {
                info!("room activity: {text}");
                self.observer.on_room_log(&text).await;
            }

            RelayEvent::PeerLeft(text) => {
                info!("room activity: {text}");
                self.pipeline.clear_remote();
                self.observer.on_remote_cleared().await;
                self.observer.on_room_log(&text).await;
            }

            RelayEvent::Envelope(raw) => self.handle_envelope(&raw).await,
        }
    }

    /// Relay connected: announce presence, acquire local media, create the
    /// handle and send the initial offer.
    async fn start_negotiation(&mut self) {
        self.signaling
            .announce(self.config.room.clone(), self.config.name.clone())
            .await;
        self.set_state(SessionState::AwaitingLocalMedia);

        let stream = match self.pipeline.acquire_local(&self.config.constraints).await {
            Ok(stream) => stream,
            Err(e) => {
                // Surfaced to the operator; no automatic retry.
                error!("{e}");
                self.observer.on_capture_failed(&e).await;
                return;
            }
        };

        if let Err(e) = self.ensure_handle(stream.tracks).await {
            error!("failed to create peer connection: {e:#}");
            return;
        }
        self.set_state(SessionState::Negotiating);

        let Some(handle) = self.handle.as_ref() else {
            return;
        };
        let offer = match handle.create_offer().await {
            Ok(offer) => offer,
            Err(e) => {
                warn!("{e}");
                return;
            }
        };
        if let Err(e) = handle.set_local_description(offer.clone()).await {
            warn!("{e}");
            return;
        }

        self.signaling
            .send_envelope(codec::encode_description(&offer))
            .await;
        info!("sent offer to room {}", self.config.room);
    }

    /// Create the peer-connection handle if it does not exist yet. A second
    /// request while a handle exists is a silent no-op, never an error; the
    /// one instance lives for the rest of the session.
    async fn ensure_handle(&mut self, tracks: Vec<LocalTrack>) -> Result<()> {
        if self.handle.is_some() {
            return Ok(());
        }

        let handle = self.connector.connect(tracks, self.engine_tx.clone()).await?;
        self.handle = Some(handle);
        Ok(())
    }

    async fn handle_envelope(&mut self, raw: &str) {
        let envelope = match codec::decode(raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!("{e}");
                return;
            }
        };

        // A peer cannot negotiate before it has a handle. Envelopes that
        // arrive earlier are dropped, not buffered.
        let Some(handle) = self.handle.as_ref() else {
            debug!("dropping envelope received before the peer connection exists");
            return;
        };

        match envelope {
            SignalingEnvelope::Description(desc) => match desc.kind {
                SdpKind::Offer => {
                    if let Err(e) = handle.set_remote_description(desc).await {
                        warn!("{e}");
                        return;
                    }

                    // An offer is always answered; an incoming answer never
                    // triggers a counter-offer. Simultaneous offers resolve
                    // by each side answering the other's, with no rollback:
                    // in a true offer/offer race the engine may reject one
                    // application above and the session stays stalled.
                    let answer = match handle.create_answer().await {
                        Ok(answer) => answer,
                        Err(e) => {
                            warn!("{e}");
                            return;
                        }
                    };
                    if let Err(e) = handle.set_local_description(answer.clone()).await {
                        warn!("{e}");
                        return;
                    }

                    self.signaling
                        .send_envelope(codec::encode_description(&answer))
                        .await;
                    info!("answered remote offer");
                }

                SdpKind::Answer => {
                    if let Err(e) = handle.set_remote_description(desc).await {
                        warn!("{e}");
                    }
                }
            },

            SignalingEnvelope::Candidate(candidate) => {
                // No buffering: a candidate the engine cannot accept yet is
                // dropped, not retried.
                if let Err(e) = handle.add_candidate(candidate).await {
                    warn!("{e}");
                }
            }

            SignalingEnvelope::Unknown => {
                debug!("ignoring unrecognized envelope");
            }
        }
    }

    async fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::CandidateDiscovered(candidate) => {
                self.signaling
                    .send_envelope(codec::encode_candidate(&candidate))
                    .await;
            }

            EngineEvent::CandidateGatheringComplete => {
                debug!("local candidate gathering complete");
            }

            EngineEvent::TrackDelivered(stream) => {
                if self.pipeline.attach_remote(stream) {
                    if let Some(attached) = self.pipeline.remote() {
                        self.observer.on_remote_stream(attached).await;
                    }
                }
            }

            EngineEvent::Connected => {
                info!("peer connection established");
                self.set_state(SessionState::Connected);
            }

            EngineEvent::Disconnected => {
                warn!("peer connection dropped; no reconnection is attempted");
            }
        }
    }

    fn set_state(&self, state: SessionState) {
        let _ = self.state_tx.send(state);
    }
}
