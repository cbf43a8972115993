pub mod negotiation_tests;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::timeout;
use tracing::Level;

use roomwire_core::{ParticipantName, RoomId, SignalingEnvelope};
use roomwire_peer::{
    EngineEvent, MediaConstraints, MediaPipeline, NegotiationSession, RelayEvent, SessionConfig,
    SessionState,
};

use crate::utils::{
    MockEngine, MockMediaSource, MockSignalingOutput, ObservedEvent, OutboundSignal,
    RecordingObserver, RecordingSurface,
};

pub const SIGNAL_TIMEOUT: Duration = Duration::from_secs(5);

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// One session running against fully mocked collaborators.
pub struct TestSession {
    pub relay_tx: mpsc::Sender<RelayEvent>,
    pub signaling: MockSignalingOutput,
    pub signal_rx: mpsc::UnboundedReceiver<OutboundSignal>,
    pub engine: MockEngine,
    pub surface: RecordingSurface,
    pub observer_rx: mpsc::UnboundedReceiver<ObservedEvent>,
    pub state_rx: watch::Receiver<SessionState>,
}

pub fn spawn_session(media_fails: bool) -> TestSession {
    init_tracing();

    let (signaling, signal_rx) = MockSignalingOutput::new();
    let engine = MockEngine::default();
    let surface = RecordingSurface::default();
    let (observer, observer_rx) = RecordingObserver::new();
    let (relay_tx, relay_rx) = mpsc::channel(64);

    let pipeline = MediaPipeline::new(
        Box::new(MockMediaSource { fail: media_fails }),
        Box::new(surface.clone()),
    );

    let config = SessionConfig {
        room: RoomId::from("test-room"),
        name: ParticipantName::from("alice"),
        constraints: MediaConstraints::default(),
    };

    let (session, state_rx) = NegotiationSession::new(
        config,
        Arc::new(signaling.clone()),
        Box::new(engine.clone()),
        pipeline,
        Box::new(observer),
    );

    tokio::spawn(session.run(relay_rx));

    TestSession {
        relay_tx,
        signaling,
        signal_rx,
        engine,
        surface,
        observer_rx,
        state_rx,
    }
}

impl TestSession {
    pub async fn send_relay(&self, event: RelayEvent) {
        self.relay_tx.send(event).await.expect("session is gone");
    }

    /// Queue a no-op membership event and wait for its observer callback.
    /// Handlers run one at a time in arrival order, so once the marker is
    /// observed every previously queued event has been fully handled.
    pub async fn settle(&mut self) {
        self.send_relay(RelayEvent::PeerJoined("settle-marker".to_owned()))
            .await;
        loop {
            let event = timeout(SIGNAL_TIMEOUT, self.observer_rx.recv())
                .await
                .expect("timed out waiting for the session to settle")
                .expect("observer channel closed");
            if event == ObservedEvent::RoomLog("settle-marker".to_owned()) {
                break;
            }
        }
    }

    pub async fn next_signal(&mut self) -> OutboundSignal {
        timeout(SIGNAL_TIMEOUT, self.signal_rx.recv())
            .await
            .expect("timed out waiting for an outbound signal")
            .expect("signaling channel closed")
    }

    /// Drive the relay-connected transition and return the initial offer
    /// envelope (preceded on the wire by the presence announcement).
    pub async fn connect_and_take_offer(&mut self) -> String {
        self.send_relay(RelayEvent::Connected).await;

        let announce = self.next_signal().await;
        assert!(
            matches!(announce, OutboundSignal::Announce { .. }),
            "expected the presence announcement first, got {announce:?}"
        );

        match self.next_signal().await {
            OutboundSignal::Envelope(raw) => raw,
            other => panic!("expected the initial offer envelope, got {other:?}"),
        }
    }

    /// Assert that everything queued so far produced no further outbound
    /// signal.
    pub async fn assert_no_outbound(&mut self) {
        self.settle().await;
        assert!(
            self.signal_rx.try_recv().is_err(),
            "expected no outbound signal"
        );
    }

    pub fn state(&self) -> SessionState {
        *self.state_rx.borrow()
    }
}

pub fn decode_envelope(raw: &str) -> SignalingEnvelope {
    roomwire_core::codec::decode(raw).expect("outbound envelope must decode")
}

/// Shorthand for injecting engine events into a running session.
pub async fn inject(session: &TestSession, event: EngineEvent) {
    session.engine.send_event(event).await;
}
