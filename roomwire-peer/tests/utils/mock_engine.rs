use anyhow::Result;
use async_trait::async_trait;
use roomwire_core::{ConnectivityCandidate, SdpKind, SessionDescription};
use roomwire_peer::{EngineEvent, LocalTrack, NegotiationApplyError, PeerConnector, PeerHandle};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// Every description/candidate operation the session applied to the handle.
#[derive(Debug, Default)]
pub struct EngineCallLog {
    pub offers_created: usize,
    pub answers_created: usize,
    pub local_descriptions: Vec<SessionDescription>,
    pub remote_descriptions: Vec<SessionDescription>,
    pub candidates: Vec<ConnectivityCandidate>,
}

/// Mock transport engine: a connector recording handle creations plus a
/// handle recording applications. `fail_remote_description` simulates a
/// signaling-state rejection by the engine.
#[derive(Clone, Default)]
pub struct MockEngine {
    pub log: Arc<Mutex<EngineCallLog>>,
    connects: Arc<Mutex<usize>>,
    events: Arc<Mutex<Option<mpsc::Sender<EngineEvent>>>>,
    pub fail_remote_description: Arc<Mutex<bool>>,
}

impl MockEngine {
    pub async fn connect_count(&self) -> usize {
        *self.connects.lock().await
    }

    /// The event sender handed over at handle creation, for injecting
    /// engine events into the running session.
    pub async fn event_sender(&self) -> mpsc::Sender<EngineEvent> {
        self.events
            .lock()
            .await
            .clone()
            .expect("no handle was created yet")
    }

    pub async fn send_event(&self, event: EngineEvent) {
        self.event_sender()
            .await
            .send(event)
            .await
            .expect("session is gone");
    }
}

#[async_trait]
impl PeerConnector for MockEngine {
    async fn connect(
        &self,
        _tracks: Vec<LocalTrack>,
        events: mpsc::Sender<EngineEvent>,
    ) -> Result<Box<dyn PeerHandle>> {
        *self.connects.lock().await += 1;
        *self.events.lock().await = Some(events);

        Ok(Box::new(MockHandle {
            log: self.log.clone(),
            fail_remote_description: self.fail_remote_description.clone(),
        }))
    }
}

struct MockHandle {
    log: Arc<Mutex<EngineCallLog>>,
    fail_remote_description: Arc<Mutex<bool>>,
}

#[async_trait]
impl PeerHandle for MockHandle {
    async fn create_offer(&self) -> Result<SessionDescription, NegotiationApplyError> {
        self.log.lock().await.offers_created += 1;
        Ok(SessionDescription {
            kind: SdpKind::Offer,
            sdp: "v=0 mock-offer".to_owned(),
        })
    }

    async fn create_answer(&self) -> Result<SessionDescription, NegotiationApplyError> {
        self.log.lock().await.answers_created += 1;
        Ok(SessionDescription {
            kind: SdpKind::Answer,
            sdp: "v=0 mock-answer".to_owned(),
        })
    }

    async fn set_local_description(
        &self,
        desc: SessionDescription,
    ) -> Result<(), NegotiationApplyError> {
        self.log.lock().await.local_descriptions.push(desc);
        Ok(())
    }

    async fn set_remote_description(
        &self,
        desc: SessionDescription,
    ) -> Result<(), NegotiationApplyError> {
        if *self.fail_remote_description.lock().await {
            return Err(NegotiationApplyError::new(
                "set_remote_description",
                "signaling state mismatch",
            ));
        }
        self.log.lock().await.remote_descriptions.push(desc);
        Ok(())
    }

    async fn add_candidate(
        &self,
        candidate: ConnectivityCandidate,
    ) -> Result<(), NegotiationApplyError> {
        self.log.lock().await.candidates.push(candidate);
        Ok(())
    }
}
