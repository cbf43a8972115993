use crate::signaling::SignalingOutput;
use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use roomwire_core::{ParticipantName, RelayFrame, RoomId};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{error, info, warn};

/// Inbound events from the relay, delivered in websocket arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    /// The relay connection is up. Always the first event.
    Connected,
    /// Another participant entered the room (membership text).
    PeerJoined(String),
    /// Another participant left the room (membership text).
    PeerLeft(String),
    /// A raw signaling envelope from the other room member.
    Envelope(String),
}

/// Client side of the relay websocket: one writer task draining an outbound
/// queue, one reader task translating relay frames into [`RelayEvent`]s.
pub struct SignalingChannel {
    outbound: mpsc::UnboundedSender<String>,
}

impl SignalingChannel {
    /// Dial the relay. Connection failure is returned to the caller; no
    /// retry happens anywhere in the system.
    pub async fn connect(url: &str) -> Result<(Self, mpsc::Receiver<RelayEvent>)> {
        let (ws, _) = connect_async(url)
            .await
            .with_context(|| format!("failed to connect to relay at {url}"))?;
        info!("connected to relay at {url}");

        let (mut sink, mut stream) = ws.split();
        let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<String>();
        let (event_tx, event_rx) = mpsc::channel(64);

        tokio::spawn(async move {
            while let Some(text) = outbound_rx.recv().await {
                if let Err(e) = sink.send(Message::Text(text.into())).await {
                    error!("relay send failed: {e}");
                    break;
                }
            }
        });

        tokio::spawn(async move {
            let _ = event_tx.send(RelayEvent::Connected).await;

            while let Some(msg) = stream.next().await {
                let text = match msg {
                    Ok(Message::Text(text)) => text,
                    Ok(Message::Close(_)) => {
                        info!("relay closed the connection");
                        break;
                    }
                    Ok(_) => continue,
                    Err(e) => {
                        error!("relay receive failed: {e}");
                        break;
                    }
                };

                let event = match serde_json::from_str::<RelayFrame>(&text) {
                    Ok(RelayFrame::ReqJoinRoom { text }) => RelayEvent::PeerJoined(text),
                    Ok(RelayFrame::ReqLeaveRoom { text }) => RelayEvent::PeerLeft(text),
                    Ok(RelayFrame::Message { raw }) => RelayEvent::Envelope(raw),
                    Ok(RelayFrame::Init { .. }) => {
                        warn!("relay echoed an init frame, ignoring");
                        continue;
                    }
                    Err(e) => {
                        warn!("undecodable relay frame, ignoring: {e}");
                        continue;
                    }
                };

                if event_tx.send(event).await.is_err() {
                    break;
                }
            }
        });

        Ok((Self { outbound }, event_rx))
    }

    fn send_frame(&self, frame: &RelayFrame) {
        match serde_json::to_string(frame) {
            Ok(json) => {
                if self.outbound.send(json).is_err() {
                    error!("relay writer task is gone, dropping outbound frame");
                }
            }
            Err(e) => error!("failed to serialize relay frame: {e}"),
        }
    }
}

#[async_trait]
impl SignalingOutput for SignalingChannel {
    async fn announce(&self, room: RoomId, name: ParticipantName) {
        self.send_frame(&RelayFrame::Init { room, name });
    }

    async fn send_envelope(&self, raw: String) {
        self.send_frame(&RelayFrame::Message { raw });
    }
}
