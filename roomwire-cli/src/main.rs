use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use colored::*;
use roomwire_core::{ParticipantName, RoomId};
use roomwire_peer::{
    CaptureError, MediaConstraints, MediaPipeline, NegotiationSession, RemoteStream, RenderError,
    RenderSurface, SessionConfig, SessionObserver, SignalingChannel, StaticMediaSource,
    TransportConfig, WebRtcConnector,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Join a two-party room and negotiate a direct media connection, using the
/// relay only for signaling.
#[derive(Parser)]
#[command(name = "roomwire")]
struct Args {
    /// Relay websocket URL
    #[arg(long, default_value = "ws://127.0.0.1:8080/ws")]
    relay: String,

    /// Room token shared by both participants
    #[arg(long)]
    room: String,

    /// Display name announced to the room
    #[arg(long)]
    name: Option<String>,

    /// Skip audio capture
    #[arg(long)]
    no_audio: bool,

    /// Skip video capture
    #[arg(long)]
    no_video: bool,

    /// STUN/TURN server URL (repeatable)
    #[arg(long = "ice-server")]
    ice_servers: Vec<String>,
}

/// Prints the room activity log the way the hosting page would display it.
struct ConsoleObserver;

#[async_trait]
impl SessionObserver for ConsoleObserver {
    async fn on_room_log(&self, text: &str) {
        println!("{}", text.cyan());
    }

    async fn on_capture_failed(&self, error: &CaptureError) {
        eprintln!("{}", format!("capture failed: {error}").red().bold());
    }

    async fn on_remote_stream(&self, stream: &RemoteStream) {
        println!(
            "{}",
            format!("remote stream {} attached", stream.stream_id).green()
        );
    }

    async fn on_remote_cleared(&self) {
        println!("{}", "remote stream detached".yellow());
    }
}

/// Headless display surface: attachment is logged, nothing is rendered.
struct LogSurface;

impl RenderSurface for LogSurface {
    fn attach(&self, stream: &RemoteStream) -> Result<(), RenderError> {
        info!("displaying remote stream {}", stream.stream_id);
        Ok(())
    }

    fn detach(&self) {
        info!("display cleared");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let name = args.name.unwrap_or_else(|| {
        let id = uuid::Uuid::new_v4().simple().to_string();
        format!("guest-{}", &id[..8])
    });

    let config = SessionConfig {
        room: RoomId::from(args.room),
        name: ParticipantName::from(name),
        constraints: MediaConstraints {
            audio: !args.no_audio,
            video: !args.no_video,
        },
    };

    let transport = if args.ice_servers.is_empty() {
        TransportConfig::default()
    } else {
        TransportConfig {
            ice_servers: args.ice_servers,
        }
    };

    let (channel, relay_rx) = SignalingChannel::connect(&args.relay).await?;

    let pipeline = MediaPipeline::new(
        Box::new(StaticMediaSource::new(format!("roomwire-{}", config.name))),
        Box::new(LogSurface),
    );

    let (session, mut state_rx) = NegotiationSession::new(
        config,
        Arc::new(channel),
        Box::new(WebRtcConnector::new(transport)),
        pipeline,
        Box::new(ConsoleObserver),
    );

    tokio::spawn(async move {
        while state_rx.changed().await.is_ok() {
            info!("session state: {:?}", *state_rx.borrow());
        }
    });

    session.run(relay_rx).await;
    Ok(())
}
