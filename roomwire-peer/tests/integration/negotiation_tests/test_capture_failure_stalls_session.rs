use crate::integration::{spawn_session, SIGNAL_TIMEOUT};
use crate::utils::{ObservedEvent, OutboundSignal};
use roomwire_peer::{RelayEvent, SessionState};
use tokio::time::timeout;

#[tokio::test]
async fn capture_failure_surfaces_and_stalls_without_retry() {
    let mut session = spawn_session(true);

    session.send_relay(RelayEvent::Connected).await;

    // Presence is still announced before capture is attempted.
    let announce = session.next_signal().await;
    assert!(matches!(announce, OutboundSignal::Announce { .. }));

    let observed = timeout(SIGNAL_TIMEOUT, session.observer_rx.recv())
        .await
        .expect("timed out")
        .expect("observer closed");
    let ObservedEvent::CaptureFailed(reason) = observed else {
        panic!("expected a capture failure, got {observed:?}");
    };
    assert!(reason.contains("no capture source"));

    // No offer goes out, no handle is created, the state machine stalls.
    session.assert_no_outbound().await;
    assert_eq!(session.state(), SessionState::AwaitingLocalMedia);
    assert_eq!(session.engine.connect_count().await, 0);
}
