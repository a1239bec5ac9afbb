use arena_client::{HostedTransport, Reconciler, RoomHandle, SessionConfig, Transport};
use arena_core::{Color, HostedCodec, PeerEvent, PeerId, Position};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::integration::init_tracing;
use crate::utils::{hub_url, spawn_server};

async fn join(url: &str, room: &str) -> (RoomHandle, mpsc::UnboundedReceiver<PeerEvent>) {
    let transport: Arc<dyn Transport> = Arc::new(
        HostedTransport::connect(url, HostedCodec)
            .await
            .expect("Failed to connect"),
    );
    let mut handle = arena_client::join(transport, room)
        .await
        .expect("Failed to join");
    let events = handle.take_events().expect("Event stream already taken");

    // Subscribe acks are not surfaced; give the hub a moment to register us.
    tokio::time::sleep(Duration::from_millis(100)).await;
    (handle, events)
}

async fn next_event(events: &mut mpsc::UnboundedReceiver<PeerEvent>) -> PeerEvent {
    timeout(Duration::from_secs(2), events.recv())
        .await
        .expect("Timed out waiting for a peer event")
        .expect("Event stream closed")
}

#[tokio::test]
async fn test_hosted_peers_converge() {
    init_tracing();

    let addr = spawn_server().await;
    let url = hub_url(addr);
    let config = SessionConfig::default();

    let (handle_a, mut events_a) = join(&url, "Room A").await;
    let (handle_b, mut events_b) = join(&url, "rooma").await;
    assert_eq!(handle_a.channel_name(), "game-rooma");
    assert_eq!(handle_b.channel_name(), "game-rooma");

    let mut a = Reconciler::new(PeerId::from("peer-a"), config.clone());
    let mut b = Reconciler::new(PeerId::from("peer-b"), config);

    let join_a = a.join_local(Color::new(0xFF0000)).unwrap();
    handle_a.send(&join_a).await.unwrap();

    // B was already subscribed, so it hears A directly and announces back.
    b.join_local(Color::new(0x00FF00));
    let reply = b.apply(next_event(&mut events_b).await);
    assert!(b.peer(&PeerId::from("peer-a")).is_some());
    handle_b.send(&reply.expect("B should announce itself")).await.unwrap();

    let announce = next_event(&mut events_a).await;
    assert!(matches!(announce, PeerEvent::Join { ref id, .. } if id.as_str() == "peer-b"));
    assert!(a.apply(announce).is_some());

    let moved = PeerEvent::Update {
        id: PeerId::from("peer-a"),
        position: Position::new(0.3, 0.5, -0.1),
    };
    handle_a.send(&moved).await.unwrap();
    b.apply(next_event(&mut events_b).await);
    assert_eq!(
        b.peer(&PeerId::from("peer-a")).unwrap().position,
        Position::new(0.3, 0.5, -0.1)
    );

    handle_a.leave(&PeerId::from("peer-a")).await;
    b.apply(next_event(&mut events_b).await);
    assert!(b.peer(&PeerId::from("peer-a")).is_none());
    assert!(b.is_empty());
}
