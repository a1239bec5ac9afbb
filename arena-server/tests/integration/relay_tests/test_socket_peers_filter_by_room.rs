use arena_client::{Reconciler, RoomHandle, SessionConfig, SocketTransport, Transport};
use arena_core::{Color, PeerEvent, PeerId, SocketCodec};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::integration::init_tracing;
use crate::utils::{socket_url, spawn_server};

async fn join(url: &str, room: &str) -> (RoomHandle, mpsc::UnboundedReceiver<PeerEvent>) {
    let transport: Arc<dyn Transport> = Arc::new(
        SocketTransport::connect(url, SocketCodec)
            .await
            .expect("Failed to connect"),
    );
    let mut handle = arena_client::join(transport, room)
        .await
        .expect("Failed to join");
    let events = handle.take_events().expect("Event stream already taken");
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
async fn test_socket_peers_filter_by_room() {
    init_tracing();

    let addr = spawn_server().await;
    let url = socket_url(addr);
    let config = SessionConfig::default();

    let (handle_a, _events_a) = join(&url, "rooma").await;
    let (handle_other, mut events_other) = join(&url, "roomb").await;

    let mut a = Reconciler::new(PeerId::from("peer-a"), config.clone());
    let join_a = a.join_local(Color::new(7)).unwrap();
    handle_a.send(&join_a).await.unwrap();

    // The late joiner in room A learns about peer-a from the relay snapshot.
    let (handle_c, mut events_c) = join(&url, "Room A").await;
    let mut c = Reconciler::new(PeerId::from("peer-c"), config);
    let join_c = c.join_local(Color::new(9)).unwrap();
    handle_c.send(&join_c).await.unwrap();

    let first = next_event(&mut events_c).await;
    assert_eq!(first.peer_id(), &PeerId::from("peer-a"));
    c.apply(first);
    assert_eq!(c.peer(&PeerId::from("peer-a")).unwrap().color, Color::new(7));

    // Room B's socket saw both joins on the wire but its client dropped them.
    assert!(
        timeout(Duration::from_millis(300), events_other.recv())
            .await
            .is_err()
    );
    drop(handle_other);
}
