use arena_client::MemoryHub;
use arena_core::{PeerEvent, PeerId, Position};

use crate::integration::init_tracing;
use crate::utils::TestPeer;

#[tokio::test]
async fn test_unknown_peer_updates_dropped() {
    init_tracing();

    let hub = MemoryHub::new();
    let a = TestPeer::join(&hub, "peer-a", "arena").await;
    let mut b = TestPeer::join(&hub, "peer-b", "arena").await;

    // Update arrives before (or instead of) the join.
    a.send(Some(PeerEvent::Update {
        id: PeerId::from("peer-a"),
        position: Position::new(4.0, 0.5, 4.0),
    }))
    .await;
    a.send(Some(PeerEvent::Leave {
        id: PeerId::from("peer-a"),
    }))
    .await;

    assert_eq!(b.drain().await, 2);
    assert!(b.reconciler.is_empty());
    assert!(b.reconciler.scene().ops.is_empty());
}

#[tokio::test]
async fn test_other_rooms_are_not_seen() {
    init_tracing();

    let hub = MemoryHub::new();
    let a = TestPeer::join(&hub, "peer-a", "red").await;
    let mut b = TestPeer::join(&hub, "peer-b", "blue").await;

    a.send(Some(PeerEvent::Leave {
        id: PeerId::from("peer-a"),
    }))
    .await;

    assert_eq!(b.drain().await, 0);
}
