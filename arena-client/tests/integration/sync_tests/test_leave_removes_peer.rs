use arena_client::MemoryHub;
use arena_core::{Color, PeerId};

use crate::integration::init_tracing;
use crate::utils::{TestPeer, settle};

#[tokio::test]
async fn test_leave_removes_peer() {
    init_tracing();

    let hub = MemoryHub::new();
    let mut a = TestPeer::join(&hub, "peer-a", "arena").await;
    let mut b = TestPeer::join(&hub, "peer-b", "arena").await;

    let join_a = a.reconciler.join_local(Color::new(1));
    a.send(join_a).await;
    settle(&mut a, &mut b).await;

    let a_id = PeerId::from("peer-a");
    assert!(b.reconciler.peer(&a_id).is_some());

    let local_id = a.reconciler.local_id().clone();
    a.reconciler.leave_local();
    a.handle.leave(&local_id).await;

    assert_eq!(b.drain().await, 1);

    assert!(b.reconciler.peer(&a_id).is_none());
    assert!(b.reconciler.is_empty());
    assert!(!b.reconciler.scene().visible().contains(&a_id));
    assert_eq!(hub.subscriber_count(b.handle.room()), 1);
}

#[tokio::test]
async fn test_peer_without_leave_stays_forever() {
    init_tracing();

    let hub = MemoryHub::new();
    let mut a = TestPeer::join(&hub, "peer-a", "arena").await;
    let mut b = TestPeer::join(&hub, "peer-b", "arena").await;

    let join_a = a.reconciler.join_local(Color::new(1));
    a.send(join_a).await;
    settle(&mut a, &mut b).await;

    // A vanishes without a leave notice: nothing on B ever expires it.
    drop(a);
    b.drain().await;

    assert!(b.reconciler.peer(&PeerId::from("peer-a")).is_some());
}
