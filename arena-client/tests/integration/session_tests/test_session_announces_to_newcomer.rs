use arena_client::{InputEvent, MemoryHub, Reconciler, Session, SessionConfig};
use arena_core::{Color, PeerEvent, PeerId, Position};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::integration::init_tracing;
use crate::utils::TestPeer;

#[tokio::test]
async fn test_session_announces_to_newcomer() {
    init_tracing();

    let hub = MemoryHub::new();
    let mut session = Session::start(
        Arc::new(hub.connect()),
        "lobby",
        Reconciler::new(PeerId::from("host"), SessionConfig::default()),
        Color::new(7),
    )
    .await
    .expect("Failed to start session");

    let mut newcomer = TestPeer::join(&hub, "guest", "lobby").await;

    session
        .handle_peer_event(PeerEvent::Join {
            id: PeerId::from("guest"),
            position: Position::new(0.0, 0.5, 0.0),
            color: Color::new(9),
        })
        .await;

    assert_eq!(session.reconciler().len(), 1);
    assert_eq!(
        newcomer.events.try_recv().ok(),
        Some(PeerEvent::Join {
            id: PeerId::from("host"),
            position: Position::new(0.0, 0.5, 0.0),
            color: Color::new(7),
        })
    );
}

#[tokio::test]
async fn test_session_frames_follow_input() {
    init_tracing();

    let hub = MemoryHub::new();
    let mut observer = TestPeer::join(&hub, "observer", "lobby").await;
    let mut session = Session::start(
        Arc::new(hub.connect()),
        "lobby",
        Reconciler::new(PeerId::from("host"), SessionConfig::default()),
        Color::new(7),
    )
    .await
    .expect("Failed to start session");

    session.handle_input(InputEvent::KeyDown("ArrowUp".into()));
    assert!(session.input().is_pressed("ArrowUp"));

    let start = Instant::now();
    session.frame(start).await;
    session.frame(start + Duration::from_millis(20)).await;
    session.handle_input(InputEvent::KeyUp("ArrowUp".into()));
    session.frame(start + Duration::from_millis(120)).await;

    let local = session.reconciler().local().unwrap().position;
    assert!((local.z + 0.2).abs() < 1e-9);

    observer.drain().await;
    let host = observer.reconciler.peer(&PeerId::from("host")).unwrap();
    assert!((host.position.z + 0.2).abs() < 1e-9);
}
