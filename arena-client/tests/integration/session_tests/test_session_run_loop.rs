use arena_client::{InputEvent, MemoryHub, Reconciler, Session, SessionConfig};
use arena_core::{Color, PeerEvent, PeerId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::integration::init_tracing;
use crate::utils::{RecordingScene, TestPeer};

#[tokio::test(start_paused = true)]
async fn test_session_run_loop() {
    init_tracing();

    let hub = MemoryHub::new();
    let mut observer = TestPeer::join(&hub, "observer", "Arena").await;

    let reconciler = Reconciler::with_scene(
        PeerId::from("mover"),
        SessionConfig::default(),
        RecordingScene::new(),
    );
    let session = Session::start(
        Arc::new(hub.connect()),
        " arena ",
        reconciler,
        Color::new(0xABCDEF),
    )
    .await
    .expect("Failed to start session");

    let (input_tx, input_rx) = mpsc::channel(16);
    let task = tokio::spawn(session.run(input_rx));

    input_tx
        .send(InputEvent::KeyDown("d".into()))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;
    input_tx.send(InputEvent::KeyUp("d".into())).await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    input_tx.send(InputEvent::Quit).await.unwrap();

    let reconciler = task.await.expect("Session task panicked");
    assert!(reconciler.local().is_none());

    let mut received = Vec::new();
    while let Ok(event) = observer.events.try_recv() {
        received.push(event);
    }

    assert!(matches!(
        received.first(),
        Some(PeerEvent::Join { color, .. }) if *color == Color::new(0xABCDEF)
    ));
    assert!(matches!(received.last(), Some(PeerEvent::Leave { .. })));

    let xs: Vec<f64> = received
        .iter()
        .filter_map(|e| match e {
            PeerEvent::Update { position, .. } => Some(position.x),
            _ => None,
        })
        .collect();
    // ~700 ms at one frame and one send per 100 ms.
    assert!(xs.len() >= 5 && xs.len() <= 8, "got {} updates", xs.len());
    assert!(xs.windows(2).all(|w| w[0] <= w[1]));
    // Held for 500 ms: five steps, give or take the frames racing the key events.
    let last = xs.last().copied().unwrap();
    assert!((last - 0.5).abs() < 0.1 + 1e-9, "ended at x = {}", last);

    for event in received {
        observer.reconciler.apply(event);
    }
    assert!(observer.reconciler.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_session_ends_when_input_closes() {
    init_tracing();

    let hub = MemoryHub::new();
    let session = Session::start(
        Arc::new(hub.connect()),
        "solo",
        Reconciler::new(PeerId::from("solo"), SessionConfig::default()),
        Color::new(1),
    )
    .await
    .expect("Failed to start session");
    assert_eq!(hub.subscriber_count(session.room()), 1);

    let room = session.room().clone();
    let (input_tx, input_rx) = mpsc::channel(1);
    drop(input_tx);

    session.run(input_rx).await;
    assert_eq!(hub.subscriber_count(&room), 0);
}

#[tokio::test(start_paused = true)]
async fn test_holding_key_for_one_second_moves_one_unit() {
    init_tracing();

    let hub = MemoryHub::new();
    let mut observer = TestPeer::join(&hub, "observer", "x").await;
    let session = Session::start(
        Arc::new(hub.connect()),
        "x",
        Reconciler::new(PeerId::from("runner"), SessionConfig::default()),
        Color::new(3),
    )
    .await
    .expect("Failed to start session");

    let (input_tx, input_rx) = mpsc::channel(16);
    let task = tokio::spawn(session.run(input_rx));

    input_tx
        .send(InputEvent::KeyDown("ArrowRight".into()))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(1000)).await;
    input_tx
        .send(InputEvent::KeyUp("ArrowRight".into()))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;
    input_tx.send(InputEvent::Quit).await.unwrap();
    task.await.expect("Session task panicked");

    let mut last_x = None;
    while let Ok(event) = observer.events.try_recv() {
        if let PeerEvent::Update { position, .. } = event {
            last_x = Some(position.x);
        }
    }

    // Ten 0.1 steps, plus or minus the frame that races each key event.
    let x = last_x.expect("observer saw no updates");
    assert!((x - 1.0).abs() < 0.1 + 1e-9, "peers see x = {}", x);
}
