mod common;

use common::{ScriptedSource, millis};
use search_presenter::events::*;
use search_presenter::{MessageId, PresenterConfig, SearchPresenter};
use std::time::Duration;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::time::{sleep, timeout};

/// Drain everything buffered for `events`, keeping search lifecycle events
fn drain_lifecycle(events: &mut tokio::sync::broadcast::Receiver<PresenterEvent>) -> Vec<PresenterEvent> {
    let mut lifecycle = Vec::new();
    while let Ok(event) = events.try_recv() {
        if event.is_search_lifecycle() {
            lifecycle.push(event);
        }
    }
    lifecycle
}

#[tokio::test]
async fn test_publish_without_subscribers_is_still_counted() {
    let bus = PresenterEventBus::new(10);
    assert_eq!(bus.subscriber_count(), 0);

    let delivered = bus.publish(PresenterEvent::search_started(1, "batman".to_string()));
    assert_eq!(delivered, 0);
    assert_eq!(bus.stats().snapshot().searches_issued, 1);
}

#[tokio::test]
async fn test_subscribers_receive_published_events() {
    let bus = PresenterEventBus::new(10);
    let mut first = bus.subscribe();
    let mut second = bus.subscribe();

    let delivered = bus.publish(PresenterEvent::search_started(1, "batman".to_string()));
    assert_eq!(delivered, 2);

    for receiver in [&mut first, &mut second] {
        let received = match timeout(Duration::from_millis(100), receiver.recv()).await {
            Ok(Ok(event)) => event,
            Ok(Err(e)) => panic!("Failed to receive event: {e}"),
            Err(_) => panic!("Timeout waiting for event"),
        };
        match received {
            PresenterEvent::SearchStarted { seq, query, .. } => {
                assert_eq!(seq, 1);
                assert_eq!(query, "batman");
            }
            other => panic!("Unexpected event: {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_silent_bus_counts_but_never_delivers() {
    let bus = PresenterEventBus::silent();
    let mut receiver = bus.subscribe();
    assert!(!bus.is_broadcasting());

    assert_eq!(
        bus.publish(PresenterEvent::message_cleared(MessageId::new(), true)),
        0
    );
    assert!(matches!(receiver.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(bus.stats().snapshot().messages_cleared, 1);
}

#[tokio::test]
async fn test_zero_capacity_is_raised() {
    let bus = PresenterEventBus::new(0);
    let mut receiver = bus.subscribe();
    bus.publish(PresenterEvent::query_updated("bat".to_string()));
    assert!(matches!(
        receiver.recv().await,
        Ok(PresenterEvent::QueryUpdated { .. })
    ));
}

#[tokio::test]
async fn test_slow_subscriber_lags_instead_of_blocking() {
    let bus = PresenterEventBus::new(2);
    let mut receiver = bus.subscribe();
    for seq in 1..=5 {
        bus.publish(PresenterEvent::search_started(seq, "x".to_string()));
    }
    assert!(matches!(receiver.recv().await, Err(RecvError::Lagged(3))));
    assert_eq!(receiver.recv().await.unwrap().seq(), Some(4));
}

#[tokio::test]
async fn test_clones_share_channel_and_stats() {
    let bus = PresenterEventBus::new(4);
    let clone = bus.clone();
    let mut receiver = bus.subscribe();

    clone.publish(PresenterEvent::search_started(7, "robin".to_string()));

    assert_eq!(receiver.recv().await.unwrap().seq(), Some(7));
    assert_eq!(bus.stats().snapshot().searches_issued, 1);
}

#[tokio::test(start_paused = true)]
async fn test_presenter_publishes_search_lifecycle() {
    let source = ScriptedSource::new();
    source.respond("batman", millis(20), &["Batman", "Batman Begins"]);
    source.fail("joker", millis(20), "network unreachable");
    let presenter = SearchPresenter::with_defaults(source);
    let mut events = presenter.events().subscribe();

    presenter.update_query("batman").unwrap();
    sleep(millis(500)).await;
    presenter.update_query("joker").unwrap();
    sleep(millis(500)).await;

    let lifecycle = drain_lifecycle(&mut events);
    assert_eq!(lifecycle.len(), 4, "unexpected events: {lifecycle:?}");

    match &lifecycle[0] {
        PresenterEvent::SearchStarted { seq, query, .. } => {
            assert_eq!((*seq, query.as_str()), (1, "batman"));
        }
        other => panic!("Unexpected event: {other:?}"),
    }
    match &lifecycle[1] {
        PresenterEvent::SearchCompleted {
            seq,
            result_count,
            duration,
            ..
        } => {
            assert_eq!(*seq, 1);
            assert_eq!(*result_count, 2);
            assert!(*duration >= millis(20) && *duration < millis(25));
        }
        other => panic!("Unexpected event: {other:?}"),
    }
    assert_eq!(lifecycle[2].seq(), Some(2));
    match &lifecycle[3] {
        PresenterEvent::SearchFailed {
            seq,
            error,
            message_id,
            ..
        } => {
            assert_eq!(*seq, 2);
            assert_eq!(error, "network unreachable");
            assert_eq!(presenter.state().message.map(|m| m.id), Some(*message_id));
        }
        other => panic!("Unexpected event: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_stats_track_every_search_outcome() {
    let source = ScriptedSource::new();
    source.respond("slow", millis(1000), &["slow"]);
    source.respond("fast", millis(100), &["fast"]);
    source.fail("broken", millis(0), "index offline");
    let presenter = SearchPresenter::with_defaults(source);

    // slow: issued 300ms, completes 1300ms after fast (issued 800ms) published
    presenter.update_query("slow").unwrap();
    sleep(millis(500)).await;
    presenter.update_query("fast").unwrap();
    sleep(millis(1500)).await;
    presenter.update_query("broken").unwrap();
    sleep(millis(500)).await;

    let id = presenter.state().message.unwrap().id;
    presenter.clear_message(id).unwrap();
    presenter.clear_message(id).unwrap();
    sleep(millis(1)).await;

    let stats = presenter.stats();
    assert_eq!(stats.queries_updated, 3);
    assert_eq!(stats.searches_issued, 3);
    assert_eq!(stats.searches_completed, 1);
    assert_eq!(stats.results_discarded, 1);
    assert_eq!(stats.searches_failed, 1);
    assert_eq!(stats.messages_cleared, 1);
    assert_eq!(stats.searches_outstanding(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_presenter_publishes_shutdown() {
    let presenter = SearchPresenter::with_defaults(ScriptedSource::new());
    let mut events = presenter.events().subscribe();

    presenter.shutdown().await;

    let mut reason = None;
    while let Ok(event) = events.try_recv() {
        if let PresenterEvent::Shutdown { reason: r, .. } = event {
            reason = Some(r);
        }
    }
    assert_eq!(reason, Some(ShutdownReason::Requested));
}

#[tokio::test(start_paused = true)]
async fn test_disabled_events_stay_silent_but_keep_stats() {
    let config = PresenterConfig::builder()
        .enable_events(false)
        .build()
        .unwrap();
    let presenter = SearchPresenter::start(ScriptedSource::new(), config);
    let mut events = presenter.events().subscribe();

    presenter.update_query("batman").unwrap();
    sleep(millis(500)).await;

    assert_eq!(presenter.state().results().len(), 1);
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(presenter.stats().searches_completed, 1);
}
