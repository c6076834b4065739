//! Coordinator behavior across crate seams: staleness boundaries,
//! deduplication, retry bounds, stale-while-revalidate, and push ordering.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::{advance, Instant};

use meterdesk_actions::ActionClient;
use meterdesk_integration_tests::seeded_client;
use meterdesk_prefetch::specs;
use meterdesk_query::{QueryConfig, QueryCoordinator, QueryKey};
use meterdesk_types::{ActionError, ActionValue, Notification};

fn coordinator() -> Arc<QueryCoordinator> {
    Arc::new(QueryCoordinator::new(QueryConfig::default()))
}

#[tokio::test(start_paused = true)]
async fn test_reads_inside_the_window_never_go_remote() {
    let client = seeded_client();
    let dyn_client: Arc<dyn ActionClient> = client.clone();
    let coordinator = coordinator();

    // LISTS window is 120s.
    let spec = specs::agents(&dyn_client);
    coordinator
        .ensure(spec.key, spec.fetcher, Some(spec.stale_window))
        .await;
    assert_eq!(client.calls("agents"), 1);

    advance(Duration::from_secs(119)).await;
    let spec = specs::agents(&dyn_client);
    coordinator
        .ensure(spec.key, spec.fetcher, Some(spec.stale_window))
        .await;
    assert_eq!(client.calls("agents"), 1);

    advance(Duration::from_secs(2)).await;
    let spec = specs::agents(&dyn_client);
    coordinator
        .ensure(spec.key, spec.fetcher, Some(spec.stale_window))
        .await;
    assert_eq!(client.calls("agents"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_ensures_collapse_to_one_call() {
    let client = seeded_client();
    let dyn_client: Arc<dyn ActionClient> = client.clone();
    let coordinator = coordinator();

    let ensures = (0..8).map(|_| {
        let coordinator = Arc::clone(&coordinator);
        let spec = specs::users(&dyn_client);
        async move {
            coordinator
                .ensure(spec.key, spec.fetcher, Some(spec.stale_window))
                .await
        }
    });
    let states = join_all(ensures).await;

    assert_eq!(client.calls("users"), 1);
    assert!(states.iter().all(|s| s.has_value()));
    assert_eq!(coordinator.metrics().snapshot().dedup_joins, 7);
}

#[tokio::test(start_paused = true)]
async fn test_stale_value_stays_visible_while_revalidating() {
    let client = seeded_client();
    let dyn_client: Arc<dyn ActionClient> = client.clone();
    let coordinator = coordinator();

    let spec = specs::inventory_summary(&dyn_client);
    coordinator
        .ensure(spec.key.clone(), spec.fetcher, Some(spec.stale_window))
        .await;

    advance(Duration::from_secs(120)).await;

    // Entry is past its window but the value is still readable.
    let cached = coordinator.read(&spec.key).unwrap();
    assert!(!cached.is_fresh(Instant::now()));
    assert!(cached.has_value());

    let spec = specs::inventory_summary(&dyn_client);
    let refreshed = coordinator
        .revalidate(spec.key, spec.fetcher, Some(spec.stale_window))
        .await;
    assert!(refreshed.is_fresh(Instant::now()));
    assert_eq!(client.calls("inventory_summary"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_retry_bound_holds_then_error_propagates() {
    let client = seeded_client();
    client.fail_with("users", ActionError::Transport("reset".to_string()));
    let dyn_client: Arc<dyn ActionClient> = client.clone();
    let coordinator = Arc::new(QueryCoordinator::new(QueryConfig {
        retry_limit: 2,
        ..QueryConfig::default()
    }));

    let spec = specs::users(&dyn_client);
    let state = coordinator
        .ensure(spec.key, spec.fetcher, Some(spec.stale_window))
        .await;

    // Initial attempt plus exactly two retries.
    assert_eq!(client.calls("users"), 3);
    assert!(state.error.as_ref().is_some_and(ActionError::is_transport));
    assert_eq!(coordinator.metrics().snapshot().retries, 2);
}

#[tokio::test(start_paused = true)]
async fn test_push_refreshes_the_entry_in_place() {
    let client = seeded_client();
    let dyn_client: Arc<dyn ActionClient> = client.clone();
    let coordinator = coordinator();

    let spec = specs::notifications(&dyn_client);
    coordinator
        .ensure(spec.key, spec.fetcher, Some(spec.stale_window))
        .await;
    assert_eq!(client.calls("notifications"), 1);

    advance(Duration::from_secs(59)).await;
    let pushed = vec![Notification {
        id: uuid::Uuid::new_v4(),
        message: "agent kofi topped up".to_string(),
        created_at: chrono::Utc::now(),
    }];
    coordinator.apply_push(
        &QueryKey::notifications(),
        ActionValue::Notifications(pushed.clone()),
        None,
    );

    // The push reset the window, so a read well past the original fetch
    // still serves the pushed value without a remote call.
    advance(Duration::from_secs(30)).await;
    let spec = specs::notifications(&dyn_client);
    let state = coordinator
        .ensure(spec.key, spec.fetcher, Some(spec.stale_window))
        .await;
    assert_eq!(client.calls("notifications"), 1);
    assert_eq!(
        state
            .value
            .as_deref()
            .and_then(ActionValue::as_notifications)
            .map(<[Notification]>::len),
        Some(1)
    );
    assert_eq!(
        state.value.as_deref().and_then(ActionValue::as_notifications),
        Some(pushed.as_slice())
    );
}
