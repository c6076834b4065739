//! Shared composition helpers for view models.

use std::sync::Arc;

use meterdesk_prefetch::QuerySpec;
use meterdesk_query::{QueryCoordinator, QueryState, QueryStatus};
use meterdesk_types::ActionError;

/// Run one spec through the coordinator, forced or not.
pub(crate) async fn run_spec(
    coordinator: &Arc<QueryCoordinator>,
    spec: QuerySpec,
    force: bool,
) -> QueryState {
    if force {
        coordinator
            .revalidate(spec.key, spec.fetcher, Some(spec.stale_window))
            .await
    } else {
        coordinator
            .ensure(spec.key, spec.fetcher, Some(spec.stale_window))
            .await
    }
}

/// True while any enabled source is on its first fetch.
pub(crate) fn any_loading(states: &[&QueryState]) -> bool {
    states.iter().any(|s| s.status == QueryStatus::Loading)
}

/// True while any enabled source is refreshing.
pub(crate) fn any_fetching(states: &[&QueryState]) -> bool {
    states.iter().any(|s| s.is_fetching)
}

/// First error across enabled sources, in composition order.
pub(crate) fn first_error(states: &[&QueryState]) -> Option<ActionError> {
    states.iter().find_map(|s| s.error.clone())
}
