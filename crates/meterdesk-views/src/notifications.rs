//! Notifications data: fetched once, then kept current by pushed updates
//! writing through the coordinator.

use std::sync::Arc;

use meterdesk_actions::ActionClient;
use meterdesk_prefetch::specs;
use meterdesk_query::{QueryCoordinator, QueryStatus};
use meterdesk_types::{ActionError, ActionValue, Notification};

use crate::compose::run_spec;

pub struct NotificationsView {
    client: Arc<dyn ActionClient>,
    coordinator: Arc<QueryCoordinator>,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationsModel {
    pub notifications: Vec<Notification>,
    pub is_loading: bool,
    pub is_fetching: bool,
    pub error: Option<ActionError>,
}

impl NotificationsView {
    pub fn new(client: Arc<dyn ActionClient>, coordinator: Arc<QueryCoordinator>) -> Self {
        Self {
            client,
            coordinator,
        }
    }

    pub async fn load(&self) -> NotificationsModel {
        self.assemble(false).await
    }

    pub async fn refetch(&self) -> NotificationsModel {
        self.assemble(true).await
    }

    /// Cache-only read, for re-rendering after a pushed update without
    /// touching the remote.
    pub fn peek(&self) -> NotificationsModel {
        match self.coordinator.read(&specs::notifications(&self.client).key) {
            Some(state) => Self::model_from(state),
            None => NotificationsModel::default(),
        }
    }

    async fn assemble(&self, force: bool) -> NotificationsModel {
        let state = run_spec(&self.coordinator, specs::notifications(&self.client), force).await;
        Self::model_from(state)
    }

    fn model_from(state: meterdesk_query::QueryState) -> NotificationsModel {
        NotificationsModel {
            notifications: state
                .value
                .as_deref()
                .and_then(ActionValue::as_notifications)
                .map(<[Notification]>::to_vec)
                .unwrap_or_default(),
            is_loading: state.status == QueryStatus::Loading,
            is_fetching: state.is_fetching,
            error: state.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use meterdesk_actions::{Fixtures, MemoryActionClient};
    use meterdesk_query::{QueryConfig, QueryKey};
    use uuid::Uuid;

    fn note(message: &str) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            message: message.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_pushed_update_is_visible_without_a_remote_call() {
        let client = Arc::new(MemoryActionClient::with_fixtures(Fixtures {
            notifications: vec![note("low stock: single-phase meter")],
            ..Fixtures::default()
        }));
        let coordinator = Arc::new(QueryCoordinator::new(QueryConfig::default()));
        let view = NotificationsView::new(
            Arc::clone(&client) as Arc<dyn ActionClient>,
            Arc::clone(&coordinator),
        );

        let model = view.load().await;
        assert_eq!(model.notifications.len(), 1);
        assert_eq!(client.calls("notifications"), 1);

        coordinator.apply_push(
            &QueryKey::notifications(),
            ActionValue::Notifications(vec![note("agent kofi topped up"), model.notifications[0].clone()]),
            None,
        );

        let model = view.peek();
        assert_eq!(model.notifications.len(), 2);
        assert_eq!(model.notifications[0].message, "agent kofi topped up");
        assert_eq!(client.calls("notifications"), 1);
    }
}
