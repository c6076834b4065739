//! Users page data: the back-office account list.

use std::sync::Arc;

use meterdesk_actions::ActionClient;
use meterdesk_prefetch::specs;
use meterdesk_query::{QueryCoordinator, QueryStatus};
use meterdesk_types::{ActionError, ActionValue, User};

use crate::compose::run_spec;

pub struct UsersView {
    client: Arc<dyn ActionClient>,
    coordinator: Arc<QueryCoordinator>,
}

#[derive(Debug, Clone, Default)]
pub struct UsersModel {
    pub users: Vec<User>,
    pub is_loading: bool,
    pub is_fetching: bool,
    pub error: Option<ActionError>,
}

impl UsersView {
    pub fn new(client: Arc<dyn ActionClient>, coordinator: Arc<QueryCoordinator>) -> Self {
        Self {
            client,
            coordinator,
        }
    }

    pub async fn load(&self) -> UsersModel {
        self.assemble(false).await
    }

    pub async fn refetch(&self) -> UsersModel {
        self.assemble(true).await
    }

    async fn assemble(&self, force: bool) -> UsersModel {
        let state = run_spec(&self.coordinator, specs::users(&self.client), force).await;
        UsersModel {
            users: state
                .value
                .as_deref()
                .and_then(ActionValue::as_users)
                .map(<[User]>::to_vec)
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
    use meterdesk_actions::{Fixtures, MemoryActionClient};
    use meterdesk_query::QueryConfig;
    use meterdesk_types::Role;

    #[tokio::test(start_paused = true)]
    async fn test_load_then_cached_then_refetch() {
        let client = Arc::new(MemoryActionClient::with_fixtures(Fixtures {
            users: vec![User {
                id: 1,
                name: "ama".to_string(),
                email: "ama@example.com".to_string(),
                role: Role::Admin,
            }],
            ..Fixtures::default()
        }));
        let view = UsersView::new(
            Arc::clone(&client) as Arc<dyn ActionClient>,
            Arc::new(QueryCoordinator::new(QueryConfig::default())),
        );

        let model = view.load().await;
        assert_eq!(model.users.len(), 1);
        assert_eq!(client.calls("users"), 1);

        view.load().await;
        assert_eq!(client.calls("users"), 1);

        view.refetch().await;
        assert_eq!(client.calls("users"), 2);
    }
}
