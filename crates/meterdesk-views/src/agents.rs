//! Agents page data: the agent roster plus their float transactions.

use std::sync::Arc;

use meterdesk_actions::ActionClient;
use meterdesk_prefetch::specs;
use meterdesk_query::QueryCoordinator;
use meterdesk_types::{ActionError, ActionValue, Agent, AgentTransaction, Page};

use crate::compose::{any_fetching, any_loading, first_error, run_spec};

pub struct AgentsView {
    client: Arc<dyn ActionClient>,
    coordinator: Arc<QueryCoordinator>,
}

#[derive(Debug, Clone, Default)]
pub struct AgentsModel {
    pub agents: Vec<Agent>,
    pub transactions: Page<AgentTransaction>,
    pub is_loading: bool,
    pub is_fetching: bool,
    pub error: Option<ActionError>,
}

impl AgentsView {
    pub fn new(client: Arc<dyn ActionClient>, coordinator: Arc<QueryCoordinator>) -> Self {
        Self {
            client,
            coordinator,
        }
    }

    pub async fn load(&self) -> AgentsModel {
        self.assemble(1, false).await
    }

    pub async fn refetch(&self) -> AgentsModel {
        self.assemble(1, true).await
    }

    /// Load a later transactions page; the roster stays on its cache entry.
    pub async fn load_transactions_page(&self, page: u32) -> AgentsModel {
        self.assemble(page, false).await
    }

    async fn assemble(&self, page: u32, force: bool) -> AgentsModel {
        let (agents, transactions) = tokio::join!(
            run_spec(&self.coordinator, specs::agents(&self.client), force),
            run_spec(
                &self.coordinator,
                specs::agent_transactions(&self.client, page),
                force,
            ),
        );

        AgentsModel {
            agents: agents
                .value
                .as_deref()
                .and_then(ActionValue::as_agents)
                .map(<[Agent]>::to_vec)
                .unwrap_or_default(),
            transactions: transactions
                .value
                .as_deref()
                .and_then(ActionValue::as_agent_transactions)
                .cloned()
                .unwrap_or_default(),
            is_loading: any_loading(&[&agents, &transactions]),
            is_fetching: any_fetching(&[&agents, &transactions]),
            error: first_error(&[&agents, &transactions]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use meterdesk_actions::{Fixtures, MemoryActionClient};
    use meterdesk_query::QueryConfig;

    fn seeded() -> Arc<MemoryActionClient> {
        Arc::new(MemoryActionClient::with_fixtures(Fixtures {
            agents: vec![Agent {
                id: 1,
                name: "kofi".to_string(),
                phone: "0244-000-111".to_string(),
                balance: 150.0,
            }],
            agent_transactions: (0..12)
                .map(|i| AgentTransaction {
                    id: i + 1,
                    agent_name: "kofi".to_string(),
                    amount: 20.0,
                    kind: "top-up".to_string(),
                    created_at: Utc::now(),
                })
                .collect(),
            ..Fixtures::default()
        }))
    }

    fn view(client: &Arc<MemoryActionClient>) -> AgentsView {
        AgentsView::new(
            Arc::clone(client) as Arc<dyn ActionClient>,
            Arc::new(QueryCoordinator::new(QueryConfig::default())),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_populates_roster_and_transactions() {
        let client = seeded();
        let model = view(&client).load().await;

        assert_eq!(model.agents.len(), 1);
        assert_eq!(model.transactions.items.len(), 10);
        assert!(model.transactions.has_more());
        assert!(model.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_transactions_page_does_not_refetch_roster() {
        let client = seeded();
        let view = view(&client);

        view.load().await;
        let second = view.load_transactions_page(2).await;

        assert_eq!(second.transactions.items.len(), 2);
        assert_eq!(second.transactions.page, 2);
        assert_eq!(client.calls("agents"), 1);
        assert_eq!(client.calls("agent_transactions"), 2);
    }
}
