//! Out-of-band cache writes fed by a message channel.
//!
//! The real-time notification transport lives outside this crate; whatever
//! it is, it hands new values over an mpsc channel and the consumer spawned
//! here writes them into the cache as just another per-key-ordered writer.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use meterdesk_types::ActionValue;

use crate::coordinator::QueryCoordinator;
use crate::keys::QueryKey;

/// One pushed value destined for a cache key.
#[derive(Debug)]
pub struct PushUpdate {
    pub key: QueryKey,
    pub value: ActionValue,
}

/// Drain `rx` into the coordinator until the channel closes.
pub fn spawn_push_consumer(
    coordinator: Arc<QueryCoordinator>,
    mut rx: mpsc::Receiver<PushUpdate>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(update) = rx.recv().await {
            debug!(key = %update.key, "push update received");
            coordinator.apply_push(&update.key, update.value, None);
        }
        debug!("push channel closed, consumer exiting");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use uuid::Uuid;

    use meterdesk_types::Notification;

    use crate::config::QueryConfig;

    #[tokio::test(start_paused = true)]
    async fn test_pushed_values_land_in_cache() {
        let coordinator = Arc::new(QueryCoordinator::new(QueryConfig::default()));
        let (tx, rx) = mpsc::channel(8);
        let handle = spawn_push_consumer(Arc::clone(&coordinator), rx);

        let note = Notification {
            id: Uuid::new_v4(),
            message: "low stock: single-phase meter".to_string(),
            created_at: Utc::now(),
        };
        tx.send(PushUpdate {
            key: QueryKey::notifications(),
            value: ActionValue::Notifications(vec![note.clone()]),
        })
        .await
        .unwrap();
        drop(tx);
        handle.await.unwrap();

        let state = coordinator.read(&QueryKey::notifications()).unwrap();
        let items = state
            .value
            .as_ref()
            .and_then(|v| v.as_notifications())
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].message, note.message);
    }
}
