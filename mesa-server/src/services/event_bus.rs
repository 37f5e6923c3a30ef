//! Event bus
//!
//! Order mutations are announced to connected clients as fire-and-forget
//! events. Publication never affects the outcome of the request that caused
//! it; absence of subscribers is not an error.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

/// One sync notification, scoped to a tenant
#[derive(Debug, Clone, Serialize)]
pub struct BusEvent {
    pub tenant_id: String,
    /// resource type, e.g. "order"
    pub resource: String,
    pub resource_id: String,
    /// created | updated | deleted
    pub action: String,
    /// full resource body for created/updated, null for deleted
    pub payload: serde_json::Value,
    pub at: DateTime<Utc>,
}

impl BusEvent {
    pub fn new<T: Serialize>(
        tenant_id: &str,
        resource: &str,
        resource_id: &str,
        action: &str,
        payload: Option<&T>,
    ) -> Self {
        let payload = payload
            .and_then(|p| serde_json::to_value(p).ok())
            .unwrap_or(serde_json::Value::Null);
        Self {
            tenant_id: tenant_id.to_string(),
            resource: resource.to_string(),
            resource_id: resource_id.to_string(),
            action: action.to_string(),
            payload,
            at: Utc::now(),
        }
    }

    /// Event name in "resource.action" form
    pub fn name(&self) -> String {
        format!("{}.{}", self.resource, self.action)
    }
}

/// Publish-only sink for sync notifications. Injected into the order
/// lifecycle service so it can be replaced by a recording bus in tests.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: BusEvent);
}

/// Event bus backed by a tokio broadcast channel. Client-facing transports
/// subscribe and forward events to their own connections, filtered by
/// tenant.
#[derive(Debug, Clone)]
pub struct BroadcastEventBus {
    tx: broadcast::Sender<BusEvent>,
}

impl BroadcastEventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BusEvent> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastEventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl EventPublisher for BroadcastEventBus {
    async fn publish(&self, event: BusEvent) {
        tracing::debug!(
            tenant_id = %event.tenant_id,
            event = %event.name(),
            id = %event.resource_id,
            "publishing sync event"
        );
        // Send fails only when no subscriber is connected, which is fine.
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_reaches_subscriber() {
        let bus = BroadcastEventBus::new(8);
        let mut rx = bus.subscribe();
        bus.publish(BusEvent::new::<()>("t1", "order", "o1", "deleted", None))
            .await;
        let event = rx.recv().await.unwrap();
        assert_eq!(event.name(), "order.deleted");
        assert_eq!(event.tenant_id, "t1");
        assert!(event.payload.is_null());
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_ok() {
        let bus = BroadcastEventBus::new(8);
        bus.publish(BusEvent::new::<()>("t1", "order", "o1", "created", None))
            .await;
    }
}
