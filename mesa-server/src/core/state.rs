//! Server state
//!
//! [`ServerState`] holds the shared handles every request needs: the
//! connection pool, JWT validation, and the sync event bus. Cloning is
//! shallow (Arc/pool clones).

use std::sync::Arc;

use serde::Serialize;
use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::services::{BroadcastEventBus, BusEvent, EventPublisher};

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub events: Arc<BroadcastEventBus>,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            pool,
            jwt_service,
            events: Arc::new(BroadcastEventBus::default()),
        }
    }

    /// The bus as the publish-only interface handed to services
    pub fn publisher(&self) -> Arc<dyn EventPublisher> {
        self.events.clone()
    }

    /// Announce a resource mutation to connected clients
    pub async fn broadcast_sync<T: Serialize>(
        &self,
        tenant_id: &str,
        resource: &str,
        id: &str,
        action: &str,
        payload: Option<&T>,
    ) {
        self.events
            .publish(BusEvent::new(tenant_id, resource, id, action, payload))
            .await;
    }
}
