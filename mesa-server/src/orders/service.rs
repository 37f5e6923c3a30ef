//! Order lifecycle service
//!
//! Persists the Order aggregate from validated lines and announces every
//! mutation on the injected event bus. Table identity is snapshotted at
//! creation (or re-snapshotted on a table change) and never live-joined.

use std::sync::Arc;

use chrono::Utc;
use shared::models::{Actor, DiningTable, Order, OrderStatus};
use shared::request::{OrderCreate, OrderLineInput, OrderUpdate};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::repository::order::{self, OrderFilter};
use crate::db::repository::dining_table;
use crate::orders::validator;
use crate::services::{BusEvent, EventPublisher};
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "order";

pub struct OrderService {
    pool: SqlitePool,
    events: Arc<dyn EventPublisher>,
}

impl OrderService {
    pub fn new(pool: SqlitePool, events: Arc<dyn EventPublisher>) -> Self {
        Self { pool, events }
    }

    /// A deactivated table reads the same as a missing one.
    async fn resolve_table(&self, tenant_id: &str, table_id: &str) -> AppResult<DiningTable> {
        dining_table::find_by_id(&self.pool, tenant_id, table_id)
            .await?
            .filter(|t| t.is_active)
            .ok_or_else(|| AppError::not_found("table not found"))
    }

    pub async fn create(
        &self,
        tenant_id: &str,
        actor: &Actor,
        data: OrderCreate,
    ) -> AppResult<Order> {
        let table = self.resolve_table(tenant_id, &data.table_id).await?;
        self.create_for_table(tenant_id, &table, actor, data.note, &data.items)
            .await
    }

    /// Shared creation path. The public QR flow resolves its table from a
    /// token and then lands here with a guest actor; semantics are
    /// identical to the staff path.
    pub async fn create_for_table(
        &self,
        tenant_id: &str,
        table: &DiningTable,
        actor: &Actor,
        note: Option<String>,
        items: &[OrderLineInput],
    ) -> AppResult<Order> {
        let priced = validator::validate_and_price(&self.pool, tenant_id, items).await?;

        let now = Utc::now();
        let new_order = Order {
            id: Uuid::new_v4().to_string(),
            tenant_id: tenant_id.to_string(),
            table_id: table.id.clone(),
            table_number: table.number,
            table_name: table.name.clone(),
            status: OrderStatus::Placed,
            note: note.unwrap_or_default(),
            items: priced.lines,
            sub_total: priced.totals.sub_total,
            tax_total: priced.totals.tax_total,
            grand_total: priced.totals.grand_total,
            created_by: actor.clone(),
            updated_by: actor.clone(),
            created_at: now,
            updated_at: now,
        };

        order::insert(&self.pool, &new_order).await?;

        self.events
            .publish(BusEvent::new(
                tenant_id,
                RESOURCE,
                &new_order.id,
                "created",
                Some(&new_order),
            ))
            .await;

        Ok(new_order)
    }

    pub async fn get(&self, tenant_id: &str, id: &str) -> AppResult<Order> {
        order::find_by_id(&self.pool, tenant_id, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("order not found: {id}")))
    }

    pub async fn list(
        &self,
        tenant_id: &str,
        filter: &OrderFilter,
        limit: i64,
        offset: i64,
    ) -> AppResult<(Vec<Order>, i64)> {
        Ok(order::list(&self.pool, tenant_id, filter, limit, offset).await?)
    }

    pub async fn update(
        &self,
        tenant_id: &str,
        id: &str,
        actor: &Actor,
        data: OrderUpdate,
    ) -> AppResult<Order> {
        if data.table_id.is_none()
            && data.status.is_none()
            && data.note.is_none()
            && data.items.is_none()
        {
            return Err(AppError::validation("no updates provided"));
        }

        let mut existing = self.get(tenant_id, id).await?;

        if let Some(table_id) = &data.table_id {
            let table = self.resolve_table(tenant_id, table_id).await?;
            existing.table_id = table.id;
            existing.table_number = table.number;
            existing.table_name = table.name;
        }

        if let Some(raw) = &data.status {
            // Transitions are deliberately unconstrained within the closed
            // vocabulary.
            let status = OrderStatus::parse(raw)
                .ok_or_else(|| AppError::validation(format!("invalid status: {raw}")))?;
            existing.status = status;
        }

        if let Some(note) = data.note {
            existing.note = note;
        }

        if let Some(items) = &data.items {
            let priced = validator::validate_and_price(&self.pool, tenant_id, items).await?;
            existing.items = priced.lines;
            existing.sub_total = priced.totals.sub_total;
            existing.tax_total = priced.totals.tax_total;
            existing.grand_total = priced.totals.grand_total;
        }

        existing.updated_by = actor.clone();
        existing.updated_at = Utc::now();

        order::save(&self.pool, &existing).await?;

        self.events
            .publish(BusEvent::new(
                tenant_id,
                RESOURCE,
                &existing.id,
                "updated",
                Some(&existing),
            ))
            .await;

        Ok(existing)
    }

    pub async fn delete(&self, tenant_id: &str, id: &str) -> AppResult<()> {
        // Ensure the order exists within this tenant before deleting
        self.get(tenant_id, id).await?;
        order::delete(&self.pool, tenant_id, id).await?;

        // The body no longer exists; announce the identifier only
        self.events
            .publish(BusEvent::new::<()>(tenant_id, RESOURCE, id, "deleted", None))
            .await;

        Ok(())
    }
}
