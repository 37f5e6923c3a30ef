//! Order Repository
//!
//! Orders persist as one row per aggregate: the lines and actor snapshots
//! live in JSON columns and are decoded on read. Status filtering and
//! pagination happen in SQL; line contents never do.

use chrono::{DateTime, Utc};
use shared::models::{Actor, Order, OrderLine, OrderStatus};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

/// Optional list filters
#[derive(Debug, Default, Clone)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub table_id: Option<String>,
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: String,
    tenant_id: String,
    table_id: String,
    table_number: i64,
    table_name: String,
    status: String,
    note: String,
    items: String,
    sub_total: f64,
    tax_total: f64,
    grand_total: f64,
    created_by: String,
    updated_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> RepoResult<Order> {
        let status = OrderStatus::parse(&self.status)
            .ok_or_else(|| RepoError::Database(format!("invalid order status: {}", self.status)))?;
        let items: Vec<OrderLine> = serde_json::from_str(&self.items)?;
        let created_by: Actor = serde_json::from_str(&self.created_by)?;
        let updated_by: Actor = serde_json::from_str(&self.updated_by)?;
        Ok(Order {
            id: self.id,
            tenant_id: self.tenant_id,
            table_id: self.table_id,
            table_number: self.table_number,
            table_name: self.table_name,
            status,
            note: self.note,
            items,
            sub_total: self.sub_total,
            tax_total: self.tax_total,
            grand_total: self.grand_total,
            created_by,
            updated_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

pub async fn find_by_id(
    pool: &SqlitePool,
    tenant_id: &str,
    id: &str,
) -> RepoResult<Option<Order>> {
    let row =
        sqlx::query_as::<_, OrderRow>("SELECT * FROM customer_order WHERE tenant_id = ? AND id = ?")
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(pool)
            .await?;
    row.map(OrderRow::into_order).transpose()
}

/// List orders newest-first with pagination, returning the page and the
/// total match count.
pub async fn list(
    pool: &SqlitePool,
    tenant_id: &str,
    filter: &OrderFilter,
    limit: i64,
    offset: i64,
) -> RepoResult<(Vec<Order>, i64)> {
    let mut builder = sqlx::QueryBuilder::new("SELECT * FROM customer_order WHERE tenant_id = ");
    builder.push_bind(tenant_id);
    if let Some(status) = filter.status {
        builder.push(" AND status = ");
        builder.push_bind(status.as_str());
    }
    if let Some(table_id) = &filter.table_id {
        builder.push(" AND table_id = ");
        builder.push_bind(table_id);
    }
    builder.push(" ORDER BY created_at DESC LIMIT ");
    builder.push_bind(limit);
    builder.push(" OFFSET ");
    builder.push_bind(offset);

    let rows = builder.build_query_as::<OrderRow>().fetch_all(pool).await?;
    let orders = rows
        .into_iter()
        .map(OrderRow::into_order)
        .collect::<RepoResult<Vec<_>>>()?;

    let mut count_builder =
        sqlx::QueryBuilder::new("SELECT COUNT(*) FROM customer_order WHERE tenant_id = ");
    count_builder.push_bind(tenant_id);
    if let Some(status) = filter.status {
        count_builder.push(" AND status = ");
        count_builder.push_bind(status.as_str());
    }
    if let Some(table_id) = &filter.table_id {
        count_builder.push(" AND table_id = ");
        count_builder.push_bind(table_id);
    }
    let total: i64 = count_builder.build_query_scalar().fetch_one(pool).await?;

    Ok((orders, total))
}

pub async fn insert(pool: &SqlitePool, order: &Order) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO customer_order (id, tenant_id, table_id, table_number, table_name, status, note, items, sub_total, tax_total, grand_total, created_by, updated_by, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&order.id)
    .bind(&order.tenant_id)
    .bind(&order.table_id)
    .bind(order.table_number)
    .bind(&order.table_name)
    .bind(order.status.as_str())
    .bind(&order.note)
    .bind(serde_json::to_string(&order.items)?)
    .bind(order.sub_total)
    .bind(order.tax_total)
    .bind(order.grand_total)
    .bind(serde_json::to_string(&order.created_by)?)
    .bind(serde_json::to_string(&order.updated_by)?)
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Persist the full current state of an already-loaded order
pub async fn save(pool: &SqlitePool, order: &Order) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE customer_order
         SET table_id = ?, table_number = ?, table_name = ?, status = ?, note = ?,
             items = ?, sub_total = ?, tax_total = ?, grand_total = ?,
             updated_by = ?, updated_at = ?
         WHERE tenant_id = ? AND id = ?",
    )
    .bind(&order.table_id)
    .bind(order.table_number)
    .bind(&order.table_name)
    .bind(order.status.as_str())
    .bind(&order.note)
    .bind(serde_json::to_string(&order.items)?)
    .bind(order.sub_total)
    .bind(order.tax_total)
    .bind(order.grand_total)
    .bind(serde_json::to_string(&order.updated_by)?)
    .bind(order.updated_at)
    .bind(&order.tenant_id)
    .bind(&order.id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("order {} not found", order.id)));
    }
    Ok(())
}

pub async fn delete(pool: &SqlitePool, tenant_id: &str, id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM customer_order WHERE tenant_id = ? AND id = ?")
        .bind(tenant_id)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("order {id} not found")));
    }
    Ok(true)
}
