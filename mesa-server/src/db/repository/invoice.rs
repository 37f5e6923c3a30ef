//! Invoice Repository
//!
//! The UNIQUE (tenant_id, order_id) index is the true enforcer of the
//! one-invoice-per-order rule; the service-level existence check only
//! produces a friendlier error first.

use chrono::{DateTime, Utc};
use shared::models::{Actor, DiscountType, Invoice, InvoiceStatus, OrderLine, Payment};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

#[derive(sqlx::FromRow)]
struct InvoiceRow {
    id: String,
    tenant_id: String,
    order_id: String,
    table_id: String,
    table_number: i64,
    table_name: String,
    status: String,
    note: String,
    items: String,
    sub_total: f64,
    tax_total: f64,
    grand_total: f64,
    discount_type: Option<String>,
    discount_value: f64,
    discount_amount: f64,
    total_due: f64,
    payment: Option<String>,
    created_by: String,
    updated_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl InvoiceRow {
    fn into_invoice(self) -> RepoResult<Invoice> {
        let status = InvoiceStatus::parse(&self.status).ok_or_else(|| {
            RepoError::Database(format!("invalid invoice status: {}", self.status))
        })?;
        let discount_type = match &self.discount_type {
            Some(raw) => Some(DiscountType::parse(raw).ok_or_else(|| {
                RepoError::Database(format!("invalid discount type: {raw}"))
            })?),
            None => None,
        };
        let items: Vec<OrderLine> = serde_json::from_str(&self.items)?;
        let payment: Option<Payment> = match &self.payment {
            Some(raw) => Some(serde_json::from_str(raw)?),
            None => None,
        };
        let created_by: Actor = serde_json::from_str(&self.created_by)?;
        let updated_by: Actor = serde_json::from_str(&self.updated_by)?;
        Ok(Invoice {
            id: self.id,
            tenant_id: self.tenant_id,
            order_id: self.order_id,
            table_id: self.table_id,
            table_number: self.table_number,
            table_name: self.table_name,
            status,
            note: self.note,
            items,
            sub_total: self.sub_total,
            tax_total: self.tax_total,
            grand_total: self.grand_total,
            discount_type,
            discount_value: self.discount_value,
            discount_amount: self.discount_amount,
            total_due: self.total_due,
            payment,
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
) -> RepoResult<Option<Invoice>> {
    let row =
        sqlx::query_as::<_, InvoiceRow>("SELECT * FROM invoice WHERE tenant_id = ? AND id = ?")
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(pool)
            .await?;
    row.map(InvoiceRow::into_invoice).transpose()
}

pub async fn find_by_order(
    pool: &SqlitePool,
    tenant_id: &str,
    order_id: &str,
) -> RepoResult<Option<Invoice>> {
    let row = sqlx::query_as::<_, InvoiceRow>(
        "SELECT * FROM invoice WHERE tenant_id = ? AND order_id = ?",
    )
    .bind(tenant_id)
    .bind(order_id)
    .fetch_optional(pool)
    .await?;
    row.map(InvoiceRow::into_invoice).transpose()
}

/// List invoices newest-first with pagination
pub async fn list(
    pool: &SqlitePool,
    tenant_id: &str,
    status: Option<InvoiceStatus>,
    limit: i64,
    offset: i64,
) -> RepoResult<(Vec<Invoice>, i64)> {
    let mut builder = sqlx::QueryBuilder::new("SELECT * FROM invoice WHERE tenant_id = ");
    builder.push_bind(tenant_id);
    if let Some(status) = status {
        builder.push(" AND status = ");
        builder.push_bind(status.as_str());
    }
    builder.push(" ORDER BY created_at DESC LIMIT ");
    builder.push_bind(limit);
    builder.push(" OFFSET ");
    builder.push_bind(offset);

    let rows = builder
        .build_query_as::<InvoiceRow>()
        .fetch_all(pool)
        .await?;
    let invoices = rows
        .into_iter()
        .map(InvoiceRow::into_invoice)
        .collect::<RepoResult<Vec<_>>>()?;

    let mut count_builder =
        sqlx::QueryBuilder::new("SELECT COUNT(*) FROM invoice WHERE tenant_id = ");
    count_builder.push_bind(tenant_id);
    if let Some(status) = status {
        count_builder.push(" AND status = ");
        count_builder.push_bind(status.as_str());
    }
    let total: i64 = count_builder.build_query_scalar().fetch_one(pool).await?;

    Ok((invoices, total))
}

pub async fn insert(pool: &SqlitePool, invoice: &Invoice) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO invoice (id, tenant_id, order_id, table_id, table_number, table_name, status, note, items, sub_total, tax_total, grand_total, discount_type, discount_value, discount_amount, total_due, payment, created_by, updated_by, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&invoice.id)
    .bind(&invoice.tenant_id)
    .bind(&invoice.order_id)
    .bind(&invoice.table_id)
    .bind(invoice.table_number)
    .bind(&invoice.table_name)
    .bind(invoice.status.as_str())
    .bind(&invoice.note)
    .bind(serde_json::to_string(&invoice.items)?)
    .bind(invoice.sub_total)
    .bind(invoice.tax_total)
    .bind(invoice.grand_total)
    .bind(invoice.discount_type.map(|t| t.as_str()))
    .bind(invoice.discount_value)
    .bind(invoice.discount_amount)
    .bind(invoice.total_due)
    .bind(match &invoice.payment {
        Some(payment) => Some(serde_json::to_string(payment)?),
        None => None,
    })
    .bind(serde_json::to_string(&invoice.created_by)?)
    .bind(serde_json::to_string(&invoice.updated_by)?)
    .bind(invoice.created_at)
    .bind(invoice.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Persist the mutable fields of an already-loaded invoice
pub async fn save(pool: &SqlitePool, invoice: &Invoice) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE invoice
         SET status = ?, note = ?, discount_type = ?, discount_value = ?,
             discount_amount = ?, total_due = ?, payment = ?,
             updated_by = ?, updated_at = ?
         WHERE tenant_id = ? AND id = ?",
    )
    .bind(invoice.status.as_str())
    .bind(&invoice.note)
    .bind(invoice.discount_type.map(|t| t.as_str()))
    .bind(invoice.discount_value)
    .bind(invoice.discount_amount)
    .bind(invoice.total_due)
    .bind(match &invoice.payment {
        Some(payment) => Some(serde_json::to_string(payment)?),
        None => None,
    })
    .bind(serde_json::to_string(&invoice.updated_by)?)
    .bind(invoice.updated_at)
    .bind(&invoice.tenant_id)
    .bind(&invoice.id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "invoice {} not found",
            invoice.id
        )));
    }
    Ok(())
}

pub async fn delete(pool: &SqlitePool, tenant_id: &str, id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM invoice WHERE tenant_id = ? AND id = ?")
        .bind(tenant_id)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("invoice {id} not found")));
    }
    Ok(true)
}
