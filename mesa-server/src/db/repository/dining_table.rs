//! Dining Table Repository
//!
//! Table number is unique per tenant; the UNIQUE (tenant_id, number) index
//! is the enforcement point.

use chrono::Utc;
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{RepoError, RepoResult};

pub async fn find_all(pool: &SqlitePool, tenant_id: &str) -> RepoResult<Vec<DiningTable>> {
    let tables = sqlx::query_as::<_, DiningTable>(
        "SELECT * FROM dining_table WHERE tenant_id = ? ORDER BY number",
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await?;
    Ok(tables)
}

pub async fn find_by_id(
    pool: &SqlitePool,
    tenant_id: &str,
    id: &str,
) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(
        "SELECT * FROM dining_table WHERE tenant_id = ? AND id = ?",
    )
    .bind(tenant_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

pub async fn create(
    pool: &SqlitePool,
    tenant_id: &str,
    data: DiningTableCreate,
) -> RepoResult<DiningTable> {
    if data.number < 1 {
        return Err(RepoError::Validation("number must be >= 1".into()));
    }

    let id = Uuid::new_v4().to_string();
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO dining_table (id, tenant_id, number, name, capacity, is_active, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(&id)
    .bind(tenant_id)
    .bind(data.number)
    .bind(data.name.as_deref().unwrap_or(""))
    .bind(data.capacity)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await;

    match result {
        Ok(_) => {}
        Err(e) => {
            return match RepoError::from(e) {
                RepoError::Duplicate(_) => Err(RepoError::Duplicate(format!(
                    "table number {} already exists",
                    data.number
                ))),
                other => Err(other),
            };
        }
    }

    find_by_id(pool, tenant_id, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create table".into()))
}

pub async fn update(
    pool: &SqlitePool,
    tenant_id: &str,
    id: &str,
    data: DiningTableUpdate,
) -> RepoResult<DiningTable> {
    if let Some(number) = data.number {
        if number < 1 {
            return Err(RepoError::Validation("number must be >= 1".into()));
        }
    }
    let result = sqlx::query(
        "UPDATE dining_table
         SET number = COALESCE(?, number),
             name = COALESCE(?, name),
             capacity = COALESCE(?, capacity),
             is_active = COALESCE(?, is_active),
             updated_at = ?
         WHERE tenant_id = ? AND id = ?",
    )
    .bind(data.number)
    .bind(&data.name)
    .bind(data.capacity)
    .bind(data.is_active)
    .bind(Utc::now())
    .bind(tenant_id)
    .bind(id)
    .execute(pool)
    .await;

    let rows = match result {
        Ok(rows) => rows,
        Err(e) => {
            return match RepoError::from(e) {
                RepoError::Duplicate(_) => {
                    Err(RepoError::Duplicate("table number already exists".into()))
                }
                other => Err(other),
            };
        }
    };
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("table {id} not found")));
    }
    find_by_id(pool, tenant_id, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("table {id} not found")))
}

pub async fn delete(pool: &SqlitePool, tenant_id: &str, id: &str) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM table_qr_token WHERE tenant_id = ? AND table_id = ?")
        .bind(tenant_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let rows = sqlx::query("DELETE FROM dining_table WHERE tenant_id = ? AND id = ?")
        .bind(tenant_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("table {id} not found")));
    }
    tx.commit().await?;
    Ok(true)
}
