//! Option Group Repository

use chrono::Utc;
use shared::models::{OptionGroup, OptionGroupCreate, OptionGroupUpdate};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{RepoError, RepoResult};

pub async fn find_all(pool: &SqlitePool, tenant_id: &str) -> RepoResult<Vec<OptionGroup>> {
    let groups = sqlx::query_as::<_, OptionGroup>(
        "SELECT * FROM option_group WHERE tenant_id = ? ORDER BY sort_order, name",
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await?;
    Ok(groups)
}

pub async fn find_by_id(
    pool: &SqlitePool,
    tenant_id: &str,
    id: &str,
) -> RepoResult<Option<OptionGroup>> {
    let group = sqlx::query_as::<_, OptionGroup>(
        "SELECT * FROM option_group WHERE tenant_id = ? AND id = ?",
    )
    .bind(tenant_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(group)
}

fn check_bounds(min_select: i64, max_select: i64) -> RepoResult<()> {
    if min_select < 0 {
        return Err(RepoError::Validation("min_select must be >= 0".into()));
    }
    if max_select < min_select {
        return Err(RepoError::Validation(
            "max_select must be >= min_select".into(),
        ));
    }
    Ok(())
}

pub async fn create(
    pool: &SqlitePool,
    tenant_id: &str,
    data: OptionGroupCreate,
) -> RepoResult<OptionGroup> {
    if data.name.trim().is_empty() {
        return Err(RepoError::Validation("name is required".into()));
    }
    let min_select = data.min_select.unwrap_or(0);
    let max_select = data.max_select.unwrap_or(min_select);
    check_bounds(min_select, max_select)?;

    let id = Uuid::new_v4().to_string();
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO option_group (id, tenant_id, name, min_select, max_select, sort_order, is_active, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(&id)
    .bind(tenant_id)
    .bind(data.name.trim())
    .bind(min_select)
    .bind(max_select)
    .bind(data.sort_order.unwrap_or(0))
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, tenant_id, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create option group".into()))
}

pub async fn update(
    pool: &SqlitePool,
    tenant_id: &str,
    id: &str,
    data: OptionGroupUpdate,
) -> RepoResult<OptionGroup> {
    let existing = find_by_id(pool, tenant_id, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("option group {id} not found")))?;
    check_bounds(
        data.min_select.unwrap_or(existing.min_select),
        data.max_select.unwrap_or(existing.max_select),
    )?;

    sqlx::query(
        "UPDATE option_group
         SET name = COALESCE(?, name),
             min_select = COALESCE(?, min_select),
             max_select = COALESCE(?, max_select),
             sort_order = COALESCE(?, sort_order),
             is_active = COALESCE(?, is_active),
             updated_at = ?
         WHERE tenant_id = ? AND id = ?",
    )
    .bind(&data.name)
    .bind(data.min_select)
    .bind(data.max_select)
    .bind(data.sort_order)
    .bind(data.is_active)
    .bind(Utc::now())
    .bind(tenant_id)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, tenant_id, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("option group {id} not found")))
}

/// Hard delete a group together with its options and attachments
pub async fn delete(pool: &SqlitePool, tenant_id: &str, id: &str) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM menu_option WHERE tenant_id = ? AND group_id = ?")
        .bind(tenant_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM item_option_group WHERE tenant_id = ? AND group_id = ?")
        .bind(tenant_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let rows = sqlx::query("DELETE FROM option_group WHERE tenant_id = ? AND id = ?")
        .bind(tenant_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("option group {id} not found")));
    }
    tx.commit().await?;
    Ok(true)
}
