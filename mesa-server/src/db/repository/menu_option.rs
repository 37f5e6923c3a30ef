//! Menu Option Repository

use chrono::Utc;
use shared::models::{MenuOption, MenuOptionCreate, MenuOptionUpdate};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{RepoError, RepoResult, option_group};

pub async fn find_by_group(
    pool: &SqlitePool,
    tenant_id: &str,
    group_id: &str,
) -> RepoResult<Vec<MenuOption>> {
    let options = sqlx::query_as::<_, MenuOption>(
        "SELECT * FROM menu_option WHERE tenant_id = ? AND group_id = ? ORDER BY sort_order, name",
    )
    .bind(tenant_id)
    .bind(group_id)
    .fetch_all(pool)
    .await?;
    Ok(options)
}

pub async fn find_by_id(
    pool: &SqlitePool,
    tenant_id: &str,
    id: &str,
) -> RepoResult<Option<MenuOption>> {
    let option = sqlx::query_as::<_, MenuOption>(
        "SELECT * FROM menu_option WHERE tenant_id = ? AND id = ?",
    )
    .bind(tenant_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(option)
}

pub async fn create(
    pool: &SqlitePool,
    tenant_id: &str,
    group_id: &str,
    data: MenuOptionCreate,
) -> RepoResult<MenuOption> {
    if data.name.trim().is_empty() {
        return Err(RepoError::Validation("name is required".into()));
    }
    let price = data.price.unwrap_or(0.0);
    if price < 0.0 {
        return Err(RepoError::Validation("price must be >= 0".into()));
    }
    if option_group::find_by_id(pool, tenant_id, group_id)
        .await?
        .is_none()
    {
        return Err(RepoError::NotFound(format!(
            "option group {group_id} not found"
        )));
    }

    let id = Uuid::new_v4().to_string();
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO menu_option (id, tenant_id, group_id, name, price, sort_order, is_available, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(&id)
    .bind(tenant_id)
    .bind(group_id)
    .bind(data.name.trim())
    .bind(price)
    .bind(data.sort_order.unwrap_or(0))
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, tenant_id, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create option".into()))
}

pub async fn update(
    pool: &SqlitePool,
    tenant_id: &str,
    id: &str,
    data: MenuOptionUpdate,
) -> RepoResult<MenuOption> {
    if let Some(price) = data.price {
        if price < 0.0 {
            return Err(RepoError::Validation("price must be >= 0".into()));
        }
    }
    let rows = sqlx::query(
        "UPDATE menu_option
         SET name = COALESCE(?, name),
             price = COALESCE(?, price),
             sort_order = COALESCE(?, sort_order),
             is_available = COALESCE(?, is_available),
             updated_at = ?
         WHERE tenant_id = ? AND id = ?",
    )
    .bind(&data.name)
    .bind(data.price)
    .bind(data.sort_order)
    .bind(data.is_available)
    .bind(Utc::now())
    .bind(tenant_id)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("option {id} not found")));
    }
    find_by_id(pool, tenant_id, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("option {id} not found")))
}

pub async fn delete(pool: &SqlitePool, tenant_id: &str, id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM menu_option WHERE tenant_id = ? AND id = ?")
        .bind(tenant_id)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("option {id} not found")));
    }
    Ok(true)
}
