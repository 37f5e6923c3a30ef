//! Menu Variant Repository

use chrono::Utc;
use shared::models::{MenuVariant, MenuVariantCreate, MenuVariantUpdate};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{RepoError, RepoResult};

pub async fn find_by_item(
    pool: &SqlitePool,
    tenant_id: &str,
    item_id: &str,
) -> RepoResult<Vec<MenuVariant>> {
    let variants = sqlx::query_as::<_, MenuVariant>(
        "SELECT * FROM menu_variant WHERE tenant_id = ? AND item_id = ? ORDER BY sort_order, name",
    )
    .bind(tenant_id)
    .bind(item_id)
    .fetch_all(pool)
    .await?;
    Ok(variants)
}

pub async fn find_by_id(
    pool: &SqlitePool,
    tenant_id: &str,
    id: &str,
) -> RepoResult<Option<MenuVariant>> {
    let variant = sqlx::query_as::<_, MenuVariant>(
        "SELECT * FROM menu_variant WHERE tenant_id = ? AND id = ?",
    )
    .bind(tenant_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(variant)
}

pub async fn create(
    pool: &SqlitePool,
    tenant_id: &str,
    item_id: &str,
    data: MenuVariantCreate,
) -> RepoResult<MenuVariant> {
    if data.name.trim().is_empty() {
        return Err(RepoError::Validation("name is required".into()));
    }
    if data.price < 0.0 {
        return Err(RepoError::Validation("price must be >= 0".into()));
    }

    let id = Uuid::new_v4().to_string();
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO menu_variant (id, tenant_id, item_id, name, price, sort_order, is_available, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(&id)
    .bind(tenant_id)
    .bind(item_id)
    .bind(data.name.trim())
    .bind(data.price)
    .bind(data.sort_order.unwrap_or(0))
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, tenant_id, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create variant".into()))
}

pub async fn update(
    pool: &SqlitePool,
    tenant_id: &str,
    id: &str,
    data: MenuVariantUpdate,
) -> RepoResult<MenuVariant> {
    if let Some(price) = data.price {
        if price < 0.0 {
            return Err(RepoError::Validation("price must be >= 0".into()));
        }
    }
    let rows = sqlx::query(
        "UPDATE menu_variant
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
        return Err(RepoError::NotFound(format!("variant {id} not found")));
    }
    find_by_id(pool, tenant_id, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("variant {id} not found")))
}

pub async fn delete(pool: &SqlitePool, tenant_id: &str, id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM menu_variant WHERE tenant_id = ? AND id = ?")
        .bind(tenant_id)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("variant {id} not found")));
    }
    Ok(true)
}
