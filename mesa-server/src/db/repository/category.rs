//! Menu Category Repository

use chrono::Utc;
use shared::models::{MenuCategory, MenuCategoryCreate, MenuCategoryUpdate};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{RepoError, RepoResult};

pub async fn find_all(pool: &SqlitePool, tenant_id: &str) -> RepoResult<Vec<MenuCategory>> {
    let categories = sqlx::query_as::<_, MenuCategory>(
        "SELECT * FROM menu_category WHERE tenant_id = ? ORDER BY sort_order, name",
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await?;
    Ok(categories)
}

pub async fn find_by_id(
    pool: &SqlitePool,
    tenant_id: &str,
    id: &str,
) -> RepoResult<Option<MenuCategory>> {
    let category = sqlx::query_as::<_, MenuCategory>(
        "SELECT * FROM menu_category WHERE tenant_id = ? AND id = ?",
    )
    .bind(tenant_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(category)
}

pub async fn create(
    pool: &SqlitePool,
    tenant_id: &str,
    data: MenuCategoryCreate,
) -> RepoResult<MenuCategory> {
    if data.name.trim().is_empty() {
        return Err(RepoError::Validation("name is required".into()));
    }
    if let Some(parent_id) = &data.parent_id {
        if find_by_id(pool, tenant_id, parent_id).await?.is_none() {
            return Err(RepoError::NotFound(format!(
                "parent category {parent_id} not found"
            )));
        }
    }

    let id = Uuid::new_v4().to_string();
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO menu_category (id, tenant_id, name, parent_id, sort_order, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(tenant_id)
    .bind(data.name.trim())
    .bind(&data.parent_id)
    .bind(data.sort_order.unwrap_or(0))
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, tenant_id, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

pub async fn update(
    pool: &SqlitePool,
    tenant_id: &str,
    id: &str,
    data: MenuCategoryUpdate,
) -> RepoResult<MenuCategory> {
    let rows = sqlx::query(
        "UPDATE menu_category
         SET name = COALESCE(?, name),
             parent_id = COALESCE(?, parent_id),
             sort_order = COALESCE(?, sort_order),
             updated_at = ?
         WHERE tenant_id = ? AND id = ?",
    )
    .bind(&data.name)
    .bind(&data.parent_id)
    .bind(data.sort_order)
    .bind(Utc::now())
    .bind(tenant_id)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("category {id} not found")));
    }
    find_by_id(pool, tenant_id, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("category {id} not found")))
}

pub async fn delete(pool: &SqlitePool, tenant_id: &str, id: &str) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM menu_item WHERE tenant_id = ? AND category_id = ?",
    )
    .bind(tenant_id)
    .bind(id)
    .fetch_one(pool)
    .await?;
    if count > 0 {
        return Err(RepoError::Validation(
            "cannot delete category with menu items".into(),
        ));
    }

    let rows = sqlx::query("DELETE FROM menu_category WHERE tenant_id = ? AND id = ?")
        .bind(tenant_id)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("category {id} not found")));
    }
    Ok(true)
}
