//! Menu Item Repository
//!
//! Item creation is an aggregate write: the item row, its variants, and its
//! option-group attachments commit in one transaction or not at all.

use chrono::Utc;
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{RepoError, RepoResult, category, option_group};

pub async fn find_all(
    pool: &SqlitePool,
    tenant_id: &str,
    category_id: Option<&str>,
) -> RepoResult<Vec<MenuItem>> {
    let items = match category_id {
        Some(category_id) => {
            sqlx::query_as::<_, MenuItem>(
                "SELECT * FROM menu_item WHERE tenant_id = ? AND category_id = ? ORDER BY sort_order, name",
            )
            .bind(tenant_id)
            .bind(category_id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, MenuItem>(
                "SELECT * FROM menu_item WHERE tenant_id = ? ORDER BY sort_order, name",
            )
            .bind(tenant_id)
            .fetch_all(pool)
            .await?
        }
    };
    Ok(items)
}

pub async fn find_by_id(
    pool: &SqlitePool,
    tenant_id: &str,
    id: &str,
) -> RepoResult<Option<MenuItem>> {
    let item =
        sqlx::query_as::<_, MenuItem>("SELECT * FROM menu_item WHERE tenant_id = ? AND id = ?")
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(item)
}

pub async fn create(
    pool: &SqlitePool,
    tenant_id: &str,
    data: MenuItemCreate,
) -> RepoResult<MenuItem> {
    if data.name.trim().is_empty() {
        return Err(RepoError::Validation("name is required".into()));
    }
    let tax = data.tax_percentage.unwrap_or(0.0);
    if !(0.0..=100.0).contains(&tax) {
        return Err(RepoError::Validation(
            "tax_percentage must be between 0 and 100".into(),
        ));
    }
    for variant in &data.variants {
        if variant.name.trim().is_empty() {
            return Err(RepoError::Validation("variant name is required".into()));
        }
        if variant.price < 0.0 {
            return Err(RepoError::Validation("variant price must be >= 0".into()));
        }
    }

    if category::find_by_id(pool, tenant_id, &data.category_id)
        .await?
        .is_none()
    {
        return Err(RepoError::NotFound(format!(
            "category {} not found",
            data.category_id
        )));
    }
    for group_id in &data.option_group_ids {
        if option_group::find_by_id(pool, tenant_id, group_id)
            .await?
            .is_none()
        {
            return Err(RepoError::NotFound(format!(
                "option group {group_id} not found"
            )));
        }
    }

    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO menu_item (id, tenant_id, category_id, name, description, tax_percentage, sort_order, is_available, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(&id)
    .bind(tenant_id)
    .bind(&data.category_id)
    .bind(data.name.trim())
    .bind(data.description.as_deref().unwrap_or(""))
    .bind(tax)
    .bind(data.sort_order.unwrap_or(0))
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for variant in &data.variants {
        sqlx::query(
            "INSERT INTO menu_variant (id, tenant_id, item_id, name, price, sort_order, is_available, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(tenant_id)
        .bind(&id)
        .bind(variant.name.trim())
        .bind(variant.price)
        .bind(variant.sort_order.unwrap_or(0))
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    for group_id in &data.option_group_ids {
        sqlx::query(
            "INSERT INTO item_option_group (tenant_id, item_id, group_id) VALUES (?, ?, ?)",
        )
        .bind(tenant_id)
        .bind(&id)
        .bind(group_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    find_by_id(pool, tenant_id, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

pub async fn update(
    pool: &SqlitePool,
    tenant_id: &str,
    id: &str,
    data: MenuItemUpdate,
) -> RepoResult<MenuItem> {
    if let Some(tax) = data.tax_percentage {
        if !(0.0..=100.0).contains(&tax) {
            return Err(RepoError::Validation(
                "tax_percentage must be between 0 and 100".into(),
            ));
        }
    }
    if let Some(category_id) = &data.category_id {
        if category::find_by_id(pool, tenant_id, category_id)
            .await?
            .is_none()
        {
            return Err(RepoError::NotFound(format!(
                "category {category_id} not found"
            )));
        }
    }

    let rows = sqlx::query(
        "UPDATE menu_item
         SET category_id = COALESCE(?, category_id),
             name = COALESCE(?, name),
             description = COALESCE(?, description),
             tax_percentage = COALESCE(?, tax_percentage),
             sort_order = COALESCE(?, sort_order),
             is_available = COALESCE(?, is_available),
             updated_at = ?
         WHERE tenant_id = ? AND id = ?",
    )
    .bind(&data.category_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.tax_percentage)
    .bind(data.sort_order)
    .bind(data.is_available)
    .bind(Utc::now())
    .bind(tenant_id)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("menu item {id} not found")));
    }
    find_by_id(pool, tenant_id, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("menu item {id} not found")))
}

/// Hard delete an item together with its variants and attachments
pub async fn delete(pool: &SqlitePool, tenant_id: &str, id: &str) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM menu_variant WHERE tenant_id = ? AND item_id = ?")
        .bind(tenant_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM item_option_group WHERE tenant_id = ? AND item_id = ?")
        .bind(tenant_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let rows = sqlx::query("DELETE FROM menu_item WHERE tenant_id = ? AND id = ?")
        .bind(tenant_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("menu item {id} not found")));
    }
    tx.commit().await?;
    Ok(true)
}
