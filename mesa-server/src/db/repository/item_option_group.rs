//! Item and option group attachment repository

use shared::models::ItemOptionGroup;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult, menu_item, option_group};

/// Group ids attached to one item
pub async fn group_ids_for_item(
    pool: &SqlitePool,
    tenant_id: &str,
    item_id: &str,
) -> RepoResult<Vec<String>> {
    let ids: Vec<String> = sqlx::query_scalar(
        "SELECT group_id FROM item_option_group WHERE tenant_id = ? AND item_id = ?",
    )
    .bind(tenant_id)
    .bind(item_id)
    .fetch_all(pool)
    .await?;
    Ok(ids)
}

/// All attachments for a set of items, fetched in one query
pub async fn find_for_items(
    pool: &SqlitePool,
    tenant_id: &str,
    item_ids: &[String],
) -> RepoResult<Vec<ItemOptionGroup>> {
    if item_ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut builder = sqlx::QueryBuilder::new(
        "SELECT tenant_id, item_id, group_id FROM item_option_group WHERE tenant_id = ",
    );
    builder.push_bind(tenant_id);
    builder.push(" AND item_id IN (");
    let mut separated = builder.separated(", ");
    for id in item_ids {
        separated.push_bind(id);
    }
    separated.push_unseparated(")");

    let rows = builder
        .build_query_as::<ItemOptionGroup>()
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn attach(
    pool: &SqlitePool,
    tenant_id: &str,
    item_id: &str,
    group_id: &str,
) -> RepoResult<()> {
    if menu_item::find_by_id(pool, tenant_id, item_id)
        .await?
        .is_none()
    {
        return Err(RepoError::NotFound(format!(
            "menu item {item_id} not found"
        )));
    }
    if option_group::find_by_id(pool, tenant_id, group_id)
        .await?
        .is_none()
    {
        return Err(RepoError::NotFound(format!(
            "option group {group_id} not found"
        )));
    }

    sqlx::query(
        "INSERT OR IGNORE INTO item_option_group (tenant_id, item_id, group_id) VALUES (?, ?, ?)",
    )
    .bind(tenant_id)
    .bind(item_id)
    .bind(group_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn detach(
    pool: &SqlitePool,
    tenant_id: &str,
    item_id: &str,
    group_id: &str,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "DELETE FROM item_option_group WHERE tenant_id = ? AND item_id = ? AND group_id = ?",
    )
    .bind(tenant_id)
    .bind(item_id)
    .bind(group_id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}
