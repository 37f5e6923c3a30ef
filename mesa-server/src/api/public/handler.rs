//! Public QR ordering handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use sqlx::SqlitePool;

use crate::core::ServerState;
use crate::db::repository::{
    category, dining_table, item_option_group, menu_item, menu_option, menu_variant,
    option_group, qr_token,
};
use crate::orders::OrderService;
use crate::utils::{AppError, AppResult};
use shared::models::{Actor, DiningTable, Order};
use shared::request::PublicOrderCreate;
use shared::response::{MenuItemDetail, OptionGroupDetail, PublicMenu};

/// Resolve an active token to its table. An invalid, revoked, or expired
/// token reads as not-found to avoid leaking anything about other tenants.
async fn table_for_token(state: &ServerState, token: &str) -> AppResult<(String, DiningTable)> {
    let record = qr_token::find_active(&state.pool, token)
        .await?
        .ok_or_else(|| AppError::not_found("invalid or expired QR token"))?;

    let table = dining_table::find_by_id(&state.pool, &record.tenant_id, &record.table_id)
        .await?
        .filter(|t| t.is_active)
        .ok_or_else(|| AppError::not_found("invalid or expired QR token"))?;

    Ok((record.tenant_id, table))
}

/// GET /api/public/tables/{token} - table identity for the landing page
pub async fn resolve_table(
    State(state): State<ServerState>,
    Path(token): Path<String>,
) -> AppResult<Json<Value>> {
    let (_, table) = table_for_token(&state, &token).await?;
    Ok(Json(json!({
        "table_number": table.number,
        "table_name": table.name,
    })))
}

/// Assemble the guest-facing catalog. Unavailable items, variants, and
/// options are dropped, as are deactivated option groups; orders against a
/// deactivated group's options still validate, the group is only hidden.
pub async fn available_menu(pool: &SqlitePool, tenant_id: &str) -> AppResult<PublicMenu> {
    let categories = category::find_all(pool, tenant_id).await?;
    let items = menu_item::find_all(pool, tenant_id, None).await?;

    let mut details = Vec::with_capacity(items.len());
    for item in items.into_iter().filter(|i| i.is_available) {
        let variants: Vec<_> = menu_variant::find_by_item(pool, tenant_id, &item.id)
            .await?
            .into_iter()
            .filter(|v| v.is_available)
            .collect();

        let group_ids = item_option_group::group_ids_for_item(pool, tenant_id, &item.id).await?;
        let mut option_groups = Vec::with_capacity(group_ids.len());
        for group_id in &group_ids {
            let Some(group) = option_group::find_by_id(pool, tenant_id, group_id).await? else {
                continue;
            };
            if !group.is_active {
                continue;
            }
            let options = menu_option::find_by_group(pool, tenant_id, group_id)
                .await?
                .into_iter()
                .filter(|o| o.is_available)
                .collect();
            option_groups.push(OptionGroupDetail { group, options });
        }

        details.push(MenuItemDetail {
            item,
            variants,
            option_groups,
        });
    }

    Ok(PublicMenu {
        categories,
        items: details,
    })
}

/// GET /api/public/menu/{token} - the available catalog for a scanned table
pub async fn menu(
    State(state): State<ServerState>,
    Path(token): Path<String>,
) -> AppResult<Json<PublicMenu>> {
    let (tenant_id, _) = table_for_token(&state, &token).await?;
    let menu = available_menu(&state.pool, &tenant_id).await?;
    Ok(Json(menu))
}

/// POST /api/public/orders - place an order as a guest
pub async fn create_order(
    State(state): State<ServerState>,
    Json(payload): Json<PublicOrderCreate>,
) -> AppResult<Json<Order>> {
    let (tenant_id, table) = table_for_token(&state, &payload.token).await?;

    let service = OrderService::new(state.pool.clone(), state.publisher());
    let order = service
        .create_for_table(
            &tenant_id,
            &table,
            &Actor::guest(),
            payload.note,
            &payload.items,
        )
        .await?;
    Ok(Json(order))
}
