//! Menu catalog API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{
    category, item_option_group, menu_item, menu_option, menu_variant, option_group,
};
use crate::utils::{AppError, AppResult};
use shared::models::{
    MenuCategory, MenuCategoryCreate, MenuCategoryUpdate, MenuItem, MenuItemCreate, MenuItemUpdate,
    MenuOption, MenuOptionCreate, MenuOptionUpdate, MenuVariant, MenuVariantCreate,
    MenuVariantUpdate, OptionGroup, OptionGroupCreate, OptionGroupUpdate,
};
use shared::response::{MenuItemDetail, OptionGroupDetail};

// ========== Categories ==========

pub async fn list_categories(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<MenuCategory>>> {
    let categories = category::find_all(&state.pool, &user.tenant_id).await?;
    Ok(Json(categories))
}

pub async fn get_category(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<MenuCategory>> {
    let found = category::find_by_id(&state.pool, &user.tenant_id, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("category {id} not found")))?;
    Ok(Json(found))
}

pub async fn create_category(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<MenuCategoryCreate>,
) -> AppResult<Json<MenuCategory>> {
    let created = category::create(&state.pool, &user.tenant_id, payload).await?;
    state
        .broadcast_sync(&user.tenant_id, "category", &created.id, "created", Some(&created))
        .await;
    Ok(Json(created))
}

pub async fn update_category(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<MenuCategoryUpdate>,
) -> AppResult<Json<MenuCategory>> {
    let updated = category::update(&state.pool, &user.tenant_id, &id, payload).await?;
    state
        .broadcast_sync(&user.tenant_id, "category", &id, "updated", Some(&updated))
        .await;
    Ok(Json(updated))
}

pub async fn delete_category(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = category::delete(&state.pool, &user.tenant_id, &id).await?;
    state
        .broadcast_sync::<()>(&user.tenant_id, "category", &id, "deleted", None)
        .await;
    Ok(Json(deleted))
}

// ========== Items ==========

#[derive(Debug, Deserialize)]
pub struct ItemListQuery {
    pub category_id: Option<String>,
}

pub async fn list_items(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ItemListQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let items =
        menu_item::find_all(&state.pool, &user.tenant_id, query.category_id.as_deref()).await?;
    Ok(Json(items))
}

/// Assemble an item with its variants and attached option groups
async fn item_detail(
    pool: &SqlitePool,
    tenant_id: &str,
    item: MenuItem,
) -> AppResult<MenuItemDetail> {
    let variants = menu_variant::find_by_item(pool, tenant_id, &item.id).await?;
    let group_ids = item_option_group::group_ids_for_item(pool, tenant_id, &item.id).await?;

    let mut option_groups = Vec::with_capacity(group_ids.len());
    for group_id in &group_ids {
        if let Some(group) = option_group::find_by_id(pool, tenant_id, group_id).await? {
            let options = menu_option::find_by_group(pool, tenant_id, group_id).await?;
            option_groups.push(OptionGroupDetail { group, options });
        }
    }

    Ok(MenuItemDetail {
        item,
        variants,
        option_groups,
    })
}

pub async fn get_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItemDetail>> {
    let item = menu_item::find_by_id(&state.pool, &user.tenant_id, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("menu item {id} not found")))?;
    let detail = item_detail(&state.pool, &user.tenant_id, item).await?;
    Ok(Json(detail))
}

pub async fn create_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItemDetail>> {
    let created = menu_item::create(&state.pool, &user.tenant_id, payload).await?;
    state
        .broadcast_sync(&user.tenant_id, "menu_item", &created.id, "created", Some(&created))
        .await;
    let detail = item_detail(&state.pool, &user.tenant_id, created).await?;
    Ok(Json(detail))
}

pub async fn update_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    let updated = menu_item::update(&state.pool, &user.tenant_id, &id, payload).await?;
    state
        .broadcast_sync(&user.tenant_id, "menu_item", &id, "updated", Some(&updated))
        .await;
    Ok(Json(updated))
}

pub async fn delete_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = menu_item::delete(&state.pool, &user.tenant_id, &id).await?;
    state
        .broadcast_sync::<()>(&user.tenant_id, "menu_item", &id, "deleted", None)
        .await;
    Ok(Json(deleted))
}

/// GET /api/menu/full - the whole catalog, assembled for client sync
pub async fn full_menu(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<MenuItemDetail>>> {
    let items = menu_item::find_all(&state.pool, &user.tenant_id, None).await?;
    let mut details = Vec::with_capacity(items.len());
    for item in items {
        details.push(item_detail(&state.pool, &user.tenant_id, item).await?);
    }
    Ok(Json(details))
}

// ========== Variants ==========

pub async fn create_variant(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(item_id): Path<String>,
    Json(payload): Json<MenuVariantCreate>,
) -> AppResult<Json<MenuVariant>> {
    let item = menu_item::find_by_id(&state.pool, &user.tenant_id, &item_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("menu item {item_id} not found"))
        })?;
    let created = menu_variant::create(&state.pool, &user.tenant_id, &item.id, payload).await?;
    state
        .broadcast_sync(&user.tenant_id, "menu_variant", &created.id, "created", Some(&created))
        .await;
    Ok(Json(created))
}

pub async fn update_variant(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<MenuVariantUpdate>,
) -> AppResult<Json<MenuVariant>> {
    let updated = menu_variant::update(&state.pool, &user.tenant_id, &id, payload).await?;
    state
        .broadcast_sync(&user.tenant_id, "menu_variant", &id, "updated", Some(&updated))
        .await;
    Ok(Json(updated))
}

pub async fn delete_variant(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = menu_variant::delete(&state.pool, &user.tenant_id, &id).await?;
    state
        .broadcast_sync::<()>(&user.tenant_id, "menu_variant", &id, "deleted", None)
        .await;
    Ok(Json(deleted))
}

// ========== Option groups ==========

pub async fn list_groups(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<OptionGroup>>> {
    let groups = option_group::find_all(&state.pool, &user.tenant_id).await?;
    Ok(Json(groups))
}

pub async fn get_group(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<OptionGroupDetail>> {
    let group = option_group::find_by_id(&state.pool, &user.tenant_id, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("option group {id} not found")))?;
    let options = menu_option::find_by_group(&state.pool, &user.tenant_id, &id).await?;
    Ok(Json(OptionGroupDetail { group, options }))
}

pub async fn create_group(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<OptionGroupCreate>,
) -> AppResult<Json<OptionGroup>> {
    let created = option_group::create(&state.pool, &user.tenant_id, payload).await?;
    state
        .broadcast_sync(&user.tenant_id, "option_group", &created.id, "created", Some(&created))
        .await;
    Ok(Json(created))
}

pub async fn update_group(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<OptionGroupUpdate>,
) -> AppResult<Json<OptionGroup>> {
    let updated = option_group::update(&state.pool, &user.tenant_id, &id, payload).await?;
    state
        .broadcast_sync(&user.tenant_id, "option_group", &id, "updated", Some(&updated))
        .await;
    Ok(Json(updated))
}

pub async fn delete_group(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = option_group::delete(&state.pool, &user.tenant_id, &id).await?;
    state
        .broadcast_sync::<()>(&user.tenant_id, "option_group", &id, "deleted", None)
        .await;
    Ok(Json(deleted))
}

// ========== Options ==========

pub async fn create_option(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(group_id): Path<String>,
    Json(payload): Json<MenuOptionCreate>,
) -> AppResult<Json<MenuOption>> {
    let created = menu_option::create(&state.pool, &user.tenant_id, &group_id, payload).await?;
    state
        .broadcast_sync(&user.tenant_id, "menu_option", &created.id, "created", Some(&created))
        .await;
    Ok(Json(created))
}

pub async fn update_option(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<MenuOptionUpdate>,
) -> AppResult<Json<MenuOption>> {
    let updated = menu_option::update(&state.pool, &user.tenant_id, &id, payload).await?;
    state
        .broadcast_sync(&user.tenant_id, "menu_option", &id, "updated", Some(&updated))
        .await;
    Ok(Json(updated))
}

pub async fn delete_option(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = menu_option::delete(&state.pool, &user.tenant_id, &id).await?;
    state
        .broadcast_sync::<()>(&user.tenant_id, "menu_option", &id, "deleted", None)
        .await;
    Ok(Json(deleted))
}

// ========== Item / group attachments ==========

pub async fn attach_group(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((item_id, group_id)): Path<(String, String)>,
) -> AppResult<Json<bool>> {
    item_option_group::attach(&state.pool, &user.tenant_id, &item_id, &group_id).await?;
    state
        .broadcast_sync::<()>(&user.tenant_id, "menu_item", &item_id, "updated", None)
        .await;
    Ok(Json(true))
}

pub async fn detach_group(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((item_id, group_id)): Path<(String, String)>,
) -> AppResult<Json<bool>> {
    let detached =
        item_option_group::detach(&state.pool, &user.tenant_id, &item_id, &group_id).await?;
    if detached {
        state
            .broadcast_sync::<()>(&user.tenant_id, "menu_item", &item_id, "updated", None)
            .await;
    }
    Ok(Json(detached))
}
