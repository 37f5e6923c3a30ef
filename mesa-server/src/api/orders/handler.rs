//! Order API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::order::OrderFilter;
use crate::orders::OrderService;
use crate::utils::{AppError, AppResult, PageParams};
use shared::models::{Order, OrderStatus};
use shared::request::{OrderCreate, OrderUpdate, PageQuery};
use shared::response::{Paginated, Pagination};

fn service(state: &ServerState) -> OrderService {
    OrderService::new(state.pool.clone(), state.publisher())
}

pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<Order>>> {
    let params = PageParams::from_query(&query)?;
    let status = match &query.status {
        Some(raw) => Some(
            OrderStatus::parse(raw)
                .ok_or_else(|| AppError::validation(format!("invalid status: {raw}")))?,
        ),
        None => None,
    };
    let filter = OrderFilter {
        status,
        table_id: query.table_id.clone(),
    };

    let (orders, total) = service(&state)
        .list(&user.tenant_id, &filter, params.limit, params.offset())
        .await?;
    Ok(Json(Paginated {
        data: orders,
        pagination: Pagination::new(params.page, params.limit, total),
    }))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = service(&state).get(&user.tenant_id, &id).await?;
    Ok(Json(order))
}

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    let order = service(&state)
        .create(&user.tenant_id, &user.actor(), payload)
        .await?;
    Ok(Json(order))
}

pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<Order>> {
    let order = service(&state)
        .update(&user.tenant_id, &id, &user.actor(), payload)
        .await?;
    Ok(Json(order))
}

pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    service(&state).delete(&user.tenant_id, &id).await?;
    Ok(Json(true))
}
