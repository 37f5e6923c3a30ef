//! Invoice API handlers
//!
//! Every invoice body goes out as [`InvoiceResponse`] so callers always see
//! the derived balance_due.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::invoices::InvoiceService;
use crate::utils::{AppError, AppResult, PageParams};
use shared::models::InvoiceStatus;
use shared::request::{InvoiceCreate, InvoicePay, InvoiceUpdate, PageQuery};
use shared::response::{InvoiceResponse, Paginated, Pagination};

fn service(state: &ServerState) -> InvoiceService {
    InvoiceService::new(state.pool.clone())
}

pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<InvoiceResponse>>> {
    let params = PageParams::from_query(&query)?;
    let status = match &query.status {
        Some(raw) => Some(
            InvoiceStatus::parse(raw)
                .ok_or_else(|| AppError::validation(format!("invalid status: {raw}")))?,
        ),
        None => None,
    };

    let (invoices, total) = service(&state)
        .list(&user.tenant_id, status, params.limit, params.offset())
        .await?;
    Ok(Json(Paginated {
        data: invoices.into_iter().map(InvoiceResponse::from).collect(),
        pagination: Pagination::new(params.page, params.limit, total),
    }))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<InvoiceResponse>> {
    let invoice = service(&state).get(&user.tenant_id, &id).await?;
    Ok(Json(invoice.into()))
}

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<InvoiceCreate>,
) -> AppResult<Json<InvoiceResponse>> {
    let invoice = service(&state)
        .create(&user.tenant_id, &user.actor(), payload)
        .await?;
    Ok(Json(invoice.into()))
}

pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<InvoiceUpdate>,
) -> AppResult<Json<InvoiceResponse>> {
    let invoice = service(&state)
        .update(&user.tenant_id, &id, &user.actor(), payload)
        .await?;
    Ok(Json(invoice.into()))
}

pub async fn pay(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<InvoicePay>,
) -> AppResult<Json<InvoiceResponse>> {
    let invoice = service(&state)
        .pay(&user.tenant_id, &id, &user.actor(), payload)
        .await?;
    Ok(Json(invoice.into()))
}

pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    service(&state).delete(&user.tenant_id, &id).await?;
    Ok(Json(true))
}
