//! Dining table API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{dining_table, qr_token};
use crate::utils::{AppError, AppResult};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate, TableQrToken};

const RESOURCE: &str = "dining_table";

pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = dining_table::find_all(&state.pool, &user.tenant_id).await?;
    Ok(Json(tables))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<DiningTable>> {
    let table = dining_table::find_by_id(&state.pool, &user.tenant_id, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("table {id} not found")))?;
    Ok(Json(table))
}

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    let created = dining_table::create(&state.pool, &user.tenant_id, payload).await?;
    state
        .broadcast_sync(&user.tenant_id, RESOURCE, &created.id, "created", Some(&created))
        .await;
    Ok(Json(created))
}

pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    let updated = dining_table::update(&state.pool, &user.tenant_id, &id, payload).await?;
    state
        .broadcast_sync(&user.tenant_id, RESOURCE, &id, "updated", Some(&updated))
        .await;
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = dining_table::delete(&state.pool, &user.tenant_id, &id).await?;
    state
        .broadcast_sync::<()>(&user.tenant_id, RESOURCE, &id, "deleted", None)
        .await;
    Ok(Json(deleted))
}

#[derive(Debug, Default, Deserialize)]
pub struct IssueQrPayload {
    pub expires_at: Option<DateTime<Utc>>,
}

/// POST /api/tables/{id}/qr - issue a fresh QR token, revoking older ones
pub async fn issue_qr(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    payload: Option<Json<IssueQrPayload>>,
) -> AppResult<Json<TableQrToken>> {
    let expires_at = payload.and_then(|Json(p)| p.expires_at);
    let token = qr_token::issue(&state.pool, &user.tenant_id, &id, expires_at).await?;
    Ok(Json(token))
}

/// DELETE /api/tables/{id}/qr - revoke any active token for the table
pub async fn revoke_qr(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let revoked = qr_token::revoke_for_table(&state.pool, &user.tenant_id, &id).await?;
    Ok(Json(revoked))
}
