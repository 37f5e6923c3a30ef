//! Table QR Token Repository

use chrono::{DateTime, Utc};
use shared::models::TableQrToken;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{RepoError, RepoResult, dining_table};

/// Issue a fresh token for a table, deactivating any previous ones. One
/// active token per table keeps revocation a single update.
pub async fn issue(
    pool: &SqlitePool,
    tenant_id: &str,
    table_id: &str,
    expires_at: Option<DateTime<Utc>>,
) -> RepoResult<TableQrToken> {
    if dining_table::find_by_id(pool, tenant_id, table_id)
        .await?
        .is_none()
    {
        return Err(RepoError::NotFound(format!("table {table_id} not found")));
    }

    let token = Uuid::new_v4().simple().to_string();
    let now = Utc::now();

    let mut tx = pool.begin().await?;
    sqlx::query("UPDATE table_qr_token SET is_active = 0 WHERE tenant_id = ? AND table_id = ?")
        .bind(tenant_id)
        .bind(table_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query(
        "INSERT INTO table_qr_token (token, tenant_id, table_id, is_active, expires_at, created_at)
         VALUES (?, ?, ?, 1, ?, ?)",
    )
    .bind(&token)
    .bind(tenant_id)
    .bind(table_id)
    .bind(expires_at)
    .bind(now)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    find_by_token(pool, &token)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to issue QR token".into()))
}

/// Resolve a token regardless of state. The public path is token-first, so
/// this lookup is not tenant-scoped; the token itself carries the tenant.
pub async fn find_by_token(pool: &SqlitePool, token: &str) -> RepoResult<Option<TableQrToken>> {
    let record =
        sqlx::query_as::<_, TableQrToken>("SELECT * FROM table_qr_token WHERE token = ?")
            .bind(token)
            .fetch_optional(pool)
            .await?;
    Ok(record)
}

/// Resolve a token that is active and unexpired
pub async fn find_active(pool: &SqlitePool, token: &str) -> RepoResult<Option<TableQrToken>> {
    let record = find_by_token(pool, token).await?;
    Ok(record.filter(|r| {
        r.is_active && r.expires_at.map(|exp| exp > Utc::now()).unwrap_or(true)
    }))
}

pub async fn revoke_for_table(
    pool: &SqlitePool,
    tenant_id: &str,
    table_id: &str,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE table_qr_token SET is_active = 0 WHERE tenant_id = ? AND table_id = ? AND is_active = 1",
    )
    .bind(tenant_id)
    .bind(table_id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}
