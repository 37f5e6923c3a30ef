//! Table QR Token Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// QR provisioning record for a dining table. The public order path resolves
/// (tenant, table) from an active, unexpired token; staff paths never use it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TableQrToken {
    pub token: String,
    pub tenant_id: String,
    pub table_id: String,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
