//! Dining Table Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dining table entity. `number` is unique per tenant; `number` and `name`
/// are what orders snapshot at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: String,
    pub tenant_id: String,
    pub number: i64,
    #[serde(default)]
    pub name: String,
    pub capacity: Option<i64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub number: i64,
    pub name: Option<String>,
    pub capacity: Option<i64>,
}

/// Update dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    pub number: Option<i64>,
    pub name: Option<String>,
    pub capacity: Option<i64>,
    pub is_active: Option<bool>,
}
