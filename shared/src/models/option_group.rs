//! Option Group Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Option group entity. `min_select..=max_select` bounds how many options a
/// single order line may pick from this group once it is attached to an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OptionGroup {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub min_select: i64,
    pub max_select: i64,
    pub sort_order: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create option group payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionGroupCreate {
    pub name: String,
    pub min_select: Option<i64>,
    pub max_select: Option<i64>,
    pub sort_order: Option<i64>,
}

/// Update option group payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionGroupUpdate {
    pub name: Option<String>,
    pub min_select: Option<i64>,
    pub max_select: Option<i64>,
    pub sort_order: Option<i64>,
    pub is_active: Option<bool>,
}
