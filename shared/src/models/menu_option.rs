//! Menu Option Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Menu option entity (one selectable choice inside an option group)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuOption {
    pub id: String,
    pub tenant_id: String,
    pub group_id: String,
    pub name: String,
    /// Price surcharge, >= 0
    pub price: f64,
    pub sort_order: i64,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create option payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuOptionCreate {
    pub name: String,
    pub price: Option<f64>,
    pub sort_order: Option<i64>,
}

/// Update option payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuOptionUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub sort_order: Option<i64>,
    pub is_available: Option<bool>,
}
