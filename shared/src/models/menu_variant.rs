//! Menu Variant Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Menu variant entity (a sellable size/preparation of one item)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuVariant {
    pub id: String,
    pub tenant_id: String,
    pub item_id: String,
    pub name: String,
    /// Base price, >= 0
    pub price: f64,
    pub sort_order: i64,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create variant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuVariantCreate {
    pub name: String,
    pub price: f64,
    pub sort_order: Option<i64>,
}

/// Update variant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuVariantUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub sort_order: Option<i64>,
    pub is_available: Option<bool>,
}
