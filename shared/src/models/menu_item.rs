//! Menu Item Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Menu item entity. Pricing lives on the variants; the item carries the
/// tax percentage applied to every line built from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: String,
    pub tenant_id: String,
    pub category_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Tax percentage in [0, 100]
    pub tax_percentage: f64,
    pub sort_order: i64,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Variant payload embedded in an item create (written in the same
/// transaction as the item itself).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemVariantPayload {
    pub name: String,
    pub price: f64,
    pub sort_order: Option<i64>,
}

/// Create item payload. Variants and option-group attachments are part of
/// the aggregate: either everything commits or nothing does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub tax_percentage: Option<f64>,
    pub sort_order: Option<i64>,
    #[serde(default)]
    pub variants: Vec<MenuItemVariantPayload>,
    #[serde(default)]
    pub option_group_ids: Vec<String>,
}

/// Update item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub category_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub tax_percentage: Option<f64>,
    pub sort_order: Option<i64>,
    pub is_available: Option<bool>,
}
