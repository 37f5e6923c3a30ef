//! Order Model
//!
//! An order is an aggregate: the lines are embedded values, not independent
//! rows. Table number/name and all line names/prices are snapshots captured
//! when the order is composed; later catalog or table edits do not propagate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Actor;

/// Order status vocabulary. `Placed` is the only initial state; transitions
/// between non-terminal states are deliberately unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Placed,
    InProgress,
    Ready,
    Served,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "PLACED",
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Ready => "READY",
            OrderStatus::Served => "SERVED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// Parse a status value, case-insensitively. Returns `None` for anything
    /// outside the closed vocabulary.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "PLACED" => Some(OrderStatus::Placed),
            "IN_PROGRESS" => Some(OrderStatus::InProgress),
            "READY" => Some(OrderStatus::Ready),
            "SERVED" => Some(OrderStatus::Served),
            "COMPLETED" => Some(OrderStatus::Completed),
            "CANCELLED" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one selected option on an order line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSnapshot {
    pub option_id: String,
    pub name: String,
    pub price: f64,
}

/// One priced line of an order (or of an invoice, which deep-copies lines
/// at settlement time).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: String,
    pub variant_id: String,
    pub name: String,
    pub variant_name: String,
    pub quantity: i64,
    /// variant price + sum of selected option prices, rounded
    pub unit_price: f64,
    #[serde(default)]
    pub options: Vec<OptionSnapshot>,
    #[serde(default)]
    pub note: String,
    pub tax_percentage: f64,
    pub line_sub_total: f64,
    pub line_tax: f64,
    pub line_total: f64,
}

/// Order-level totals: rounded sums of the line values, in line order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderTotals {
    pub sub_total: f64,
    pub tax_total: f64,
    pub grand_total: f64,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub tenant_id: String,
    pub table_id: String,
    pub table_number: i64,
    #[serde(default)]
    pub table_name: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub note: String,
    pub items: Vec<OrderLine>,
    pub sub_total: f64,
    pub tax_total: f64,
    pub grand_total: f64,
    pub created_by: Actor,
    pub updated_by: Actor,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn totals(&self) -> OrderTotals {
        OrderTotals {
            sub_total: self.sub_total,
            tax_total: self.tax_total,
            grand_total: self.grand_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(OrderStatus::parse("placed"), Some(OrderStatus::Placed));
        assert_eq!(OrderStatus::parse(" in_progress "), Some(OrderStatus::InProgress));
        assert_eq!(OrderStatus::parse("COMPLETED"), Some(OrderStatus::Completed));
        assert_eq!(OrderStatus::parse("UNKNOWN"), None);
    }

    #[test]
    fn status_serializes_screaming_snake() {
        let json = serde_json::to_string(&OrderStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
    }
}
