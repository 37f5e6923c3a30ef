//! Invoice Model
//!
//! An invoice is an immutable snapshot of one order: its lines and totals are
//! deep-copied at creation and never re-derived from the order afterwards.
//! At most one invoice exists per (tenant, order); the storage layer enforces
//! this with a unique index.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Actor, OrderLine};

/// Invoice state machine: ISSUED becomes PAID (terminal). VOID is a second
/// terminal state reserved in the vocabulary; no operation currently produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Issued,
    Paid,
    Void,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Issued => "ISSUED",
            InvoiceStatus::Paid => "PAID",
            InvoiceStatus::Void => "VOID",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "ISSUED" => Some(InvoiceStatus::Issued),
            "PAID" => Some(InvoiceStatus::Paid),
            "VOID" => Some(InvoiceStatus::Void),
            _ => None,
        }
    }

    /// PAID and VOID are terminal: discount and items are frozen.
    pub fn is_settled(&self) -> bool {
        matches!(self, InvoiceStatus::Paid | InvoiceStatus::Void)
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discount kind applied to an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    Percentage,
    Flat,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "PERCENTAGE",
            DiscountType::Flat => "FLAT",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "PERCENTAGE" => Some(DiscountType::Percentage),
            "FLAT" => Some(DiscountType::Flat),
            _ => None,
        }
    }
}

/// Payment block, present once the invoice is PAID. Payment is recorded, not
/// processed; overpayment is stored as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub reference: String,
    pub paid_amount: f64,
    pub paid_at: DateTime<Utc>,
}

/// Invoice entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub tenant_id: String,
    pub order_id: String,
    pub table_id: String,
    pub table_number: i64,
    #[serde(default)]
    pub table_name: String,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub note: String,
    /// Deep copy of the order's lines at invoice-creation time
    pub items: Vec<OrderLine>,
    pub sub_total: f64,
    pub tax_total: f64,
    pub grand_total: f64,
    pub discount_type: Option<DiscountType>,
    pub discount_value: f64,
    pub discount_amount: f64,
    /// grand_total - discount_amount, rounded
    pub total_due: f64,
    pub payment: Option<Payment>,
    pub created_by: Actor,
    pub updated_by: Actor,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Remaining amount: `max(0, total_due - paid_amount)`. Always derived,
    /// never stored.
    pub fn balance_due(&self) -> f64 {
        let paid = self.payment.as_ref().map(|p| p.paid_amount).unwrap_or(0.0);
        let due = self.total_due - paid;
        if due > 0.0 { (due * 100.0).round() / 100.0 } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settled_states() {
        assert!(!InvoiceStatus::Issued.is_settled());
        assert!(InvoiceStatus::Paid.is_settled());
        assert!(InvoiceStatus::Void.is_settled());
    }

    #[test]
    fn discount_type_parse() {
        assert_eq!(DiscountType::parse("percentage"), Some(DiscountType::Percentage));
        assert_eq!(DiscountType::parse("FLAT"), Some(DiscountType::Flat));
        assert_eq!(DiscountType::parse("BOGO"), None);
    }
}
