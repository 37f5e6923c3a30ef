//! Request payloads shared between client and server.

use serde::{Deserialize, Serialize};

/// One requested order line, before validation and pricing. All referenced
/// ids are resolved against the live catalog; names and prices are never
/// accepted from the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineInput {
    pub item_id: String,
    pub variant_id: String,
    pub quantity: i64,
    #[serde(default)]
    pub option_ids: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Create order payload (staff path)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub table_id: String,
    #[serde(default)]
    pub note: Option<String>,
    pub items: Vec<OrderLineInput>,
}

/// Update order payload. `items`, when present, replaces the full line set
/// and triggers re-validation and re-pricing against the current catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    #[serde(default)]
    pub table_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<OrderLineInput>>,
}

/// Create order payload (public QR path)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicOrderCreate {
    pub token: String,
    #[serde(default)]
    pub note: Option<String>,
    pub items: Vec<OrderLineInput>,
}

/// Create invoice payload. Discount is optional at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceCreate {
    pub order_id: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub discount_type: Option<String>,
    #[serde(default)]
    pub discount_value: Option<f64>,
}

/// Update invoice payload. Only note and discount are mutable, and only
/// while the invoice is ISSUED.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceUpdate {
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub discount_type: Option<String>,
    #[serde(default)]
    pub discount_value: Option<f64>,
}

/// Pay invoice payload. `paid_amount` defaults to the invoice's total_due
/// when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoicePay {
    #[serde(default)]
    pub paid_amount: Option<f64>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
}

/// Pagination query parameters for list endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub table_id: Option<String>,
}
