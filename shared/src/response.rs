//! Response payloads shared between client and server.

use serde::{Deserialize, Serialize};

use crate::models::{Invoice, MenuCategory, MenuItem, MenuOption, MenuVariant, OptionGroup};

/// Pagination envelope metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if total == 0 { 0 } else { (total + limit - 1) / limit };
        Self { page, limit, total, total_pages }
    }
}

/// A page of results plus its pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Invoice plus its derived balance. `balance_due` is computed per response,
/// never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceResponse {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub balance_due: f64,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        let balance_due = invoice.balance_due();
        Self { invoice, balance_due }
    }
}

/// Option group with its options, as served in menu detail responses
#[derive(Debug, Clone, Serialize)]
pub struct OptionGroupDetail {
    #[serde(flatten)]
    pub group: OptionGroup,
    pub options: Vec<MenuOption>,
}

/// Menu item with variants and attached option groups
#[derive(Debug, Clone, Serialize)]
pub struct MenuItemDetail {
    #[serde(flatten)]
    pub item: MenuItem,
    pub variants: Vec<MenuVariant>,
    pub option_groups: Vec<OptionGroupDetail>,
}

/// The catalog as served to guests: only available items, variants, and
/// options appear, and only active option groups.
#[derive(Debug, Clone, Serialize)]
pub struct PublicMenu {
    pub categories: Vec<MenuCategory>,
    pub items: Vec<MenuItemDetail>,
}
