//! Order composition and lifecycle

pub mod service;
pub mod validator;

pub use service::OrderService;
pub use validator::{CatalogSnapshot, PricedLines, price_lines, validate_and_price};
