//! API route modules
//!
//! - [`health`] - liveness check
//! - [`menu`] - catalog management (categories, items, variants, option groups)
//! - [`tables`] - dining tables and QR provisioning
//! - [`orders`] - order lifecycle
//! - [`invoices`] - invoice settlement
//! - [`public`] - unauthenticated QR ordering

pub mod health;
pub mod invoices;
pub mod menu;
pub mod orders;
pub mod public;
pub mod tables;

pub use crate::utils::{AppResponse, AppResult};
