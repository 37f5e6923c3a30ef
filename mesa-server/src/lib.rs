//! Mesa server
//!
//! Multi-tenant restaurant operations backend. The core is the order
//! composition and invoice settlement engine: raw menu selections become
//! priced, constraint-validated orders, and orders become immutable,
//! discountable, payable invoices.

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod invoices;
pub mod orders;
pub mod services;
pub mod utils;

pub use crate::core::{Config, ServerState};
pub use utils::{AppError, AppResponse, AppResult};
