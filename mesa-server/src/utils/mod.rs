//! Shared server utilities

pub mod error;
pub mod logger;
pub mod money;
pub mod pagination;

pub use error::{AppError, AppResponse, AppResult};
pub use money::round_money;
pub use pagination::PageParams;
