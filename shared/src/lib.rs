//! Shared domain types for the Mesa restaurant backend.
//!
//! This crate holds the entity models and request/response DTOs that are
//! exchanged between the server and its clients. It carries no I/O of its
//! own; the optional `db` feature adds `sqlx::FromRow` derives so the server
//! can map SQLite rows directly onto the flat entities.

pub mod models;
pub mod request;
pub mod response;

pub use models::*;
pub use request::*;
pub use response::*;
