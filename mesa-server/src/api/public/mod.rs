//! Public QR ordering API
//!
//! Unauthenticated: the QR token stands in for identity and resolves the
//! tenant and table. Validation and pricing are the same code path as the
//! staff API.

mod handler;

use axum::{Router, routing::{get, post}};

use crate::core::ServerState;

pub use handler::available_menu;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/public", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/orders", post(handler::create_order))
        .route("/menu/{token}", get(handler::menu))
        .route("/tables/{token}", get(handler::resolve_table))
}
