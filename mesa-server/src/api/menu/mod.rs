//! Menu catalog API

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/categories",
            get(handler::list_categories).post(handler::create_category),
        )
        .route(
            "/categories/{id}",
            get(handler::get_category)
                .put(handler::update_category)
                .delete(handler::delete_category),
        )
        .route("/items", get(handler::list_items).post(handler::create_item))
        .route(
            "/items/{id}",
            get(handler::get_item)
                .put(handler::update_item)
                .delete(handler::delete_item),
        )
        .route("/items/{id}/variants", post(handler::create_variant))
        .route(
            "/items/{id}/option-groups/{group_id}",
            post(handler::attach_group).delete(handler::detach_group),
        )
        .route("/variants/{id}", put(handler::update_variant).delete(handler::delete_variant))
        .route(
            "/option-groups",
            get(handler::list_groups).post(handler::create_group),
        )
        .route(
            "/option-groups/{id}",
            get(handler::get_group)
                .put(handler::update_group)
                .delete(handler::delete_group),
        )
        .route("/option-groups/{id}/options", post(handler::create_option))
        .route(
            "/options/{id}",
            put(handler::update_option).delete(handler::delete_option),
        )
        .route("/full", get(handler::full_menu))
}
