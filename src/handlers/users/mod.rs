//! User management handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    middleware,
    routing::{get, put},
    Router,
};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// User routes (all authenticated)
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_users))
        .route(
            "/{id}",
            get(handler::get_user)
                .put(handler::update_user)
                .delete(handler::delete_user),
        )
        .route("/{id}/status", put(handler::update_user_status))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
