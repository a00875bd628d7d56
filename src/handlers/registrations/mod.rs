//! Registration ledger handlers

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Registration routes (all authenticated)
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(handler::register_for_event))
        .route("/{id}", delete(handler::cancel_registration))
        .route("/event/{event_id}", get(handler::list_event_registrations))
        .route("/user/{user_id}", get(handler::list_user_registrations))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
