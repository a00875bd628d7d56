//! Feedback ledger handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Feedback routes (all authenticated)
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(handler::submit_feedback))
        .route(
            "/can-feedback/{event_id}/{user_id}",
            get(handler::can_feedback),
        )
        .route("/event/{event_id}", get(handler::list_event_feedback))
        .route(
            "/organizer/{organizer_id}",
            get(handler::list_organizer_feedback),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
