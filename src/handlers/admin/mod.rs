//! Admin moderation and reporting handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Admin routes (authenticated; every handler also requires the admin role)
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Reporting
        .route("/stats", get(handler::get_stats))
        .route("/activities", get(handler::get_activities))
        // Event moderation
        .route("/events/{id}/status", put(handler::update_event_status))
        .route("/events/{id}/cancel", post(handler::cancel_event))
        .route("/events/{id}/reactivate", post(handler::reactivate_event))
        // User management
        .route("/users/{id}/role", put(handler::update_user_role))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
