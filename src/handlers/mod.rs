//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.
//! Each domain exposes `routes(state)`; protected routes get the
//! authentication layer through `route_layer`, public ones are merged in
//! alongside them.

pub mod admin;
pub mod auth;
pub mod categories;
pub mod events;
pub mod feedback;
pub mod health;
pub mod registrations;
pub mod users;

use axum::Router;
use serde::Serialize;

use crate::state::AppState;

/// Confirmation body for operations without a resource to return
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::routes(state.clone()))
        .nest("/users", users::routes(state.clone()))
        .nest("/categories", categories::routes(state.clone()))
        .nest("/events", events::routes(state.clone()))
        .nest("/registrations", registrations::routes(state.clone()))
        .nest("/feedback", feedback::routes(state.clone()))
        .nest("/admin", admin::routes(state))
}
