//! Event catalog handlers

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

use crate::{
    middleware::auth::{auth_middleware, optional_auth_middleware},
    state::AppState,
};

/// Event routes: reads accept an optional credential, writes require one
pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(handler::list_events))
        .route("/{id}", get(handler::get_event))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            optional_auth_middleware,
        ));

    let protected = Router::new()
        .route("/", post(handler::create_event))
        .route("/{id}", put(handler::update_event).delete(handler::delete_event))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}
