//! Category handlers

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Category routes: public listing, admin-only writes
pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(handler::create_category))
        .route(
            "/{id}",
            put(handler::update_category).delete(handler::delete_category),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/", get(handler::list_categories))
        .merge(protected)
}
