//! Category handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::MessageResponse,
    middleware::auth::AuthenticatedUser,
    models::Category,
    services::CategoryService,
    state::AppState,
};

use super::request::{CreateCategoryRequest, UpdateCategoryRequest};

/// List categories ordered by name
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = CategoryService::list_categories(state.db()).await?;
    Ok(Json(categories))
}

/// Create a category (admin only)
pub async fn create_category(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<Category>)> {
    auth_user.require_admin()?;
    payload.validate()?;

    let category = CategoryService::create_category(
        state.db(),
        &payload.name,
        payload.description.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// Update a category (admin only)
pub async fn update_category(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> AppResult<Json<Category>> {
    auth_user.require_admin()?;
    payload.validate()?;

    let category = CategoryService::update_category(
        state.db(),
        &id,
        payload.name.as_deref(),
        payload.description.as_deref(),
    )
    .await?;

    Ok(Json(category))
}

/// Delete a category no event refers to (admin only)
pub async fn delete_category(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    auth_user.require_admin()?;

    CategoryService::delete_category(state.db(), &id).await?;
    Ok(Json(MessageResponse::ok("Category deleted")))
}
