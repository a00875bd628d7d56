//! User handler implementations

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    error::AppResult,
    handlers::{auth::UserResponse, MessageResponse},
    middleware::auth::AuthenticatedUser,
    services::{user_service::ProfileUpdate, UserService},
    state::AppState,
};

use super::{
    request::{ListUsersQuery, UpdateUserRequest, UpdateUserStatusRequest},
    response::UsersListResponse,
};

/// List users (admin only, paginated)
pub async fn list_users(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<ListUsersQuery>,
) -> AppResult<Json<UsersListResponse>> {
    auth_user.require_admin()?;

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let (users, total) = UserService::list_users(
        state.db(),
        page,
        per_page,
        query.search.as_deref(),
        query.role.as_deref(),
        query.blocked,
    )
    .await?;

    Ok(Json(UsersListResponse {
        items: users.into_iter().map(UserResponse::from).collect(),
        total,
        page,
        per_page,
    }))
}

/// Get a user profile (self or admin)
pub async fn get_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = UserService::get_user(state.db(), &auth_user, &id).await?;
    Ok(Json(user.into()))
}

/// Update a user profile (self or admin)
pub async fn update_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    payload.validate()?;

    let user = UserService::update_user(
        state.db(),
        &auth_user,
        &id,
        ProfileUpdate {
            name: payload.name.as_deref(),
            email: payload.email.as_deref(),
            current_password: payload.current_password.as_deref(),
            new_password: payload.new_password.as_deref(),
        },
    )
    .await?;

    Ok(Json(user.into()))
}

/// Block or unblock a user (admin, not self)
pub async fn update_user_status(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserStatusRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = UserService::set_blocked(state.db(), &auth_user, &id, payload.is_blocked).await?;
    Ok(Json(user.into()))
}

/// Delete a user (admin, not self)
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    UserService::delete_user(state.db(), &auth_user, &id).await?;
    Ok(Json(MessageResponse::ok("User deleted")))
}
