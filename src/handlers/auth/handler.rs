//! Authentication handler implementations

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    handlers::MessageResponse,
    middleware::auth::AuthenticatedUser,
    models::User,
    services::{auth_service::IssuedToken, AuthService},
    state::AppState,
};

use super::{
    request::{ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest},
    response::{AuthResponse, CurrentUserResponse},
};

fn auth_response(user: User, token: IssuedToken) -> AuthResponse {
    AuthResponse {
        access_token: token.access_token,
        token_type: "Bearer".to_string(),
        expires_in: token.expires_in,
        user: user.into(),
    }
}

/// Register a new account
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    payload.validate()?;

    let (user, token) = AuthService::register(
        state.db(),
        &state.config().jwt,
        &payload.name,
        &payload.email,
        &payload.password,
        payload.role.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(auth_response(user, token))))
}

/// Login with email and password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate()?;

    let (user, token) = AuthService::login(
        state.db(),
        &state.config().jwt,
        &payload.email,
        &payload.password,
    )
    .await?;

    Ok(Json(auth_response(user, token)))
}

/// Request a password reset link; the answer is the same whether or not
/// the address is registered
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    payload.validate()?;

    AuthService::forgot_password(
        state.db(),
        state.notifier(),
        &state.config().auth,
        &payload.email,
    )
    .await?;

    Ok(Json(MessageResponse::ok(
        "If that email is registered, a reset link has been sent",
    )))
}

/// Set a new password with a reset token
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    payload.validate()?;

    AuthService::reset_password(state.db(), &payload.token, &payload.password).await?;

    Ok(Json(MessageResponse::ok("Password has been reset")))
}

/// Get current authenticated user
pub async fn get_current_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<CurrentUserResponse>> {
    let user = AuthService::get_user_by_id(state.db(), &auth_user.id)
        .await?
        .ok_or(AppError::AccountNotFound)?;

    Ok(Json(CurrentUserResponse { user: user.into() }))
}
