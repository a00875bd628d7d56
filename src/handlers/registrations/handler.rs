//! Registration handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    handlers::MessageResponse,
    middleware::auth::AuthenticatedUser,
    models::{Registration, RegistrationWithAttendee, RegistrationWithEvent},
    services::RegistrationService,
    state::AppState,
};

use super::request::CreateRegistrationRequest;

/// Take a seat at an event
pub async fn register_for_event(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateRegistrationRequest>,
) -> AppResult<(StatusCode, Json<Registration>)> {
    let registration = RegistrationService::register(
        state.db(),
        &auth_user,
        &payload.event_id,
        payload.user_id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(registration)))
}

/// Give a seat back
pub async fn cancel_registration(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    RegistrationService::cancel(state.db(), &auth_user, &id).await?;
    Ok(Json(MessageResponse::ok("Registration cancelled")))
}

/// Attendees of an event (event owner or admin)
pub async fn list_event_registrations(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(event_id): Path<Uuid>,
) -> AppResult<Json<Vec<RegistrationWithAttendee>>> {
    let registrations =
        RegistrationService::list_for_event(state.db(), &auth_user, &event_id).await?;
    Ok(Json(registrations))
}

/// Events a user is registered for (self or admin)
pub async fn list_user_registrations(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<RegistrationWithEvent>>> {
    let registrations =
        RegistrationService::list_for_user(state.db(), &auth_user, &user_id).await?;
    Ok(Json(registrations))
}
