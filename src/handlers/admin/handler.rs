//! Admin handler implementations

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::{auth::UserResponse, events::EventResponse},
    middleware::auth::AuthenticatedUser,
    models::{EventStatus, PlatformStats},
    services::{admin_service::activity_limit, AdminService, EventService},
    state::AppState,
};

use super::{
    request::{ActivitiesQuery, CancelEventRequest, UpdateEventStatusRequest, UpdateUserRoleRequest},
    response::ActivitiesResponse,
};

/// Platform counters
pub async fn get_stats(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<PlatformStats>> {
    auth_user.require_admin()?;

    let stats = AdminService::get_stats(state.db()).await?;
    Ok(Json(stats))
}

/// Recent registrations and event creations
pub async fn get_activities(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<ActivitiesQuery>,
) -> AppResult<Json<ActivitiesResponse>> {
    auth_user.require_admin()?;

    let limit = activity_limit(query.requested_limit()?)?;
    let items = AdminService::recent_activities(state.db(), limit).await?;

    Ok(Json(ActivitiesResponse { items, limit }))
}

/// Set any status on an event
pub async fn update_event_status(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEventStatusRequest>,
) -> AppResult<Json<EventResponse>> {
    auth_user.require_admin()?;
    payload.validate()?;

    let status: EventStatus = payload.status.trim().parse()?;
    AdminService::set_event_status(state.db(), &auth_user, &id, status, payload.reason.as_deref())
        .await?;

    moderated_event(&state, &auth_user, &id).await
}

/// Cancel an event with a reason
pub async fn cancel_event(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CancelEventRequest>,
) -> AppResult<Json<EventResponse>> {
    auth_user.require_admin()?;
    payload.validate()?;

    AdminService::set_event_status(
        state.db(),
        &auth_user,
        &id,
        EventStatus::Cancelled,
        payload.reason.as_deref(),
    )
    .await?;

    moderated_event(&state, &auth_user, &id).await
}

/// Reactivate a cancelled event
pub async fn reactivate_event(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<EventResponse>> {
    auth_user.require_admin()?;

    AdminService::reactivate_event(state.db(), &auth_user, &id).await?;

    moderated_event(&state, &auth_user, &id).await
}

/// Change a user's role
pub async fn update_user_role(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRoleRequest>,
) -> AppResult<Json<UserResponse>> {
    auth_user.require_admin()?;
    payload.validate()?;

    let user = AdminService::update_user_role(state.db(), &auth_user, &id, payload.role.trim()).await?;
    Ok(Json(user.into()))
}

async fn moderated_event(
    state: &AppState,
    auth_user: &AuthenticatedUser,
    id: &Uuid,
) -> AppResult<Json<EventResponse>> {
    let event = EventService::get_event(state.db(), id, Some(auth_user)).await?;
    Ok(Json(EventResponse::from_listing(event, true)))
}
