//! Feedback handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    models::Feedback,
    services::FeedbackService,
    state::AppState,
};

use super::{
    request::SubmitFeedbackRequest,
    response::{CanFeedbackResponse, FeedbackListResponse},
};

/// Leave feedback for an event the caller attended
pub async fn submit_feedback(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<SubmitFeedbackRequest>,
) -> AppResult<(StatusCode, Json<Feedback>)> {
    payload.validate()?;

    let feedback = FeedbackService::submit(
        state.db(),
        &auth_user,
        &payload.event_id,
        payload.rating,
        payload.comment.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(feedback)))
}

/// Whether a user may leave feedback for an event (self or admin)
pub async fn can_feedback(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((event_id, user_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<CanFeedbackResponse>> {
    let eligibility =
        FeedbackService::can_submit(state.db(), &auth_user, &event_id, &user_id).await?;
    Ok(Json(eligibility.into()))
}

/// Feedback for one event (event owner or admin)
pub async fn list_event_feedback(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(event_id): Path<Uuid>,
) -> AppResult<Json<FeedbackListResponse>> {
    let (items, summary) =
        FeedbackService::list_for_event(state.db(), &auth_user, &event_id).await?;
    Ok(Json(FeedbackListResponse { items, summary }))
}

/// Feedback across an organizer's events (the organizer or admin)
pub async fn list_organizer_feedback(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(organizer_id): Path<Uuid>,
) -> AppResult<Json<FeedbackListResponse>> {
    let (items, summary) =
        FeedbackService::list_for_organizer(state.db(), &auth_user, &organizer_id).await?;
    Ok(Json(FeedbackListResponse { items, summary }))
}
