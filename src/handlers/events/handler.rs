//! Event handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    db::repositories::{EventChanges, EventFilter, NewEvent},
    error::AppResult,
    middleware::auth::{AuthenticatedUser, OptionalAuth},
    models::EventStatus,
    services::EventService,
    state::AppState,
    utils::today,
};

use super::{
    request::{event_date, event_time, CreateEventRequest, ListEventsQuery, UpdateEventRequest},
    response::{DeleteEventResponse, EventResponse, EventsListResponse},
};

/// List events with filters (public, annotated when authenticated)
pub async fn list_events(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Query(query): Query<ListEventsQuery>,
) -> AppResult<Json<EventsListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let status = query
        .status
        .as_deref()
        .map(str::parse::<EventStatus>)
        .transpose()?;

    let filter = EventFilter {
        search: query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()),
        status: status.map(|s| s.as_str()),
        category_id: query.category_id,
        from_date: query.upcoming.unwrap_or(false).then(today),
    };

    let (events, total) =
        EventService::list_events(state.db(), &filter, viewer.as_ref(), page, per_page).await?;

    let authenticated = viewer.is_some();
    Ok(Json(EventsListResponse {
        items: events
            .into_iter()
            .map(|e| EventResponse::from_listing(e, authenticated))
            .collect(),
        total,
        page,
        per_page,
    }))
}

/// Get event details
pub async fn get_event(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(id): Path<Uuid>,
) -> AppResult<Json<EventResponse>> {
    let event = EventService::get_event(state.db(), &id, viewer.as_ref()).await?;
    Ok(Json(EventResponse::from_listing(event, viewer.is_some())))
}

/// Create an event (organizer or admin)
pub async fn create_event(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateEventRequest>,
) -> AppResult<(StatusCode, Json<EventResponse>)> {
    payload.validate()?;

    let new = NewEvent {
        title: payload.title.trim(),
        description: payload.description.as_deref(),
        date: event_date(&payload.date)?,
        time: event_time(&payload.time)?,
        location: payload.location.trim(),
        category_id: payload.category_id,
        organizer_id: auth_user.id,
        max_attendees: payload.max_attendees,
        image_url: payload.image_url.as_deref(),
    };

    let event = EventService::create_event(state.db(), &auth_user, new).await?;

    Ok((
        StatusCode::CREATED,
        Json(EventResponse::from_listing(event, true)),
    ))
}

/// Update an event (owner or admin)
pub async fn update_event(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEventRequest>,
) -> AppResult<Json<EventResponse>> {
    payload.validate()?;

    let changes = EventChanges {
        title: payload.title.as_deref().map(str::trim),
        description: payload.description.as_deref(),
        date: payload.date.as_deref().map(event_date).transpose()?,
        time: payload.time.as_deref().map(event_time).transpose()?,
        location: payload.location.as_deref().map(str::trim),
        category_id: payload.category_id,
        max_attendees: payload.max_attendees,
        image_url: payload.image_url.as_deref(),
    };

    let status = payload
        .status
        .as_deref()
        .map(str::parse::<EventStatus>)
        .transpose()?;

    let event = EventService::update_event(
        state.db(),
        &auth_user,
        &id,
        changes,
        status,
        payload.cancellation_reason.as_deref(),
    )
    .await?;

    Ok(Json(EventResponse::from_listing(event, true)))
}

/// Delete an event together with its registrations and feedback (owner or admin)
pub async fn delete_event(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DeleteEventResponse>> {
    let deleted = EventService::delete_event(state.db(), &auth_user, &id).await?;

    Ok(Json(DeleteEventResponse {
        success: true,
        message: "Event deleted".to_string(),
        registrations_removed: deleted.registrations_removed,
        feedback_removed: deleted.feedback_removed,
    }))
}
