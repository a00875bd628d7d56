//! Feedback service

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::repositories::{EventRepository, FeedbackRepository, RegistrationRepository},
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    models::{validate_rating, Feedback, FeedbackEligibility, FeedbackWithAuthor, RatingSummary},
    utils::today,
};

/// Feedback service
pub struct FeedbackService;

impl FeedbackService {
    /// Whether `user_id` may leave feedback for `event_id` (self or admin)
    pub async fn can_submit(
        pool: &PgPool,
        caller: &AuthenticatedUser,
        event_id: &Uuid,
        user_id: &Uuid,
    ) -> AppResult<FeedbackEligibility> {
        caller.require_owner_or_admin(user_id)?;

        let event = EventRepository::find_by_id(pool, event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        let registered = RegistrationRepository::exists(pool, event_id, user_id).await?;
        let mut conn = pool.acquire().await?;
        let already_submitted = FeedbackRepository::exists(&mut *conn, event_id, user_id).await?;

        Ok(FeedbackEligibility::evaluate(
            registered,
            event.date,
            today(),
            already_submitted,
        ))
    }

    /// Submit feedback as the caller.
    ///
    /// The attendee's registration row is locked for the duration, so two
    /// concurrent submissions for the same pair are decided one after the
    /// other; the unique constraint backs this up.
    pub async fn submit(
        pool: &PgPool,
        caller: &AuthenticatedUser,
        event_id: &Uuid,
        rating: i32,
        comment: Option<&str>,
    ) -> AppResult<Feedback> {
        validate_rating(rating)?;

        let mut tx = pool.begin().await?;

        let event_date = EventRepository::fetch_date(&mut *tx, event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
        let registered = RegistrationRepository::lock_by_pair(&mut *tx, event_id, &caller.id)
            .await?
            .is_some();
        let already_submitted = registered
            && FeedbackRepository::exists(&mut *tx, event_id, &caller.id).await?;

        FeedbackEligibility::evaluate(registered, event_date, today(), already_submitted)
            .into_result()?;

        let comment = comment.map(str::trim).filter(|c| !c.is_empty());
        let feedback =
            FeedbackRepository::insert(&mut *tx, event_id, &caller.id, rating, comment).await?;
        tx.commit().await?;

        info!(
            feedback_id = %feedback.id,
            event_id = %event_id,
            user_id = %caller.id,
            rating,
            "Feedback submitted"
        );

        Ok(feedback)
    }

    /// Feedback for one event with its rating summary (event owner or admin)
    pub async fn list_for_event(
        pool: &PgPool,
        caller: &AuthenticatedUser,
        event_id: &Uuid,
    ) -> AppResult<(Vec<FeedbackWithAuthor>, RatingSummary)> {
        let event = EventRepository::find_by_id(pool, event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
        caller.require_owner_or_admin(&event.organizer_id)?;

        let feedback = FeedbackRepository::list_for_event(pool, event_id).await?;
        let summary = RatingSummary::from_ratings(feedback.iter().map(|f| f.rating));

        Ok((feedback, summary))
    }

    /// Feedback across an organizer's events (the organizer or admin)
    pub async fn list_for_organizer(
        pool: &PgPool,
        caller: &AuthenticatedUser,
        organizer_id: &Uuid,
    ) -> AppResult<(Vec<FeedbackWithAuthor>, RatingSummary)> {
        caller.require_owner_or_admin(organizer_id)?;

        let feedback = FeedbackRepository::list_for_organizer(pool, organizer_id).await?;
        let summary = RatingSummary::from_ratings(feedback.iter().map(|f| f.rating));

        Ok((feedback, summary))
    }
}
