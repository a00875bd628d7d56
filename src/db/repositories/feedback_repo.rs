//! Feedback repository

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    error::{is_unique_violation_on, AppError, AppResult},
    models::{Feedback, FeedbackWithAuthor},
};

const EVENT_USER_UNIQUE: &str = "feedback_event_user_unique";

/// Repository for feedback database operations
pub struct FeedbackRepository;

impl FeedbackRepository {
    /// Check whether feedback exists for an (event, attendee) pair
    pub async fn exists(conn: &mut PgConnection, event_id: &Uuid, user_id: &Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM feedback WHERE event_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(conn)
        .await?;

        Ok(exists)
    }

    /// Insert feedback. The pair constraint surfaces as `AlreadySubmitted`.
    pub async fn insert(
        conn: &mut PgConnection,
        event_id: &Uuid,
        user_id: &Uuid,
        rating: i32,
        comment: Option<&str>,
    ) -> AppResult<Feedback> {
        sqlx::query_as::<_, Feedback>(
            r#"
            INSERT INTO feedback (event_id, user_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            if is_unique_violation_on(&e, EVENT_USER_UNIQUE) {
                AppError::AlreadySubmitted
            } else {
                e.into()
            }
        })
    }

    /// Feedback left for one event, newest first
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: &Uuid,
    ) -> AppResult<Vec<FeedbackWithAuthor>> {
        let rows = sqlx::query_as::<_, FeedbackWithAuthor>(
            r#"
            SELECT
                f.id, f.event_id, f.user_id, f.rating, f.comment, f.created_at,
                u.name AS user_name,
                e.title AS event_title
            FROM feedback f
            JOIN users u ON u.id = f.user_id
            JOIN events e ON e.id = f.event_id
            WHERE f.event_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(event_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Feedback across every event an organizer runs, newest first
    pub async fn list_for_organizer(
        pool: &PgPool,
        organizer_id: &Uuid,
    ) -> AppResult<Vec<FeedbackWithAuthor>> {
        let rows = sqlx::query_as::<_, FeedbackWithAuthor>(
            r#"
            SELECT
                f.id, f.event_id, f.user_id, f.rating, f.comment, f.created_at,
                u.name AS user_name,
                e.title AS event_title
            FROM feedback f
            JOIN users u ON u.id = f.user_id
            JOIN events e ON e.id = f.event_id
            WHERE e.organizer_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(organizer_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}
