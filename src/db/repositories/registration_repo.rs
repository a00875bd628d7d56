//! Registration repository

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    error::{is_unique_violation_on, AppError, AppResult},
    models::{Registration, RegistrationWithAttendee, RegistrationWithEvent},
};

const EVENT_USER_UNIQUE: &str = "registrations_event_user_unique";

/// Repository for registration database operations
pub struct RegistrationRepository;

impl RegistrationRepository {
    /// Find the registration for an (event, attendee) pair
    pub async fn find_by_pair(
        conn: &mut PgConnection,
        event_id: &Uuid,
        user_id: &Uuid,
    ) -> AppResult<Option<Registration>> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"SELECT * FROM registrations WHERE event_id = $1 AND user_id = $2"#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(conn)
        .await?;

        Ok(registration)
    }

    /// Find and lock the registration for an (event, attendee) pair
    pub async fn lock_by_pair(
        conn: &mut PgConnection,
        event_id: &Uuid,
        user_id: &Uuid,
    ) -> AppResult<Option<Registration>> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            SELECT * FROM registrations
            WHERE event_id = $1 AND user_id = $2
            FOR UPDATE
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(conn)
        .await?;

        Ok(registration)
    }

    /// Insert a registration. The pair constraint surfaces as `DuplicateRegistration`.
    pub async fn insert(
        conn: &mut PgConnection,
        event_id: &Uuid,
        user_id: &Uuid,
    ) -> AppResult<Registration> {
        sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations (event_id, user_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            if is_unique_violation_on(&e, EVENT_USER_UNIQUE) {
                AppError::DuplicateRegistration
            } else {
                e.into()
            }
        })
    }

    /// Find registration by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Registration>> {
        let registration =
            sqlx::query_as::<_, Registration>(r#"SELECT * FROM registrations WHERE id = $1"#)
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(registration)
    }

    /// Check whether an attendee holds a registration for an event
    pub async fn exists(pool: &PgPool, event_id: &Uuid, user_id: &Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM registrations WHERE event_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Delete a registration
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM registrations WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Attendee roster for an event
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: &Uuid,
    ) -> AppResult<Vec<RegistrationWithAttendee>> {
        let rows = sqlx::query_as::<_, RegistrationWithAttendee>(
            r#"
            SELECT
                r.id, r.event_id, r.user_id, r.registered_at,
                u.name AS user_name,
                u.email AS user_email
            FROM registrations r
            JOIN users u ON u.id = r.user_id
            WHERE r.event_id = $1
            ORDER BY r.registered_at ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Events an attendee is registered for
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &Uuid,
    ) -> AppResult<Vec<RegistrationWithEvent>> {
        let rows = sqlx::query_as::<_, RegistrationWithEvent>(
            r#"
            SELECT
                r.id, r.event_id, r.user_id, r.registered_at,
                e.title AS event_title,
                e.date AS event_date,
                e.time AS event_time,
                e.location AS event_location,
                e.status AS event_status
            FROM registrations r
            JOIN events e ON e.id = r.event_id
            WHERE r.user_id = $1
            ORDER BY e.date ASC, e.time ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}
