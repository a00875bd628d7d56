//! Admin service

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    constants::{DEFAULT_ACTIVITY_LIMIT, MAX_ACTIVITY_LIMIT},
    db::repositories::{EventRepository, UserRepository},
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    models::{check_status_change, ActivityEntry, Event, EventStatus, PlatformStats, User},
    services::EventService,
    utils::{today, validate_role},
};

/// Resolve the activity feed size: default when absent, at least 1, at most the cap
pub fn activity_limit(requested: Option<i64>) -> AppResult<i64> {
    match requested {
        None => Ok(DEFAULT_ACTIVITY_LIMIT),
        Some(n) if n < 1 => Err(AppError::Validation(
            "limit must be a positive integer".to_string(),
        )),
        Some(n) => Ok(n.min(MAX_ACTIVITY_LIMIT)),
    }
}

/// Admin service for moderation and reporting
pub struct AdminService;

impl AdminService {
    /// Platform-wide counters
    pub async fn get_stats(pool: &PgPool) -> AppResult<PlatformStats> {
        let stats = sqlx::query_as::<_, PlatformStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM events) AS total_events,
                (SELECT COUNT(*) FROM registrations) AS total_registrations,
                (SELECT COUNT(*) FROM events WHERE date >= $1 AND status = 'active') AS upcoming_events,
                (SELECT COUNT(*) FROM feedback) AS total_feedback
            "#,
        )
        .bind(today())
        .fetch_one(pool)
        .await?;

        Ok(stats)
    }

    /// Most recent registrations and event creations, newest first
    pub async fn recent_activities(pool: &PgPool, limit: i64) -> AppResult<Vec<ActivityEntry>> {
        let entries = sqlx::query_as::<_, ActivityEntry>(
            r#"
            SELECT * FROM (
                SELECT
                    'registration' AS kind,
                    u.name AS actor_name,
                    e.id AS subject_id,
                    e.title AS subject_title,
                    r.registered_at AS occurred_at
                FROM registrations r
                JOIN users u ON u.id = r.user_id
                JOIN events e ON e.id = r.event_id

                UNION ALL

                SELECT
                    'event_created' AS kind,
                    u.name AS actor_name,
                    e.id AS subject_id,
                    e.title AS subject_title,
                    e.created_at AS occurred_at
                FROM events e
                JOIN users u ON u.id = e.organizer_id
            ) AS activity
            ORDER BY occurred_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(entries)
    }

    /// Set any status on an event; cancelling requires a reason
    pub async fn set_event_status(
        pool: &PgPool,
        caller: &AuthenticatedUser,
        event_id: &Uuid,
        status: EventStatus,
        reason: Option<&str>,
    ) -> AppResult<Event> {
        let mut tx = pool.begin().await?;

        let event = EventRepository::lock_by_id(&mut *tx, event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
        let current = EventService::lifecycle_of(&event)?;

        let reason = check_status_change(current, status, true, reason)?;
        let event =
            EventRepository::update_status(&mut *tx, event_id, status.as_str(), reason.as_deref())
                .await?;

        tx.commit().await?;

        info!(
            event_id = %event_id,
            admin_id = %caller.id,
            from = %current,
            to = %status,
            reason = reason.as_deref().unwrap_or(""),
            "Event moderated"
        );

        Ok(event)
    }

    /// Bring a cancelled event back to active
    pub async fn reactivate_event(
        pool: &PgPool,
        caller: &AuthenticatedUser,
        event_id: &Uuid,
    ) -> AppResult<Event> {
        let mut tx = pool.begin().await?;

        let event = EventRepository::lock_by_id(&mut *tx, event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        if EventService::lifecycle_of(&event)? != EventStatus::Cancelled {
            return Err(AppError::Validation(
                "Only cancelled events can be reactivated".to_string(),
            ));
        }

        let event = EventRepository::update_status(
            &mut *tx,
            event_id,
            EventStatus::Active.as_str(),
            None,
        )
        .await?;

        tx.commit().await?;

        info!(event_id = %event_id, admin_id = %caller.id, "Event reactivated");
        Ok(event)
    }

    /// Change a user's role
    pub async fn update_user_role(
        pool: &PgPool,
        caller: &AuthenticatedUser,
        user_id: &Uuid,
        role: &str,
    ) -> AppResult<User> {
        validate_role(role).map_err(|_| {
            AppError::Validation(format!(
                "Invalid role: {}. Valid roles: {:?}",
                role,
                crate::constants::roles::ALL
            ))
        })?;

        if UserRepository::find_by_id(pool, user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let user = UserRepository::update_role(pool, user_id, role).await?;

        info!(user_id = %user_id, admin_id = %caller.id, role = %role, "User role changed");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_limit() {
        assert_eq!(activity_limit(None).unwrap(), 10);
        assert_eq!(activity_limit(Some(25)).unwrap(), 25);
        assert_eq!(activity_limit(Some(1_000)).unwrap(), 100);
        assert!(matches!(activity_limit(Some(0)), Err(AppError::Validation(_))));
        assert!(matches!(activity_limit(Some(-3)), Err(AppError::Validation(_))));
    }
}
