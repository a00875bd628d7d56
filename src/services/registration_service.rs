//! Registration service
//!
//! Capacity and uniqueness are decided inside one transaction that holds the
//! event row lock, so concurrent registrations for the same event are applied
//! one at a time against the current count. The `(event_id, user_id)` unique
//! constraint backs up the duplicate check.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::repositories::{EventRepository, RegistrationRepository, UserRepository},
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    models::{Registration, RegistrationWithAttendee, RegistrationWithEvent},
    utils::today,
};

/// Registration service
pub struct RegistrationService;

impl RegistrationService {
    /// Register an attendee for an event.
    ///
    /// `attendee_id` defaults to the caller; registering someone else is an
    /// admin override.
    pub async fn register(
        pool: &PgPool,
        caller: &AuthenticatedUser,
        event_id: &Uuid,
        attendee_id: Option<Uuid>,
    ) -> AppResult<Registration> {
        let attendee_id = attendee_id.unwrap_or(caller.id);
        if attendee_id != caller.id {
            caller.require_admin()?;
            if UserRepository::find_by_id(pool, &attendee_id).await?.is_none() {
                return Err(AppError::NotFound("User not found".to_string()));
            }
        }

        let mut tx = pool.begin().await?;

        let event = EventRepository::lock_by_id(&mut *tx, event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
        event.ensure_accepts_registrations(today())?;

        if RegistrationRepository::find_by_pair(&mut *tx, event_id, &attendee_id)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateRegistration);
        }

        let registered = EventRepository::count_registrations(&mut *tx, event_id).await?;
        if !event.has_capacity_for(registered) {
            return Err(AppError::EventFull);
        }

        let registration = RegistrationRepository::insert(&mut *tx, event_id, &attendee_id).await?;
        tx.commit().await?;

        info!(
            registration_id = %registration.id,
            event_id = %event_id,
            user_id = %attendee_id,
            seats_taken = registered + 1,
            capacity = event.max_attendees,
            "Registration created"
        );

        Ok(registration)
    }

    /// Cancel a registration (its attendee or an admin)
    pub async fn cancel(
        pool: &PgPool,
        caller: &AuthenticatedUser,
        registration_id: &Uuid,
    ) -> AppResult<()> {
        let not_found = || AppError::NotFound("Registration not found".to_string());

        let registration = RegistrationRepository::find_by_id(pool, registration_id)
            .await?
            .ok_or_else(not_found)?;

        // Someone else's registration looks the same as a missing one
        if !caller.owns_or_admin(&registration.user_id) {
            return Err(not_found());
        }

        if !RegistrationRepository::delete(pool, registration_id).await? {
            return Err(not_found());
        }

        info!(
            registration_id = %registration_id,
            event_id = %registration.event_id,
            by = %caller.id,
            "Registration cancelled"
        );
        Ok(())
    }

    /// Attendee roster (event owner or admin)
    pub async fn list_for_event(
        pool: &PgPool,
        caller: &AuthenticatedUser,
        event_id: &Uuid,
    ) -> AppResult<Vec<RegistrationWithAttendee>> {
        let event = EventRepository::find_by_id(pool, event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
        caller.require_owner_or_admin(&event.organizer_id)?;

        RegistrationRepository::list_for_event(pool, event_id).await
    }

    /// Registrations held by a user (self or admin)
    pub async fn list_for_user(
        pool: &PgPool,
        caller: &AuthenticatedUser,
        user_id: &Uuid,
    ) -> AppResult<Vec<RegistrationWithEvent>> {
        caller.require_owner_or_admin(user_id)?;

        RegistrationRepository::list_for_user(pool, user_id).await
    }
}
