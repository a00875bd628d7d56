//! User service

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    models::User,
    services::AuthService,
    utils::{normalize_email, page_offset, validate_password},
};

/// Profile changes requested through `PUT /users/{id}`
#[derive(Debug, Default)]
pub struct ProfileUpdate<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub current_password: Option<&'a str>,
    pub new_password: Option<&'a str>,
}

/// User service for business logic
pub struct UserService;

impl UserService {
    /// Get a user profile (self or admin)
    pub async fn get_user(pool: &PgPool, caller: &AuthenticatedUser, id: &Uuid) -> AppResult<User> {
        caller.require_owner_or_admin(id)?;
        Self::find_user(pool, id).await
    }

    async fn find_user(pool: &PgPool, id: &Uuid) -> AppResult<User> {
        UserRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// List users with pagination
    pub async fn list_users(
        pool: &PgPool,
        page: u32,
        per_page: u32,
        search: Option<&str>,
        role: Option<&str>,
        blocked: Option<bool>,
    ) -> AppResult<(Vec<User>, i64)> {
        let offset = page_offset(page, per_page);
        let limit = per_page as i64;

        UserRepository::list(pool, offset, limit, search, role, blocked).await
    }

    /// Update user profile
    pub async fn update_user(
        pool: &PgPool,
        caller: &AuthenticatedUser,
        target_id: &Uuid,
        update: ProfileUpdate<'_>,
    ) -> AppResult<User> {
        caller.require_owner_or_admin(target_id)?;
        let user = Self::find_user(pool, target_id).await?;

        let email = update.email.map(normalize_email);
        if let Some(email) = email.as_deref() {
            if let Some(existing) = UserRepository::find_by_email(pool, email).await? {
                if existing.id != user.id {
                    return Err(AppError::Conflict("Email already registered".to_string()));
                }
            }
        }

        // Changing your own password needs the current one; admins resetting
        // someone else's do not.
        let password_hash = match update.new_password {
            Some(new_password) => {
                validate_password(new_password)
                    .map_err(|e| AppError::Validation(e.to_string()))?;

                if caller.id == user.id {
                    let current = update.current_password.ok_or_else(|| {
                        AppError::Validation("Current password required".to_string())
                    })?;
                    if !AuthService::verify_password(current, &user.password_hash)? {
                        return Err(AppError::InvalidCredentials);
                    }
                }

                Some(AuthService::hash_password(new_password)?)
            }
            None => None,
        };

        UserRepository::update(
            pool,
            target_id,
            update.name.map(str::trim),
            email.as_deref(),
            password_hash.as_deref(),
        )
        .await
    }

    /// Block or unblock a user (admin, never yourself)
    pub async fn set_blocked(
        pool: &PgPool,
        caller: &AuthenticatedUser,
        target_id: &Uuid,
        blocked: bool,
    ) -> AppResult<User> {
        caller.require_admin()?;
        if caller.id == *target_id {
            return Err(AppError::Validation(
                "You cannot change your own status".to_string(),
            ));
        }

        Self::find_user(pool, target_id).await?;
        let user = UserRepository::set_blocked(pool, target_id, blocked).await?;

        info!(admin_id = %caller.id, user_id = %target_id, blocked, "User status changed");
        Ok(user)
    }

    /// Delete a user (admin, never yourself).
    ///
    /// Registrations and feedback go with the account; organizers must hand
    /// off or delete their events first.
    pub async fn delete_user(
        pool: &PgPool,
        caller: &AuthenticatedUser,
        target_id: &Uuid,
    ) -> AppResult<()> {
        caller.require_admin()?;
        if caller.id == *target_id {
            return Err(AppError::Validation(
                "You cannot delete your own account".to_string(),
            ));
        }

        Self::find_user(pool, target_id).await?;

        let organized = UserRepository::count_organized_events(pool, target_id).await?;
        if organized > 0 {
            return Err(AppError::Conflict(format!(
                "User still organizes {} event(s)",
                organized
            )));
        }

        if !UserRepository::delete(pool, target_id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        info!(admin_id = %caller.id, user_id = %target_id, "User deleted");
        Ok(())
    }
}
