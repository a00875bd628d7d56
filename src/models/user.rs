//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::roles;

/// User database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub is_blocked: bool,
    #[serde(skip_serializing)]
    pub reset_token_hash: Option<String>,
    #[serde(skip_serializing)]
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if user has admin privileges
    pub fn is_admin(&self) -> bool {
        self.role == roles::ADMIN
    }

    /// Check if user can create and manage events
    pub fn can_manage_events(&self) -> bool {
        matches!(self.role.as_str(), roles::ADMIN | roles::ORGANIZER)
    }

    /// Check whether a stored reset token is still usable at `now`
    pub fn reset_token_valid_at(&self, now: DateTime<Utc>) -> bool {
        match (&self.reset_token_hash, self.reset_token_expires_at) {
            (Some(_), Some(expires_at)) => expires_at > now,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user(role: &str) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: String::new(),
            role: role.to_string(),
            is_blocked: false,
            reset_token_hash: None,
            reset_token_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_role_checks() {
        assert!(user(roles::ADMIN).is_admin());
        assert!(user(roles::ADMIN).can_manage_events());
        assert!(user(roles::ORGANIZER).can_manage_events());
        assert!(!user(roles::ATTENDEE).can_manage_events());
    }

    #[test]
    fn test_reset_token_expiry() {
        let now = Utc::now();
        let mut u = user(roles::ATTENDEE);
        assert!(!u.reset_token_valid_at(now));

        u.reset_token_hash = Some("abc".to_string());
        u.reset_token_expires_at = Some(now + Duration::minutes(5));
        assert!(u.reset_token_valid_at(now));
        assert!(!u.reset_token_valid_at(now + Duration::minutes(10)));
    }
}
