//! Admin request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::MAX_MODERATION_REASON_LENGTH,
    error::{AppError, AppResult},
};

/// Set an event's status
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEventStatusRequest {
    #[validate(length(min = 1))]
    pub status: String,

    /// Required when the new status is `cancelled`
    #[validate(length(max = MAX_MODERATION_REASON_LENGTH))]
    pub reason: Option<String>,
}

/// Cancel an event
#[derive(Debug, Deserialize, Validate)]
pub struct CancelEventRequest {
    #[validate(length(max = MAX_MODERATION_REASON_LENGTH))]
    pub reason: Option<String>,
}

/// Update user role request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRoleRequest {
    #[validate(length(min = 1))]
    pub role: String,
}

/// Activity feed query parameters
#[derive(Debug, Deserialize)]
pub struct ActivitiesQuery {
    pub limit: Option<String>,
}

impl ActivitiesQuery {
    /// Requested feed size as a number, if one was given
    pub fn requested_limit(&self) -> AppResult<Option<i64>> {
        self.limit
            .as_deref()
            .map(|raw| {
                raw.trim().parse::<i64>().map_err(|_| {
                    AppError::Validation("limit must be a positive integer".to_string())
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: Option<&str>) -> ActivitiesQuery {
        ActivitiesQuery {
            limit: limit.map(str::to_string),
        }
    }

    #[test]
    fn test_requested_limit() {
        assert_eq!(query(None).requested_limit().unwrap(), None);
        assert_eq!(query(Some("25")).requested_limit().unwrap(), Some(25));
        assert_eq!(query(Some("-1")).requested_limit().unwrap(), Some(-1));
        assert!(matches!(
            query(Some("ten")).requested_limit(),
            Err(AppError::Validation(_))
        ));
    }
}
