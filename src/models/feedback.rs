//! Feedback model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    constants::{MAX_RATING, MIN_RATING},
    error::{AppError, AppResult},
};

/// Post-event feedback left by an attendee
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Feedback {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Feedback joined with its author and event
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FeedbackWithAuthor {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub event_title: String,
}

/// Check a rating is on the 1..=5 scale
pub fn validate_rating(rating: i32) -> AppResult<()> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(AppError::InvalidRating)
    }
}

/// Average rating and number of ratings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingSummary {
    pub average_rating: Option<f64>,
    pub total: usize,
}

impl RatingSummary {
    pub fn from_ratings(ratings: impl IntoIterator<Item = i32>) -> Self {
        let (sum, total) = ratings
            .into_iter()
            .fold((0i64, 0usize), |(sum, n), r| (sum + i64::from(r), n + 1));

        let average_rating = if total == 0 {
            None
        } else {
            // Two decimals
            Some((sum as f64 / total as f64 * 100.0).round() / 100.0)
        };

        Self {
            average_rating,
            total,
        }
    }
}

/// Outcome of a feedback eligibility check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackEligibility {
    Eligible,
    NotRegistered,
    EventNotYetOccurred,
    AlreadySubmitted,
}

impl FeedbackEligibility {
    /// Evaluate eligibility; checks run in the order registration, date, duplicate.
    pub fn evaluate(
        registered: bool,
        event_date: NaiveDate,
        today: NaiveDate,
        already_submitted: bool,
    ) -> Self {
        if !registered {
            Self::NotRegistered
        } else if event_date >= today {
            Self::EventNotYetOccurred
        } else if already_submitted {
            Self::AlreadySubmitted
        } else {
            Self::Eligible
        }
    }

    pub fn is_eligible(&self) -> bool {
        *self == Self::Eligible
    }

    /// Machine-readable reason, absent when eligible
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Self::Eligible => None,
            Self::NotRegistered => Some("NOT_REGISTERED"),
            Self::EventNotYetOccurred => Some("EVENT_NOT_YET_OCCURRED"),
            Self::AlreadySubmitted => Some("ALREADY_SUBMITTED"),
        }
    }

    pub fn into_result(self) -> AppResult<()> {
        match self {
            Self::Eligible => Ok(()),
            Self::NotRegistered => Err(AppError::NotRegistered),
            Self::EventNotYetOccurred => Err(AppError::EventNotYetOccurred),
            Self::AlreadySubmitted => Err(AppError::AlreadySubmitted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(matches!(validate_rating(0), Err(AppError::InvalidRating)));
        assert!(matches!(validate_rating(6), Err(AppError::InvalidRating)));
    }

    #[test]
    fn test_rating_summary() {
        let empty = RatingSummary::from_ratings(Vec::new());
        assert_eq!(empty.average_rating, None);
        assert_eq!(empty.total, 0);

        let summary = RatingSummary::from_ratings([5, 4, 4]);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.average_rating, Some(4.33));
    }

    #[test]
    fn test_eligible_after_event() {
        let yesterday = today() - Duration::days(1);
        let outcome = FeedbackEligibility::evaluate(true, yesterday, today(), false);
        assert!(outcome.is_eligible());
        assert_eq!(outcome.reason(), None);
    }

    #[test]
    fn test_event_today_is_not_yet_occurred() {
        let outcome = FeedbackEligibility::evaluate(true, today(), today(), false);
        assert_eq!(outcome, FeedbackEligibility::EventNotYetOccurred);
    }

    #[test]
    fn test_check_order() {
        let tomorrow = today() + Duration::days(1);
        let yesterday = today() - Duration::days(1);

        // Registration is checked first, even when everything else fails too
        assert_eq!(
            FeedbackEligibility::evaluate(false, tomorrow, today(), true),
            FeedbackEligibility::NotRegistered
        );
        // Date before duplicate
        assert_eq!(
            FeedbackEligibility::evaluate(true, tomorrow, today(), true),
            FeedbackEligibility::EventNotYetOccurred
        );
        assert_eq!(
            FeedbackEligibility::evaluate(true, yesterday, today(), true),
            FeedbackEligibility::AlreadySubmitted
        );
    }

    #[test]
    fn test_into_result() {
        assert!(matches!(
            FeedbackEligibility::AlreadySubmitted.into_result(),
            Err(AppError::AlreadySubmitted)
        ));
        assert!(FeedbackEligibility::Eligible.into_result().is_ok());
    }
}
