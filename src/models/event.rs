//! Event model

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Event database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub category_id: Option<Uuid>,
    pub organizer_id: Uuid,
    pub max_attendees: i32,
    pub status: String,
    pub cancellation_reason: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Parsed lifecycle status
    pub fn lifecycle(&self) -> Option<EventStatus> {
        self.status.parse().ok()
    }

    /// The event day is strictly before `today`
    pub fn has_occurred(&self, today: NaiveDate) -> bool {
        self.date < today
    }

    /// Decide whether a new registration may be taken on `today`
    pub fn ensure_accepts_registrations(&self, today: NaiveDate) -> AppResult<()> {
        if self.lifecycle() != Some(EventStatus::Active) {
            return Err(AppError::EventNotOpen);
        }
        if self.has_occurred(today) {
            return Err(AppError::EventAlreadyOccurred);
        }
        Ok(())
    }

    /// Check whether `registered` registrations leave room for one more
    pub fn has_capacity_for(&self, registered: i64) -> bool {
        registered < i64::from(self.max_attendees)
    }

    /// Remaining seats, never negative
    pub fn available_spots(&self, registered: i64) -> i64 {
        (i64::from(self.max_attendees) - registered).max(0)
    }
}

/// Event lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Active,
    Cancelled,
    Completed,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            other => Err(AppError::Validation(format!(
                "Invalid status: {}. Valid statuses: {:?}",
                other,
                crate::constants::event_status::ALL
            ))),
        }
    }
}

/// Decide whether `next` may replace `current`.
///
/// Returns the cancellation reason to store: the trimmed reason when moving
/// to `cancelled`, `None` otherwise (leaving `cancelled` clears it). Only
/// admins may cancel or bring an event back from `cancelled`.
pub fn check_status_change(
    current: EventStatus,
    next: EventStatus,
    by_admin: bool,
    reason: Option<&str>,
) -> AppResult<Option<String>> {
    if !by_admin {
        if next == EventStatus::Cancelled {
            return Err(AppError::Forbidden(
                "Only administrators can cancel events".to_string(),
            ));
        }
        if current == EventStatus::Cancelled {
            return Err(AppError::Forbidden(
                "A cancelled event can only be reactivated by an administrator".to_string(),
            ));
        }
    }

    if next == EventStatus::Cancelled {
        let reason = reason.map(str::trim).filter(|r| !r.is_empty()).ok_or_else(|| {
            AppError::Validation("A reason is required to cancel an event".to_string())
        })?;
        return Ok(Some(reason.to_string()));
    }

    Ok(None)
}

/// Event row joined with catalog and ledger metadata
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub event: Event,
    pub category_name: Option<String>,
    pub organizer_name: String,
    pub registered_count: i64,
    pub is_registered: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn event(status: &str, date: NaiveDate, max_attendees: i32) -> Event {
        let now = Utc::now();
        Event {
            id: Uuid::new_v4(),
            title: "RustConf".to_string(),
            description: None,
            date,
            time: NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
            location: "Hall A".to_string(),
            category_id: None,
            organizer_id: Uuid::new_v4(),
            max_attendees,
            status: status.to_string(),
            cancellation_reason: None,
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_accepts_registrations_today_and_future() {
        assert!(event("active", today(), 10).ensure_accepts_registrations(today()).is_ok());
        assert!(
            event("active", today() + Duration::days(7), 10)
                .ensure_accepts_registrations(today())
                .is_ok()
        );
    }

    #[test]
    fn test_rejects_past_and_inactive_events() {
        let past = event("active", today() - Duration::days(1), 10);
        assert!(matches!(
            past.ensure_accepts_registrations(today()),
            Err(AppError::EventAlreadyOccurred)
        ));

        let cancelled = event("cancelled", today() + Duration::days(1), 10);
        assert!(matches!(
            cancelled.ensure_accepts_registrations(today()),
            Err(AppError::EventNotOpen)
        ));

        let completed = event("completed", today() + Duration::days(1), 10);
        assert!(matches!(
            completed.ensure_accepts_registrations(today()),
            Err(AppError::EventNotOpen)
        ));
    }

    #[test]
    fn test_capacity() {
        let e = event("active", today(), 2);
        assert!(e.has_capacity_for(0));
        assert!(e.has_capacity_for(1));
        assert!(!e.has_capacity_for(2));
        assert_eq!(e.available_spots(1), 1);
        assert_eq!(e.available_spots(5), 0);
    }

    #[test]
    fn test_organizer_status_changes() {
        use EventStatus::*;

        assert!(matches!(check_status_change(Active, Completed, false, None), Ok(None)));
        assert!(matches!(check_status_change(Completed, Active, false, None), Ok(None)));
        assert!(matches!(
            check_status_change(Active, Cancelled, false, Some("rain")),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            check_status_change(Cancelled, Active, false, None),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_admin_cancellation_requires_reason() {
        use EventStatus::*;

        assert!(matches!(
            check_status_change(Active, Cancelled, true, None),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            check_status_change(Active, Cancelled, true, Some("   ")),
            Err(AppError::Validation(_))
        ));
        assert_eq!(
            check_status_change(Active, Cancelled, true, Some(" venue closed ")).unwrap(),
            Some("venue closed".to_string())
        );
        // Leaving cancelled clears the reason
        assert_eq!(check_status_change(Cancelled, Active, true, Some("x")).unwrap(), None);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("active".parse::<EventStatus>().unwrap(), EventStatus::Active);
        assert_eq!(EventStatus::Cancelled.to_string(), "cancelled");
        assert!("archived".parse::<EventStatus>().is_err());
    }
}
