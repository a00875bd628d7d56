//! Event request DTOs

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{
        MAX_EVENT_DESCRIPTION_LENGTH, MAX_EVENT_LOCATION_LENGTH, MAX_EVENT_TITLE_LENGTH,
        MAX_MODERATION_REASON_LENGTH,
    },
    error::{AppError, AppResult},
    utils::{parse_date, parse_time, validation::not_blank},
};

/// Create event request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(
        length(min = 1, max = MAX_EVENT_TITLE_LENGTH),
        custom(function = "not_blank")
    )]
    pub title: String,

    #[validate(length(max = MAX_EVENT_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    /// `YYYY-MM-DD`
    pub date: String,

    /// `HH:MM` or `HH:MM:SS`
    pub time: String,

    #[validate(
        length(min = 1, max = MAX_EVENT_LOCATION_LENGTH),
        custom(function = "not_blank")
    )]
    pub location: String,

    pub category_id: Option<Uuid>,

    #[validate(range(min = 1))]
    pub max_attendees: i32,

    #[validate(url)]
    pub image_url: Option<String>,
}

/// Partial event update; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(
        length(min = 1, max = MAX_EVENT_TITLE_LENGTH),
        custom(function = "not_blank")
    )]
    pub title: Option<String>,

    #[validate(length(max = MAX_EVENT_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    pub date: Option<String>,

    pub time: Option<String>,

    #[validate(
        length(min = 1, max = MAX_EVENT_LOCATION_LENGTH),
        custom(function = "not_blank")
    )]
    pub location: Option<String>,

    pub category_id: Option<Uuid>,

    #[validate(range(min = 1))]
    pub max_attendees: Option<i32>,

    #[validate(url)]
    pub image_url: Option<String>,

    pub status: Option<String>,

    #[validate(length(max = MAX_MODERATION_REASON_LENGTH))]
    pub cancellation_reason: Option<String>,
}

/// List events query parameters
#[derive(Debug, Deserialize)]
pub struct ListEventsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub category_id: Option<Uuid>,
    /// Only events dated today or later
    pub upcoming: Option<bool>,
}

pub(crate) fn event_date(raw: &str) -> AppResult<NaiveDate> {
    parse_date(raw).ok_or_else(|| AppError::Validation("date must be YYYY-MM-DD".to_string()))
}

pub(crate) fn event_time(raw: &str) -> AppResult<NaiveTime> {
    parse_time(raw).ok_or_else(|| AppError::Validation("time must be HH:MM[:SS]".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateEventRequest {
        CreateEventRequest {
            title: "Rust Meetup".to_string(),
            description: None,
            date: "2030-05-01".to_string(),
            time: "18:30".to_string(),
            location: "Hall A".to_string(),
            category_id: None,
            max_attendees: 50,
            image_url: None,
        }
    }

    #[test]
    fn test_create_event_request_validation() {
        assert!(create_request().validate().is_ok());

        let no_seats = CreateEventRequest {
            max_attendees: 0,
            ..create_request()
        };
        let errors = no_seats.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("max_attendees"));

        let long_title = CreateEventRequest {
            title: "x".repeat(201),
            ..create_request()
        };
        assert!(long_title.validate().is_err());

        let blank_location = CreateEventRequest {
            location: "  ".to_string(),
            ..create_request()
        };
        assert!(blank_location.validate().is_err());
    }

    #[test]
    fn test_event_date_and_time_parsing() {
        assert_eq!(
            event_date("2030-05-01").unwrap(),
            NaiveDate::from_ymd_opt(2030, 5, 1).unwrap()
        );
        assert!(matches!(event_date("01/05/2030"), Err(AppError::Validation(_))));

        assert_eq!(
            event_time("18:30").unwrap(),
            NaiveTime::from_hms_opt(18, 30, 0).unwrap()
        );
        assert!(matches!(event_time("6pm"), Err(AppError::Validation(_))));
    }
}
