//! Feedback request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::constants::MAX_COMMENT_LENGTH;

/// Submit feedback for an attended event.
///
/// The rating range is checked by the service so an out-of-range value
/// reports `INVALID_RATING` rather than a generic validation error.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitFeedbackRequest {
    pub event_id: Uuid,

    pub rating: i32,

    #[validate(length(max = MAX_COMMENT_LENGTH))]
    pub comment: Option<String>,
}
