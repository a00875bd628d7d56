//! Feedback response DTOs

use serde::Serialize;

use crate::models::{FeedbackEligibility, FeedbackWithAuthor, RatingSummary};

/// Eligibility answer
#[derive(Debug, Serialize)]
pub struct CanFeedbackResponse {
    pub can_feedback: bool,
    pub reason: Option<&'static str>,
}

impl From<FeedbackEligibility> for CanFeedbackResponse {
    fn from(eligibility: FeedbackEligibility) -> Self {
        Self {
            can_feedback: eligibility.is_eligible(),
            reason: eligibility.reason(),
        }
    }
}

/// Feedback entries with their rating summary
#[derive(Debug, Serialize)]
pub struct FeedbackListResponse {
    pub items: Vec<FeedbackWithAuthor>,
    #[serde(flatten)]
    pub summary: RatingSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_feedback_response() {
        let yes = CanFeedbackResponse::from(FeedbackEligibility::Eligible);
        assert!(yes.can_feedback);
        assert_eq!(yes.reason, None);

        let no = CanFeedbackResponse::from(FeedbackEligibility::EventNotYetOccurred);
        assert!(!no.can_feedback);
        assert_eq!(no.reason, Some("EVENT_NOT_YET_OCCURRED"));

        let body = serde_json::to_value(CanFeedbackResponse::from(
            FeedbackEligibility::AlreadySubmitted,
        ))
        .unwrap();
        assert_eq!(body["reason"], "ALREADY_SUBMITTED");
    }
}
