//! Admin response DTOs

use serde::Serialize;

use crate::models::ActivityEntry;

/// Activity feed response
#[derive(Debug, Serialize)]
pub struct ActivitiesResponse {
    pub items: Vec<ActivityEntry>,
    pub limit: i64,
}
