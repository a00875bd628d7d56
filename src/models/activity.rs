//! Admin reporting models

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// One entry of the recent-activity feed
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityEntry {
    /// `registration` or `event_created`
    pub kind: String,
    pub actor_name: String,
    pub subject_id: Uuid,
    pub subject_title: String,
    pub occurred_at: DateTime<Utc>,
}

/// Platform-wide counters
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlatformStats {
    pub total_users: i64,
    pub total_events: i64,
    pub total_registrations: i64,
    pub upcoming_events: i64,
    pub total_feedback: i64,
}
