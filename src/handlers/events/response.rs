//! Event response DTOs

use serde::Serialize;

use crate::models::{Event, EventListing};

/// Event with catalog metadata and seat availability
#[derive(Debug, Serialize)]
pub struct EventResponse {
    #[serde(flatten)]
    pub event: Event,
    pub category_name: Option<String>,
    pub organizer_name: String,
    pub registered_count: i64,
    pub available_spots: i64,
    /// Only present for authenticated callers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_registered: Option<bool>,
}

impl EventResponse {
    pub fn from_listing(listing: EventListing, authenticated: bool) -> Self {
        let available_spots = listing.event.available_spots(listing.registered_count);
        Self {
            event: listing.event,
            category_name: listing.category_name,
            organizer_name: listing.organizer_name,
            registered_count: listing.registered_count,
            available_spots,
            is_registered: authenticated.then_some(listing.is_registered),
        }
    }
}

/// Paginated event list
#[derive(Debug, Serialize)]
pub struct EventsListResponse {
    pub items: Vec<EventResponse>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Deletion summary
#[derive(Debug, Serialize)]
pub struct DeleteEventResponse {
    pub success: bool,
    pub message: String,
    pub registrations_removed: u64,
    pub feedback_removed: u64,
}
