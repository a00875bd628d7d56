//! Registration request DTOs

use serde::Deserialize;
use uuid::Uuid;

/// Register for an event
#[derive(Debug, Deserialize)]
pub struct CreateRegistrationRequest {
    pub event_id: Uuid,
    /// Admin override: register someone else
    pub user_id: Option<Uuid>,
}
