//! User response DTOs

use serde::Serialize;

use crate::handlers::auth::UserResponse;

/// User list response
#[derive(Debug, Serialize)]
pub struct UsersListResponse {
    pub items: Vec<UserResponse>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}
