//! User request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::MAX_NAME_LENGTH,
    utils::validation::{not_blank, password_strength},
};

/// Update user request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH), custom(function = "not_blank"))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    /// Required when changing your own password
    pub current_password: Option<String>,

    #[validate(custom(function = "password_strength"))]
    pub new_password: Option<String>,
}

/// Block / unblock request
#[derive(Debug, Deserialize)]
pub struct UpdateUserStatusRequest {
    pub is_blocked: bool,
}

/// List users query parameters
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub role: Option<String>,
    pub blocked: Option<bool>,
}
