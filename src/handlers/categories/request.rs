//! Category request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{constants::MAX_CATEGORY_NAME_LENGTH, utils::validation::not_blank};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(
        length(min = 1, max = MAX_CATEGORY_NAME_LENGTH),
        custom(function = "not_blank")
    )]
    pub name: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(
        length(min = 1, max = MAX_CATEGORY_NAME_LENGTH),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,
}
