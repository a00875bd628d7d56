//! Utility functions

pub mod crypto;
pub mod pagination;
pub mod time;
pub mod validation;

pub use crypto::{generate_reset_token, hash_string};
pub use pagination::page_offset;
pub use time::{now_utc, parse_date, parse_time, today};
pub use validation::{normalize_email, sanitize_string, validate_password, validate_role};
