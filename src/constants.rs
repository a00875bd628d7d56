//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Default password reset token lifetime in minutes
pub const DEFAULT_RESET_TOKEN_EXPIRY_MINUTES: i64 = 60;

/// Raw reset token size in bytes (hex encoded on the wire)
pub const RESET_TOKEN_BYTES: usize = 32;

/// Default frontend page that consumes reset tokens
pub const DEFAULT_PASSWORD_RESET_URL: &str = "http://localhost:3000/reset-password";

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Display name maximum length
pub const MAX_NAME_LENGTH: u64 = 100;

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const ORGANIZER: &str = "organizer";
    pub const ATTENDEE: &str = "attendee";

    /// All user roles
    pub const ALL: &[&str] = &[ADMIN, ORGANIZER, ATTENDEE];

    /// Roles a user may pick for themselves at sign-up
    pub const SELF_ASSIGNABLE: &[&str] = &[ORGANIZER, ATTENDEE];
}

// =============================================================================
// EVENT SETTINGS
// =============================================================================

/// Event status identifiers
pub mod event_status {
    pub const ACTIVE: &str = "active";
    pub const CANCELLED: &str = "cancelled";
    pub const COMPLETED: &str = "completed";

    /// All event statuses
    pub const ALL: &[&str] = &[ACTIVE, CANCELLED, COMPLETED];
}

/// Maximum event title length
pub const MAX_EVENT_TITLE_LENGTH: u64 = 200;

/// Maximum event description length
pub const MAX_EVENT_DESCRIPTION_LENGTH: u64 = 10_000;

/// Maximum event location length
pub const MAX_EVENT_LOCATION_LENGTH: u64 = 255;

/// Maximum moderation reason length
pub const MAX_MODERATION_REASON_LENGTH: u64 = 1_000;

/// Maximum category name length
pub const MAX_CATEGORY_NAME_LENGTH: u64 = 100;

// =============================================================================
// FEEDBACK SETTINGS
// =============================================================================

/// Lowest accepted feedback rating
pub const MIN_RATING: i32 = 1;

/// Highest accepted feedback rating
pub const MAX_RATING: i32 = 5;

/// Maximum feedback comment length
pub const MAX_COMMENT_LENGTH: u64 = 2_000;

// =============================================================================
// REPORTING
// =============================================================================

/// Default number of entries in the admin activity feed
pub const DEFAULT_ACTIVITY_LIMIT: i64 = 10;

/// Upper bound for the admin activity feed
pub const MAX_ACTIVITY_LIMIT: i64 = 100;

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Rate limiting configuration
pub mod rate_limits {
    /// Auth endpoints - max requests
    pub const AUTH_MAX_REQUESTS: i64 = 10;
    /// Auth endpoints - window in seconds
    pub const AUTH_WINDOW_SECS: i64 = 60;

    /// Registration and feedback writes - max requests
    pub const LEDGER_MAX_REQUESTS: i64 = 30;
    /// Registration and feedback writes - window in seconds
    pub const LEDGER_WINDOW_SECS: i64 = 60;

    /// General API - max requests
    pub const GENERAL_MAX_REQUESTS: i64 = 120;
    /// General API - window in seconds
    pub const GENERAL_WINDOW_SECS: i64 = 60;
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated results
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;
