//! Custom error types and handling
//!
//! This module defines the application's error types and implements
//! conversion to HTTP responses for the Axum framework.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Account no longer exists")]
    AccountNotFound,

    #[error("Your account has been blocked. Please contact support.")]
    AccountBlocked,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Resource errors
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // Registration ledger
    #[error("Already registered for this event")]
    DuplicateRegistration,

    #[error("Event is full")]
    EventFull,

    #[error("Event is not open for registration")]
    EventNotOpen,

    #[error("Event has already taken place")]
    EventAlreadyOccurred,

    // Feedback ledger
    #[error("You must be registered for this event to leave feedback")]
    NotRegistered,

    #[error("Event has not occurred yet")]
    EventNotYetOccurred,

    #[error("You have already submitted feedback for this event")]
    AlreadySubmitted,

    #[error("Rating must be between 1 and 5")]
    InvalidRating,

    // Rate limiting
    #[error("Too many requests")]
    TooManyRequests,

    // Store errors
    #[error("Database error: {0}")]
    Database(String),

    #[error("Redis error: {0}")]
    Redis(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

/// Error details in response
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::AccountBlocked => "ACCOUNT_BLOCKED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::DuplicateRegistration => "DUPLICATE_REGISTRATION",
            Self::EventFull => "EVENT_FULL",
            Self::EventNotOpen => "EVENT_NOT_OPEN",
            Self::EventAlreadyOccurred => "EVENT_ALREADY_OCCURRED",
            Self::NotRegistered => "NOT_REGISTERED",
            Self::EventNotYetOccurred => "EVENT_NOT_YET_OCCURRED",
            Self::AlreadySubmitted => "ALREADY_SUBMITTED",
            Self::InvalidRating => "INVALID_RATING",
            Self::TooManyRequests => "TOO_MANY_REQUESTS",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Redis(_) => "REDIS_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::Unauthenticated | Self::AccountNotFound => {
                StatusCode::UNAUTHORIZED
            }
            Self::AccountBlocked | Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Validation(_)
            | Self::InvalidRating
            | Self::EventNotOpen
            | Self::EventAlreadyOccurred
            | Self::NotRegistered
            | Self::EventNotYetOccurred => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_)
            | Self::DuplicateRegistration
            | Self::EventFull
            | Self::AlreadySubmitted => StatusCode::CONFLICT,
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            Self::Database(_) | Self::Redis(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log store failures but don't expose details to clients
        let message = match &self {
            AppError::Internal(e) => {
                tracing::error!(error = ?e, "Internal error");
                "An internal error occurred".to_string()
            }
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                "A database error occurred".to_string()
            }
            AppError::Redis(e) => {
                tracing::error!(error = %e, "Redis error");
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            success: false,
            error: ErrorDetails {
                code: self.error_code().to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

// Implement From for common error types
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    AppError::Conflict("Resource already exists".to_string())
                } else if db_err.is_foreign_key_violation() {
                    AppError::Conflict("Resource is still referenced".to_string())
                } else {
                    AppError::Database(db_err.to_string())
                }
            }
            _ => AppError::Database(err.to_string()),
        }
    }
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::Redis(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(_: jsonwebtoken::errors::Error) -> Self {
        AppError::Unauthenticated
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Returns true when a store error is a unique-constraint violation on `constraint`
pub fn is_unique_violation_on(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_errors_map_to_conflict() {
        for err in [
            AppError::DuplicateRegistration,
            AppError::EventFull,
            AppError::AlreadySubmitted,
        ] {
            assert_eq!(err.status_code(), StatusCode::CONFLICT);
        }
    }

    #[test]
    fn test_eligibility_errors_map_to_bad_request() {
        assert_eq!(AppError::NotRegistered.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::EventNotYetOccurred.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidRating.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidRating.error_code(), "INVALID_RATING");
    }

    #[test]
    fn test_gate_errors() {
        assert_eq!(AppError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::AccountNotFound.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::AccountBlocked.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::AccountBlocked.error_code(), "ACCOUNT_BLOCKED");
    }

    #[test]
    fn test_row_not_found_becomes_not_found() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = AppError::Internal(anyhow::anyhow!("connection refused at 10.0.0.3"))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
        assert_eq!(json["error"]["message"], "An internal error occurred");
    }
}
