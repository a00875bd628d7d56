//! Rate limiting middleware

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use redis::AsyncCommands;
use std::net::SocketAddr;
use tracing::warn;

use crate::{
    constants::{rate_limits, API_BASE_PATH},
    error::AppError,
    state::AppState,
};

/// Endpoint group sharing one counter per client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Auth,
    Ledger,
    General,
}

impl Bucket {
    fn classify(method: &Method, path: &str) -> Self {
        let rest = path.strip_prefix(API_BASE_PATH).unwrap_or(path);

        if rest.starts_with("/auth") {
            Self::Auth
        } else if *method == Method::POST
            && (rest.starts_with("/registrations") || rest.starts_with("/feedback"))
        {
            Self::Ledger
        } else {
            Self::General
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Ledger => "ledger",
            Self::General => "general",
        }
    }

    /// (max requests, window seconds)
    fn limit(&self) -> (i64, i64) {
        match self {
            Self::Auth => (rate_limits::AUTH_MAX_REQUESTS, rate_limits::AUTH_WINDOW_SECS),
            Self::Ledger => (
                rate_limits::LEDGER_MAX_REQUESTS,
                rate_limits::LEDGER_WINDOW_SECS,
            ),
            Self::General => (
                rate_limits::GENERAL_MAX_REQUESTS,
                rate_limits::GENERAL_WINDOW_SECS,
            ),
        }
    }
}

/// Rate limit middleware (fixed window per client IP and bucket)
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let bucket = Bucket::classify(request.method(), request.uri().path());
    let (limit, window) = bucket.limit();

    let key = format!("rate_limit:{}:{}", addr.ip(), bucket.name());
    let mut redis = state.redis();

    // Counter failures let the request through
    let count: i64 = match redis.incr(&key, 1).await {
        Ok(count) => count,
        Err(e) => {
            warn!(error = %e, "Rate limiter unavailable");
            return Ok(next.run(request).await);
        }
    };

    if count == 1 {
        // Set expiry on first request
        if let Err(e) = redis.expire::<_, ()>(&key, window).await {
            warn!(error = %e, key = %key, "Failed to set rate limit window");
        }
    }

    if count > limit {
        warn!(ip = %addr.ip(), bucket = bucket.name(), "Rate limit exceeded");
        return Err(AppError::TooManyRequests);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_classification() {
        assert_eq!(
            Bucket::classify(&Method::POST, "/api/v1/auth/login"),
            Bucket::Auth
        );
        assert_eq!(
            Bucket::classify(&Method::POST, "/api/v1/registrations"),
            Bucket::Ledger
        );
        assert_eq!(
            Bucket::classify(&Method::POST, "/api/v1/feedback"),
            Bucket::Ledger
        );
        assert_eq!(
            Bucket::classify(&Method::GET, "/api/v1/registrations/user/x"),
            Bucket::General
        );
        assert_eq!(Bucket::classify(&Method::GET, "/api/v1/events"), Bucket::General);
    }

    #[test]
    fn test_auth_is_strictest() {
        let (auth, _) = Bucket::Auth.limit();
        let (ledger, _) = Bucket::Ledger.limit();
        let (general, _) = Bucket::General.limit();
        assert!(auth < ledger && ledger < general);
    }
}
