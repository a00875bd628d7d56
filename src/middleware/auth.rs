//! Authentication middleware

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{
    constants::roles,
    error::{AppError, AppResult},
    services::AuthService,
    state::AppState,
};

/// Authenticated caller, resolved from the bearer token and the current user row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub name: String,
    pub role: String,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == roles::ADMIN
    }

    pub fn is_organizer_or_admin(&self) -> bool {
        matches!(self.role.as_str(), roles::ORGANIZER | roles::ADMIN)
    }

    /// Caller is `owner_id` or holds the admin override
    pub fn owns_or_admin(&self, owner_id: &Uuid) -> bool {
        self.id == *owner_id || self.is_admin()
    }

    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin access required".to_string()))
        }
    }

    pub fn require_organizer_or_admin(&self) -> AppResult<()> {
        if self.is_organizer_or_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Organizer or admin access required".to_string(),
            ))
        }
    }

    pub fn require_owner_or_admin(&self, owner_id: &Uuid) -> AppResult<()> {
        if self.owns_or_admin(owner_id) {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "You can only manage your own resources".to_string(),
            ))
        }
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthenticated)
    }
}

/// Optional authenticated user wrapper (never fails)
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolve the caller. The user row is re-read on every call so that blocks
/// and role changes apply to tokens already issued.
async fn resolve_user(state: &AppState, headers: &HeaderMap) -> AppResult<AuthenticatedUser> {
    let token = bearer_token(headers).ok_or(AppError::Unauthenticated)?;
    let claims = AuthService::verify_token(token, &state.config().jwt.secret)?;
    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthenticated)?;

    let user = AuthService::get_user_by_id(state.db(), &user_id)
        .await?
        .ok_or(AppError::AccountNotFound)?;

    if user.is_blocked {
        return Err(AppError::AccountBlocked);
    }

    Ok(AuthenticatedUser {
        id: user.id,
        name: user.name,
        role: user.role,
    })
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let user = resolve_user(&state, request.headers())
        .await
        .inspect_err(|e| debug!(path = %path, code = e.error_code(), "Authentication failed"))?;

    debug!(path = %path, user_id = %user.id, role = %user.role, "User authenticated");

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Optional authentication middleware (doesn't fail if no token)
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if bearer_token(request.headers()).is_some() {
        match resolve_user(&state, request.headers()).await {
            Ok(user) => {
                request.extensions_mut().insert(user);
            }
            Err(e) => debug!(code = e.error_code(), "Ignoring unusable credential"),
        }
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn caller(role: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            name: "Caller".to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));
    }

    #[test]
    fn test_role_predicates() {
        assert!(caller(roles::ADMIN).is_admin());
        assert!(caller(roles::ADMIN).is_organizer_or_admin());
        assert!(caller(roles::ORGANIZER).is_organizer_or_admin());
        assert!(!caller(roles::ATTENDEE).is_organizer_or_admin());
        assert!(matches!(
            caller(roles::ATTENDEE).require_organizer_or_admin(),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            caller(roles::ORGANIZER).require_admin(),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_ownership() {
        let organizer = caller(roles::ORGANIZER);
        let other = Uuid::new_v4();

        assert!(organizer.owns_or_admin(&organizer.id));
        assert!(!organizer.owns_or_admin(&other));
        assert!(organizer.require_owner_or_admin(&other).is_err());
        assert!(caller(roles::ADMIN).owns_or_admin(&other));
    }
}
