//! Authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    config::{AuthConfig, JwtConfig},
    constants::roles,
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::User,
    services::notifier::{deliver_reset_link, ResetTokenNotifier},
    utils::{generate_reset_token, hash_string, normalize_email, validate_password},
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Issued bearer credential
#[derive(Debug)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a new user and issue a credential
    pub async fn register(
        pool: &PgPool,
        jwt: &JwtConfig,
        name: &str,
        email: &str,
        password: &str,
        role: Option<&str>,
    ) -> AppResult<(User, IssuedToken)> {
        let role = role.unwrap_or(roles::ATTENDEE);
        if !roles::SELF_ASSIGNABLE.contains(&role) {
            return Err(AppError::Validation(format!(
                "Role must be one of {:?}",
                roles::SELF_ASSIGNABLE
            )));
        }

        let email = normalize_email(email);

        // Check if email exists
        if UserRepository::find_by_email(pool, &email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        // Hash password
        let password_hash = Self::hash_password(password)?;

        // Create user
        let user = UserRepository::create(pool, name.trim(), &email, &password_hash, role).await?;
        let token = Self::generate_access_token(&user, jwt)?;

        info!(user_id = %user.id, role = %user.role, "User registered");

        Ok((user, token))
    }

    /// Login with email and password
    pub async fn login(
        pool: &PgPool,
        jwt: &JwtConfig,
        email: &str,
        password: &str,
    ) -> AppResult<(User, IssuedToken)> {
        // Find user
        let user = UserRepository::find_by_email(pool, &normalize_email(email))
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        // Verify password
        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        // Check if blocked
        if user.is_blocked {
            return Err(AppError::AccountBlocked);
        }

        let token = Self::generate_access_token(&user, jwt)?;

        Ok((user, token))
    }

    /// Start a password reset.
    ///
    /// Always succeeds for well-formed input so callers cannot probe which
    /// emails are registered. The raw token leaves only through `notifier`.
    pub async fn forgot_password(
        pool: &PgPool,
        notifier: &dyn ResetTokenNotifier,
        config: &AuthConfig,
        email: &str,
    ) -> AppResult<()> {
        let Some(user) = UserRepository::find_by_email(pool, &normalize_email(email)).await? else {
            info!("Password reset requested for unknown email");
            return Ok(());
        };

        let token = generate_reset_token();
        let expires_at = Utc::now() + Duration::minutes(config.reset_token_expiry_minutes);
        UserRepository::set_reset_token(pool, &user.id, &hash_string(&token), expires_at).await?;

        let delivered = deliver_reset_link(
            notifier,
            &config.password_reset_url,
            &user.email,
            &user.name,
            &token,
        )
        .await;
        info!(user_id = %user.id, delivered, "Password reset token issued");

        Ok(())
    }

    /// Finish a password reset with a previously issued token (single use)
    pub async fn reset_password(pool: &PgPool, token: &str, new_password: &str) -> AppResult<()> {
        validate_password(new_password).map_err(|e| AppError::Validation(e.to_string()))?;

        let password_hash = Self::hash_password(new_password)?;
        let consumed = UserRepository::consume_reset_token(
            pool,
            &hash_string(token.trim()),
            &password_hash,
            Utc::now(),
        )
        .await?;

        if !consumed {
            return Err(AppError::Validation(
                "Invalid or expired reset token".to_string(),
            ));
        }

        Ok(())
    }

    /// Get user by ID
    pub async fn get_user_by_id(pool: &PgPool, user_id: &Uuid) -> AppResult<Option<User>> {
        UserRepository::find_by_id(pool, user_id).await
    }

    /// Verify JWT token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Hash password using Argon2
    pub(crate) fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify password against hash
    pub(crate) fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Generate access token
    fn generate_access_token(user: &User, jwt: &JwtConfig) -> AppResult<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(jwt.expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(jwt.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))?;

        Ok(IssuedToken {
            access_token,
            expires_in: jwt.expiry_hours * 3600,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiry_hours: 1,
        }
    }

    fn user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            password_hash: String::new(),
            role: roles::ORGANIZER.to_string(),
            is_blocked: false,
            reset_token_hash: None,
            reset_token_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_token_round_trip() {
        let user = user();
        let issued = AuthService::generate_access_token(&user, &jwt_config()).unwrap();
        assert_eq!(issued.expires_in, 3600);

        let claims = AuthService::verify_token(&issued.access_token, "test-secret").unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.role, roles::ORGANIZER);
    }

    #[test]
    fn test_token_with_wrong_secret_is_unauthenticated() {
        let issued = AuthService::generate_access_token(&user(), &jwt_config()).unwrap();
        let err = AuthService::verify_token(&issued.access_token, "other-secret").unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            role: roles::ATTENDEE.to_string(),
            exp: (now - Duration::hours(2)).timestamp(),
            iat: (now - Duration::hours(3)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(AuthService::verify_token(&token, "test-secret").is_err());
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = AuthService::hash_password("Secret123").unwrap();
        assert!(AuthService::verify_password("Secret123", &hash).unwrap());
        assert!(!AuthService::verify_password("Secret124", &hash).unwrap());
    }
}
