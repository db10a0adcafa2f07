// ABOUTME: Authentication and session management for the fitness API
// ABOUTME: Issues and validates HS256 JWTs, hashes passwords and enforces the password policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! # Authentication
//!
//! Users authenticate with a username and password and receive a bearer
//! token signed with the server secret. Every other endpoint resolves the
//! caller from that token.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::constants::{limits, service_names};
use crate::errors::{AppError, AppResult};
use fitlog_core::models::User;

/// `JWT` claims for user authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at timestamp (seconds since Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (seconds since Unix epoch)
    pub exp: i64,
    /// Audience
    pub aud: String,
}

impl Claims {
    /// User id carried in `sub`
    ///
    /// # Errors
    ///
    /// Returns an error if the subject is not a UUID
    pub fn user_id(&self) -> AppResult<Uuid> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::auth_invalid("Token subject is not a valid user id"))
    }
}

/// Authentication manager for `JWT` tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a new authentication manager from the configured secret
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            token_expiry_hours: config.jwt_expiry_hours,
        }
    }

    /// Lifetime of issued tokens in hours
    #[must_use]
    pub const fn token_expiry_hours(&self) -> i64 {
        self.token_expiry_hours
    }

    /// Generate a `JWT` token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, user: &User) -> AppResult<String> {
        self.generate_token_with_expiry(user, Duration::hours(self.token_expiry_hours))
    }

    fn generate_token_with_expiry(&self, user: &User, lifetime: Duration) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            aud: service_names::FITLOG_SERVER.to_owned(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }

    /// Validate a `JWT` token and return its claims
    ///
    /// # Errors
    ///
    /// Returns `AuthExpired` for an elapsed token and `AuthInvalid` for a bad
    /// signature, wrong audience or malformed token
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_audience(&[service_names::FITLOG_SERVER]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::auth_expired(),
                ErrorKind::InvalidSignature => {
                    tracing::warn!("JWT token signature verification failed");
                    AppError::auth_invalid("Token signature verification failed")
                }
                _ => {
                    tracing::debug!("JWT token validation failed: {e:?}");
                    AppError::auth_invalid("Invalid token")
                }
            })
    }
}

/// Hash a password with bcrypt
///
/// # Errors
///
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> AppResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// Check a password against a stored bcrypt hash
///
/// A malformed hash counts as a mismatch.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Check a new password against the registration policy
///
/// # Errors
///
/// Returns `InvalidInput` naming the first rule the password breaks
pub fn validate_password_policy(password: &str) -> AppResult<()> {
    if password.chars().count() < limits::MIN_PASSWORD_LENGTH {
        return Err(AppError::invalid_input(format!(
            "Password must be at least {} characters long",
            limits::MIN_PASSWORD_LENGTH
        )));
    }
    if !password.chars().any(char::is_uppercase) {
        return Err(AppError::invalid_input(
            "Password must contain at least one uppercase letter",
        ));
    }
    if !password.chars().any(char::is_lowercase) {
        return Err(AppError::invalid_input(
            "Password must contain at least one lowercase letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::invalid_input(
            "Password must contain at least one number",
        ));
    }
    if !password
        .chars()
        .any(|c| limits::PASSWORD_SPECIAL_CHARS.contains(c))
    {
        return Err(AppError::invalid_input(
            "Password must contain at least one special character",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn test_manager() -> AuthManager {
        AuthManager::new(&AuthConfig {
            jwt_secret: "test_secret_for_unit_tests_only".into(),
            jwt_expiry_hours: 24,
        })
    }

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "ana".into(),
            email: "ana@example.com".into(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_token_round_trip() {
        let manager = test_manager();
        let user = test_user();

        let token = manager.generate_token(&user).unwrap();
        let claims = manager.validate_token(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.email, "ana@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_is_reported_as_expired() {
        let manager = test_manager();
        let token = manager
            .generate_token_with_expiry(&test_user(), Duration::hours(-1))
            .unwrap();

        let err = manager.validate_token(&token).unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthExpired);
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let other = AuthManager::new(&AuthConfig {
            jwt_secret: "a_completely_different_secret".into(),
            jwt_expiry_hours: 24,
        });
        let token = other.generate_token(&test_user()).unwrap();

        let err = test_manager().validate_token(&token).unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthInvalid);
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let err = test_manager().validate_token("not.a.jwt").unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthInvalid);
    }

    #[test]
    fn test_password_hash_verification() {
        let hash = hash_password("Secreta1!").unwrap();
        assert!(verify_password("Secreta1!", &hash));
        assert!(!verify_password("secreta1!", &hash));
        assert!(!verify_password("Secreta1!", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_password_policy_reports_first_failing_rule() {
        let cases = [
            ("Ab1!", "at least 8"),
            ("abcdefg1!", "uppercase"),
            ("ABCDEFG1!", "lowercase"),
            ("Abcdefgh!", "number"),
            ("Abcdefgh1", "special"),
        ];
        for (password, expected) in cases {
            let err = validate_password_policy(password).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidInput);
            assert!(
                err.message.contains(expected),
                "{password}: {}",
                err.message
            );
        }

        assert!(validate_password_policy("Abcdefg1!").is_ok());
    }
}
