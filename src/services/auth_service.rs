//! Authentication service - account lifecycle and token handling.
//!
//! Signup is a three-step flow: a verification code is mailed to a
//! university address, the code is exchanged for a short-lived verified
//! marker, and the marker is consumed by the actual signup. Codes and
//! markers live in the shared cache, not in process memory, so any instance
//! can serve any step.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{
    is_university_email, Config, OTP_LENGTH, OTP_TTL_SECONDS, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER,
};
use crate::domain::{Password, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::{UnitOfWork, VerificationStore};
use crate::jobs::{EmailJob, EmailQueue};

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Mail a verification code to a university address
    async fn send_otp(&self, email: String) -> AppResult<()>;

    /// Exchange a verification code for a verified-email marker
    async fn verify_otp(&self, email: String, code: String) -> AppResult<()>;

    /// Create an account for a verified email
    async fn signup(
        &self,
        name: String,
        email: String,
        password: String,
        role: UserRole,
    ) -> AppResult<User>;

    /// Login and return JWT token
    async fn signin(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Generate JWT token for a user (shared helper to avoid duplication)
fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Verify JWT token and extract claims (shared helper)
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Generate a zero-padded numeric verification code.
fn generate_code() -> String {
    let max = 10u32.pow(OTP_LENGTH as u32);
    format!(
        "{:0width$}",
        rand::thread_rng().gen_range(0..max),
        width = OTP_LENGTH
    )
}

/// Concrete implementation of AuthService.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    verification: Arc<dyn VerificationStore>,
    mailer: Arc<dyn EmailQueue>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance
    pub fn new(
        uow: Arc<U>,
        verification: Arc<dyn VerificationStore>,
        mailer: Arc<dyn EmailQueue>,
        config: Config,
    ) -> Self {
        Self {
            uow,
            verification,
            mailer,
            config,
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn send_otp(&self, email: String) -> AppResult<()> {
        if !is_university_email(&email) {
            return Err(AppError::validation(
                "Email must belong to a university domain",
            ));
        }

        if self.uow.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("User"));
        }

        let code = generate_code();
        self.verification.store_otp(&email, &code).await?;

        self.mailer
            .enqueue(EmailJob::verification_code(
                &email,
                &code,
                OTP_TTL_SECONDS / 60,
            ))
            .await?;

        tracing::info!(email = %email, "Verification code issued");
        Ok(())
    }

    async fn verify_otp(&self, email: String, code: String) -> AppResult<()> {
        // The stored code is consumed whatever happens next: each issued
        // code is good for exactly one attempt
        let stored = self
            .verification
            .take_otp(&email)
            .await?
            .ok_or_else(|| AppError::validation("Verification code expired or not requested"))?;

        if stored != code {
            return Err(AppError::validation("Invalid verification code"));
        }

        self.verification.mark_email_verified(&email).await?;
        tracing::info!(email = %email, "Email verified");
        Ok(())
    }

    async fn signup(
        &self,
        name: String,
        email: String,
        password: String,
        role: UserRole,
    ) -> AppResult<User> {
        if !is_university_email(&email) {
            return Err(AppError::validation(
                "Email must belong to a university domain",
            ));
        }

        if self.uow.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("User"));
        }

        // Consumed on success: a second signup must re-verify the address
        if !self.verification.take_email_verified(&email).await? {
            return Err(AppError::validation("Email has not been verified"));
        }

        let password_hash = Password::new(&password)?.into_string();
        self.uow.users().create(email, password_hash, name, role).await
    }

    async fn signin(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let user_result = self.uow.users().find_by_email(&email).await?;

        // SECURITY: Perform password verification even if user doesn't exist
        // to prevent timing attacks that could enumerate valid emails.
        // We use a dummy hash that will always fail verification.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        // Only succeed if both user exists AND password is valid
        if !user_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Safe to unwrap since we verified user_exists is true
        generate_token(user_result.as_ref().unwrap(), &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}
