//! Redis cache implementation.
//!
//! Holds the short-lived state that must survive process restarts and be
//! shared across instances: email verification codes (TTL-evicted) and rate
//! limit counters. Durable state never lives here.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::{
    Config, CACHE_PREFIX_EMAIL_VERIFIED, CACHE_PREFIX_OTP, CACHE_PREFIX_RATE_LIMIT,
    EMAIL_VERIFIED_TTL_SECONDS, OTP_TTL_SECONDS,
};
use crate::errors::{AppError, AppResult};

/// Short-lived signup verification state: pending codes and verified-email
/// markers. Backed by Redis in production so every instance sees the same
/// codes; tests swap in an in-memory implementation.
#[async_trait]
pub trait VerificationStore: Send + Sync {
    /// Store a verification code for an email, replacing any earlier one
    async fn store_otp(&self, email: &str, code: &str) -> AppResult<()>;

    /// Consume the code for an email; a code can be taken exactly once
    async fn take_otp(&self, email: &str) -> AppResult<Option<String>>;

    /// Record that an email passed verification
    async fn mark_email_verified(&self, email: &str) -> AppResult<()>;

    /// Consume the verified-email marker; returns whether it was present
    async fn take_email_verified(&self, email: &str) -> AppResult<bool>;
}

/// Redis cache wrapper with connection pooling.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
}

impl Cache {
    /// Create a new cache instance and connect to Redis.
    ///
    /// # Panics
    /// Panics if Redis connection fails.
    pub async fn connect(config: &Config) -> Self {
        let client =
            Client::open(config.redis_url.as_str()).expect("Failed to create Redis client");

        let connection = ConnectionManager::new(client)
            .await
            .expect("Failed to connect to Redis");

        tracing::info!("Redis cache connected");

        Self { connection }
    }

    /// Try to connect to Redis, returning an error instead of panicking.
    pub async fn try_connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        Ok(Self { connection })
    }

    // =========================================================================
    // Generic Cache Operations
    // =========================================================================

    /// Set a value in cache with a TTL (in seconds).
    pub async fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::internal(format!("Cache serialization error: {}", e)))?;

        conn.set_ex::<_, _, ()>(key, json, ttl_seconds)
            .await
            .map_err(cache_error)?;

        Ok(())
    }

    /// Check if a key exists in cache.
    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.connection.clone();
        let exists: bool = conn.exists(key).await.map_err(cache_error)?;
        Ok(exists)
    }

    /// Get and delete a value in one round trip (Redis 6.2+ GETDEL).
    async fn take<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = redis::cmd("GETDEL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;

        match value {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| AppError::internal(format!("Cache deserialization error: {}", e))),
            None => Ok(None),
        }
    }

    // =========================================================================
    // Rate Limiting Operations
    // =========================================================================

    /// Check and increment rate limit counter.
    /// Returns (current_count, is_allowed) tuple.
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        let key = format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier);
        let mut conn = self.connection.clone();

        // Check if key exists
        let exists: bool = conn.exists(&key).await.map_err(cache_error)?;

        if !exists {
            // First request in window
            let _: () = conn
                .set_ex(&key, 1i64, window_seconds)
                .await
                .map_err(cache_error)?;
            return Ok((1, true));
        }

        // Increment counter
        let count: i64 = conn.incr(&key, 1).await.map_err(cache_error)?;
        let count = count as u64;
        let allowed = count <= max_requests;

        Ok((count, allowed))
    }
}

/// Redis-backed verification state. Codes evict themselves after the OTP
/// TTL; verified markers expire so an address cannot be banked indefinitely
/// before signup.
#[async_trait]
impl VerificationStore for Cache {
    async fn store_otp(&self, email: &str, code: &str) -> AppResult<()> {
        let key = format!("{}{}", CACHE_PREFIX_OTP, email);
        self.set_with_ttl(&key, &code, OTP_TTL_SECONDS).await
    }

    async fn take_otp(&self, email: &str) -> AppResult<Option<String>> {
        let key = format!("{}{}", CACHE_PREFIX_OTP, email);
        self.take(&key).await
    }

    async fn mark_email_verified(&self, email: &str) -> AppResult<()> {
        let key = format!("{}{}", CACHE_PREFIX_EMAIL_VERIFIED, email);
        self.set_with_ttl(&key, &true, EMAIL_VERIFIED_TTL_SECONDS)
            .await
    }

    async fn take_email_verified(&self, email: &str) -> AppResult<bool> {
        let key = format!("{}{}", CACHE_PREFIX_EMAIL_VERIFIED, email);
        Ok(self.take::<bool>(&key).await?.unwrap_or(false))
    }
}

/// Convert Redis error to AppError.
fn cache_error(e: RedisError) -> AppError {
    tracing::error!("Redis error: {}", e);
    AppError::internal(format!("Cache error: {}", e))
}
