// Server-side session types
// Decision: Session tokens are 32 random bytes, hex encoded, handed to the client once
// Decision: Stores keep only the SHA-256 digest of a token

use chrono::{DateTime, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::error::{CannaError, Result};

const SESSION_TOKEN_BYTES: usize = 32;

/// Authentication state held on the server for one client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub logged_in: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Fails when `now + ttl` is outside the representable date range
    pub fn logged_in(
        username: impl Into<String>,
        now: DateTime<Utc>,
        ttl: chrono::Duration,
    ) -> Result<Self> {
        Ok(Self {
            username: username.into(),
            logged_in: true,
            created_at: now,
            expires_at: session_expiry(now, ttl)?,
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// `now + ttl`, without panicking on overflow
pub fn session_expiry(now: DateTime<Utc>, ttl: chrono::Duration) -> Result<DateTime<Utc>> {
    now.checked_add_signed(ttl)
        .ok_or_else(|| CannaError::internal(format!("session lifetime {ttl} is out of range")))
}

/// Generate a new session token
pub fn generate_session_token() -> String {
    let bytes: [u8; SESSION_TOKEN_BYTES] = rand::thread_rng().gen();
    hex::encode(bytes)
}

/// Digest of a session token, used as the storage key
pub fn hash_session_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
