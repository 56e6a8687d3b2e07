// Auth service: signup, login, logout and session lookup
// Decision: Argon2 work runs on the blocking pool, off the async workers
// Decision: Signup logs the new user in right away

use cannanote_core::{CannaError, NewUser, Result, Session, SessionStore, User, UserStore};
use cannanote_storage::password;
use chrono::Duration;
use std::sync::Arc;

/// Username and plaintext password, already checked at the boundary
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// Keep passwords out of logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub struct AuthService {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            users,
            sessions,
            session_ttl,
        }
    }

    /// Register a user and start a session for them
    ///
    /// A taken username fails with `DuplicateUsername` before any session
    /// is created.
    pub async fn signup(&self, credentials: Credentials) -> Result<(String, Session)> {
        let plain = credentials.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&plain))
            .await
            .map_err(|e| CannaError::internal(format!("hashing task failed: {e}")))?
            .map_err(|e| CannaError::internal(e.to_string()))?;

        let user = self
            .users
            .create(NewUser {
                username: credentials.username.clone(),
                password_hash,
            })
            .await?;
        tracing::info!(username = %user.username, "User signed up");

        self.login(credentials).await
    }

    /// Check credentials and start a session
    pub async fn login(&self, credentials: Credentials) -> Result<(String, Session)> {
        let user = self
            .users
            .find_by_username(&credentials.username)
            .await?
            .ok_or(CannaError::UserNotFound)?;

        if !self.verify_password(&user, &credentials.password).await? {
            tracing::debug!(username = %user.username, "Login rejected");
            return Err(CannaError::InvalidCredentials);
        }

        let (token, session) = self.sessions.create(&user.username, self.session_ttl).await?;
        tracing::info!(username = %session.username, "User logged in");
        Ok((token, session))
    }

    /// Compare a plaintext password with the user's stored hash
    pub async fn verify_password(&self, user: &User, plain: &str) -> Result<bool> {
        let hash = user.password_hash.clone();
        let plain = plain.to_string();
        tokio::task::spawn_blocking(move || password::verify_password(&plain, &hash))
            .await
            .map_err(|e| CannaError::internal(format!("verification task failed: {e}")))?
            .map_err(|e| CannaError::internal(e.to_string()))
    }

    /// End a session; the token no longer authenticates afterwards
    pub async fn logout(&self, token: &str) -> Result<()> {
        self.sessions.destroy(token).await
    }

    /// Resolve a session token, ignoring expired sessions
    pub async fn current_session(&self, token: &str) -> Result<Option<Session>> {
        self.sessions.get(token).await
    }
}
