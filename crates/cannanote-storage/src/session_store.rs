// Database-backed SessionStore implementation
//
// Only the SHA-256 digest of a session token reaches the database.

use async_trait::async_trait;
use cannanote_core::{
    generate_session_token, hash_session_token, session_expiry, CannaError, Result, Session,
    SessionStore,
};
use chrono::{Duration, Utc};

use crate::models::{AuthSessionRow, CreateAuthSessionRow};
use crate::repositories::Database;

/// Database-backed session store
#[derive(Clone)]
pub struct DbSessionStore {
    db: Database,
}

impl DbSessionStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn row_to_session(row: AuthSessionRow) -> Session {
    Session {
        username: row.username,
        logged_in: row.logged_in,
        created_at: row.created_at,
        expires_at: row.expires_at,
    }
}

fn store_err(e: anyhow::Error) -> CannaError {
    CannaError::store(e.to_string())
}

#[async_trait]
impl SessionStore for DbSessionStore {
    async fn create(&self, username: &str, ttl: Duration) -> Result<(String, Session)> {
        let expires_at = session_expiry(Utc::now(), ttl)?;

        let purged = self
            .db
            .delete_expired_auth_sessions()
            .await
            .map_err(store_err)?;
        if purged > 0 {
            tracing::debug!(purged, "Deleted expired sessions");
        }

        let token = generate_session_token();
        let row = self
            .db
            .create_auth_session(CreateAuthSessionRow {
                token_hash: hash_session_token(&token),
                username: username.to_string(),
                expires_at,
            })
            .await
            .map_err(store_err)?;

        Ok((token, row_to_session(row)))
    }

    async fn get(&self, token: &str) -> Result<Option<Session>> {
        let token_hash = hash_session_token(token);
        let Some(row) = self
            .db
            .get_auth_session(&token_hash)
            .await
            .map_err(store_err)?
        else {
            return Ok(None);
        };

        let session = row_to_session(row);
        if session.is_expired_at(Utc::now()) {
            self.db
                .delete_auth_session(&token_hash)
                .await
                .map_err(store_err)?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    async fn destroy(&self, token: &str) -> Result<()> {
        self.db
            .delete_auth_session(&hash_session_token(token))
            .await
            .map_err(store_err)?;
        Ok(())
    }
}
