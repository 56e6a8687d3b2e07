// In-memory implementations for dev mode and testing
//
// These implementations keep all data in memory, which makes them useful for:
// - Running the server without a database
// - Unit and HTTP-level tests
//
// Every write takes the map's write lock, so single-record updates,
// favorite increments and `replace_all` are atomic.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::entry::{Entry, EntryFields, NewEntry};
use crate::error::{CannaError, Result};
use crate::session::{generate_session_token, hash_session_token, Session};
use crate::traits::{EntryStore, SessionStore, UserStore};
use crate::user::{NewUser, User};

// ============================================================================
// InMemoryEntryStore
// ============================================================================

/// In-memory entry store keyed by entry id
#[derive(Debug, Default, Clone)]
pub struct InMemoryEntryStore {
    entries: Arc<RwLock<HashMap<Uuid, Entry>>>,
}

impl InMemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn find_all(&self) -> Result<Vec<Entry>> {
        let mut entries: Vec<Entry> = self.entries.read().await.values().cloned().collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(entries)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Entry> {
        self.entries
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| CannaError::not_found(format!("entry {id}")))
    }

    async fn create(&self, input: NewEntry) -> Result<Entry> {
        let entry = input.into_entry(Uuid::now_v7(), Utc::now());
        self.entries.write().await.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn update_by_id(&self, id: Uuid, fields: EntryFields) -> Result<()> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .get_mut(&id)
            .ok_or_else(|| CannaError::not_found(format!("entry {id}")))?;
        entry.apply(fields, Utc::now());
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        self.entries
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CannaError::not_found(format!("entry {id}")))
    }

    async fn delete_all(&self) -> Result<()> {
        self.entries.write().await.clear();
        Ok(())
    }

    async fn increment_favorites(&self, id: Uuid) -> Result<Entry> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .get_mut(&id)
            .ok_or_else(|| CannaError::not_found(format!("entry {id}")))?;
        entry.meta.favorites += 1;
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    async fn replace_all(&self, inputs: Vec<NewEntry>) -> Result<Vec<Entry>> {
        let now = Utc::now();
        let created: Vec<Entry> = inputs
            .into_iter()
            .map(|input| input.into_entry(Uuid::now_v7(), now))
            .collect();

        let mut entries = self.entries.write().await;
        let removed = entries.len();
        entries.clear();
        entries.extend(created.iter().map(|e| (e.id, e.clone())));
        tracing::debug!(removed, inserted = created.len(), "Replaced in-memory entries");
        Ok(created)
    }
}

// ============================================================================
// InMemoryUserStore
// ============================================================================

/// In-memory user store keyed by username
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, input: NewUser) -> Result<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&input.username) {
            return Err(CannaError::DuplicateUsername(input.username));
        }

        let user = User {
            id: Uuid::now_v7(),
            username: input.username,
            password_hash: input.password_hash,
            created_at: Utc::now(),
        };
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self.users.read().await.get(username).cloned())
    }
}

// ============================================================================
// InMemorySessionStore
// ============================================================================

/// In-memory session store keyed by token digest
#[derive(Debug, Default, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, including expired ones not yet collected
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, username: &str, ttl: Duration) -> Result<(String, Session)> {
        let now = Utc::now();
        let token = generate_session_token();
        let session = Session::logged_in(username, now, ttl)?;

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        let purged = before - sessions.len();
        if purged > 0 {
            tracing::debug!(purged, "Dropped expired sessions");
        }
        sessions.insert(hash_session_token(&token), session.clone());
        Ok((token, session))
    }

    async fn get(&self, token: &str) -> Result<Option<Session>> {
        let key = hash_session_token(token);
        let session = self.sessions.read().await.get(&key).cloned();

        match session {
            Some(session) if session.is_expired_at(Utc::now()) => {
                self.sessions.write().await.remove(&key);
                tracing::debug!(username = %session.username, "Dropped expired session");
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn destroy(&self, token: &str) -> Result<()> {
        self.sessions
            .write()
            .await
            .remove(&hash_session_token(token));
        Ok(())
    }
}
