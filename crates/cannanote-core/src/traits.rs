// Core traits for pluggable storage backends
//
// These traits let the services run against different backends:
// - In-memory implementations for dev mode and tests
// - PostgreSQL implementations for production

use async_trait::async_trait;
use chrono::Duration;
use uuid::Uuid;

use crate::entry::{Entry, EntryFields, NewEntry};
use crate::error::Result;
use crate::session::Session;
use crate::user::{NewUser, User};

// ============================================================================
// EntryStore - Persistence for consumption entries
// ============================================================================

/// Trait for storing and retrieving entries
///
/// Unknown ids fail with `CannaError::NotFound`; backend failures with
/// `CannaError::Store`.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// All entries, newest first
    async fn find_all(&self) -> Result<Vec<Entry>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Entry>;

    /// Create an entry, defaulting `date` to now and `meta` to zero counters
    async fn create(&self, input: NewEntry) -> Result<Entry>;

    async fn update_by_id(&self, id: Uuid, fields: EntryFields) -> Result<()>;

    async fn delete_by_id(&self, id: Uuid) -> Result<()>;

    async fn delete_all(&self) -> Result<()>;

    /// Atomically add one to `meta.favorites`
    async fn increment_favorites(&self, id: Uuid) -> Result<Entry>;

    /// Clear the store and insert `entries` as one atomic step
    ///
    /// On failure the previous contents are left untouched.
    async fn replace_all(&self, entries: Vec<NewEntry>) -> Result<Vec<Entry>>;
}

// ============================================================================
// UserStore - Persistence for credentials
// ============================================================================

/// Trait for storing users
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a user; fails with `CannaError::DuplicateUsername` if taken
    async fn create(&self, input: NewUser) -> Result<User>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
}

// ============================================================================
// SessionStore - Server-side sessions
// ============================================================================

/// Trait for server-side session state keyed by an opaque token
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Start a logged-in session; returns the token to hand to the client
    ///
    /// Expired sessions are collected here, so abandoned ones do not pile up.
    async fn create(&self, username: &str, ttl: Duration) -> Result<(String, Session)>;

    /// Look up a session; unknown and expired tokens yield `None`
    async fn get(&self, token: &str) -> Result<Option<Session>>;

    /// Remove a session. Unknown tokens are ignored.
    async fn destroy(&self, token: &str) -> Result<()>;
}
