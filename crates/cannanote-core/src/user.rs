// User domain types

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered user. Only the password hash is ever held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Argon2id hash in PHC string format
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}
