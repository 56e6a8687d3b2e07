// Database models (internal, may differ from domain types)

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================
// Entries
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct EntryRow {
    pub id: Uuid,
    pub username: Option<String>,
    pub strain: String,
    pub kind: String,
    pub amount: String,
    pub consumption: String,
    pub description: String,
    pub entry_date: DateTime<Utc>,
    pub tags: Vec<String>,
    pub votes: i64,
    pub favorites: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateEntryRow {
    pub id: Uuid,
    pub username: Option<String>,
    pub strain: String,
    pub kind: String,
    pub amount: String,
    pub consumption: String,
    pub description: String,
    pub entry_date: DateTime<Utc>,
    pub tags: Vec<String>,
    pub votes: i64,
    pub favorites: i64,
}

#[derive(Debug, Clone)]
pub struct UpdateEntryRow {
    pub strain: String,
    pub kind: String,
    pub amount: String,
    pub consumption: String,
    pub description: String,
    pub tags: Vec<String>,
}

// ============================================
// Users
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateUserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
}

// ============================================
// Auth sessions
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct AuthSessionRow {
    pub token_hash: String,
    pub username: String,
    pub logged_in: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateAuthSessionRow {
    pub token_hash: String,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}
