// Postgres storage layer with sqlx
//
// This crate provides database implementations for the core store traits:
// - DbEntryStore: implements EntryStore for entry persistence
// - DbUserStore: implements UserStore for credentials
// - DbSessionStore: implements SessionStore for server-side sessions

pub mod backend;
pub mod entry_store;
pub mod models;
pub mod password;
pub mod repositories;
pub mod session_store;
pub mod user_store;

pub use backend::StorageBackend;
pub use entry_store::DbEntryStore;
pub use models::*;
pub use repositories::*;
pub use session_store::DbSessionStore;
pub use user_store::DbUserStore;
