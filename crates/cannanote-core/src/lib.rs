// CannaNote core
//
// Domain types and store traits shared by the storage backends and the HTTP
// server.
//
// Key design decisions:
// - Stores are traits (EntryStore, UserStore, SessionStore) so the server can
//   run on PostgreSQL or fully in memory
// - NotFound is a distinct error so handlers can answer 404 instead of 500
// - Favorite increments are a store primitive, never read-modify-write

pub mod entry;
pub mod error;
pub mod seed;
pub mod session;
pub mod traits;
pub mod user;

// In-memory implementations for dev mode and testing
pub mod memory;

// Re-exports for convenience
pub use entry::{Entry, EntryFields, EntryMeta, NewEntry};
pub use error::{CannaError, Result};
pub use memory::{InMemoryEntryStore, InMemorySessionStore, InMemoryUserStore};
pub use seed::{seed_entries, SEED_COUNT};
pub use session::{generate_session_token, hash_session_token, session_expiry, Session};
pub use traits::{EntryStore, SessionStore, UserStore};
pub use user::{NewUser, User};
