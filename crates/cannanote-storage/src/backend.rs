// Storage backend selection
// Decision: Use enum dispatch between PostgreSQL (production) and in-memory (dev mode)
//
// Services only see the store traits; this enum decides which
// implementation sits behind them.

use anyhow::Result;
use cannanote_core::{
    EntryStore, InMemoryEntryStore, InMemorySessionStore, InMemoryUserStore, SessionStore,
    UserStore,
};
use std::sync::Arc;

use crate::entry_store::DbEntryStore;
use crate::repositories::Database;
use crate::session_store::DbSessionStore;
use crate::user_store::DbUserStore;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory stores (dev mode), lost on restart
    InMemory {
        entries: InMemoryEntryStore,
        users: InMemoryUserStore,
        sessions: InMemorySessionStore,
    },
}

impl StorageBackend {
    /// Connect to PostgreSQL, optionally applying migrations
    pub async fn postgres(database_url: &str, run_migrations: bool) -> Result<Self> {
        let db = Database::from_url(database_url).await?;

        if run_migrations {
            db.migrate().await?;
            tracing::info!("Database migrations applied");
        }

        let purged = db.delete_expired_auth_sessions().await?;
        if purged > 0 {
            tracing::info!(purged, "Removed expired sessions");
        }

        Ok(Self::Postgres(db))
    }

    /// Create an in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory {
            entries: InMemoryEntryStore::new(),
            users: InMemoryUserStore::new(),
            sessions: InMemorySessionStore::new(),
        }
    }

    /// Check if this is dev mode (in-memory)
    pub fn is_dev_mode(&self) -> bool {
        matches!(self, Self::InMemory { .. })
    }

    /// Short name for logs and the health endpoint
    pub fn name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::InMemory { .. } => "memory",
        }
    }

    pub fn entry_store(&self) -> Arc<dyn EntryStore> {
        match self {
            Self::Postgres(db) => Arc::new(DbEntryStore::new(db.clone())),
            Self::InMemory { entries, .. } => Arc::new(entries.clone()),
        }
    }

    pub fn user_store(&self) -> Arc<dyn UserStore> {
        match self {
            Self::Postgres(db) => Arc::new(DbUserStore::new(db.clone())),
            Self::InMemory { users, .. } => Arc::new(users.clone()),
        }
    }

    pub fn session_store(&self) -> Arc<dyn SessionStore> {
        match self {
            Self::Postgres(db) => Arc::new(DbSessionStore::new(db.clone())),
            Self::InMemory { sessions, .. } => Arc::new(sessions.clone()),
        }
    }

    /// Release backend resources on shutdown
    pub async fn close(&self) {
        if let Self::Postgres(db) = self {
            db.close().await;
            tracing::info!("Database pool closed");
        }
    }
}
