// Database-backed EntryStore implementation

use async_trait::async_trait;
use cannanote_core::{CannaError, Entry, EntryFields, EntryMeta, EntryStore, NewEntry, Result};
use chrono::Utc;
use uuid::Uuid;

use crate::models::{CreateEntryRow, EntryRow, UpdateEntryRow};
use crate::repositories::Database;

/// Database-backed entry store
#[derive(Clone)]
pub struct DbEntryStore {
    db: Database,
}

impl DbEntryStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn row_to_entry(row: EntryRow) -> Entry {
    Entry {
        id: row.id,
        username: row.username,
        strain: row.strain,
        kind: row.kind,
        amount: row.amount,
        consumption: row.consumption,
        description: row.description,
        date: row.entry_date,
        tags: row.tags,
        meta: EntryMeta {
            votes: row.votes,
            favorites: row.favorites,
        },
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn new_entry_to_row(input: NewEntry) -> CreateEntryRow {
    let meta = input.meta.unwrap_or_default();
    CreateEntryRow {
        id: Uuid::now_v7(),
        username: input.username,
        strain: input.fields.strain,
        kind: input.fields.kind,
        amount: input.fields.amount,
        consumption: input.fields.consumption,
        description: input.fields.description,
        entry_date: input.date.unwrap_or_else(Utc::now),
        tags: input.fields.tags,
        votes: meta.votes,
        favorites: meta.favorites,
    }
}

fn store_err(e: anyhow::Error) -> CannaError {
    CannaError::store(e.to_string())
}

fn entry_not_found(id: Uuid) -> CannaError {
    CannaError::not_found(format!("entry {id}"))
}

#[async_trait]
impl EntryStore for DbEntryStore {
    async fn find_all(&self) -> Result<Vec<Entry>> {
        let rows = self.db.list_entries().await.map_err(store_err)?;
        Ok(rows.into_iter().map(row_to_entry).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Entry> {
        self.db
            .get_entry(id)
            .await
            .map_err(store_err)?
            .map(row_to_entry)
            .ok_or_else(|| entry_not_found(id))
    }

    async fn create(&self, input: NewEntry) -> Result<Entry> {
        let row = self
            .db
            .create_entry(new_entry_to_row(input))
            .await
            .map_err(store_err)?;
        Ok(row_to_entry(row))
    }

    async fn update_by_id(&self, id: Uuid, fields: EntryFields) -> Result<()> {
        let input = UpdateEntryRow {
            strain: fields.strain,
            kind: fields.kind,
            amount: fields.amount,
            consumption: fields.consumption,
            description: fields.description,
            tags: fields.tags,
        };

        self.db
            .update_entry(id, input)
            .await
            .map_err(store_err)?
            .map(|_| ())
            .ok_or_else(|| entry_not_found(id))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        if self.db.delete_entry(id).await.map_err(store_err)? {
            Ok(())
        } else {
            Err(entry_not_found(id))
        }
    }

    async fn delete_all(&self) -> Result<()> {
        let deleted = self.db.delete_all_entries().await.map_err(store_err)?;
        tracing::debug!(deleted, "Deleted all entries");
        Ok(())
    }

    async fn increment_favorites(&self, id: Uuid) -> Result<Entry> {
        self.db
            .increment_entry_favorites(id)
            .await
            .map_err(store_err)?
            .map(row_to_entry)
            .ok_or_else(|| entry_not_found(id))
    }

    async fn replace_all(&self, entries: Vec<NewEntry>) -> Result<Vec<Entry>> {
        let rows = entries.into_iter().map(new_entry_to_row).collect();
        let rows = self.db.replace_entries(rows).await.map_err(store_err)?;
        Ok(rows.into_iter().map(row_to_entry).collect())
    }
}
