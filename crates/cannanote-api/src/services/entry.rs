// Entry service: business logic over the EntryStore

use cannanote_core::{seed_entries, CannaError, Entry, EntryFields, EntryStore, NewEntry, Result};
use std::sync::Arc;
use uuid::Uuid;

pub struct EntryService {
    store: Arc<dyn EntryStore>,
}

impl EntryService {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self { store }
    }

    /// Parse a path identifier; malformed ids cannot name an entry
    pub fn parse_id(raw: &str) -> Result<Uuid> {
        Uuid::parse_str(raw).map_err(|_| CannaError::not_found(format!("entry {raw}")))
    }

    /// All entries, newest first
    pub async fn list(&self) -> Result<Vec<Entry>> {
        self.store.find_all().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Entry> {
        self.store.find_by_id(id).await
    }

    pub async fn create(&self, fields: EntryFields, username: &str) -> Result<Entry> {
        let entry = self
            .store
            .create(NewEntry::new(fields).with_username(username))
            .await?;
        tracing::info!(entry_id = %entry.id, username, "Entry created");
        Ok(entry)
    }

    pub async fn update(&self, id: Uuid, fields: EntryFields) -> Result<()> {
        self.store.update_by_id(id, fields).await?;
        tracing::debug!(entry_id = %id, "Entry updated");
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.store.delete_by_id(id).await?;
        tracing::info!(entry_id = %id, "Entry deleted");
        Ok(())
    }

    /// Replace every entry with the seed set
    ///
    /// Errors are returned to the caller; a failed reset is never reported
    /// as success.
    pub async fn seed_reset(&self) -> Result<Vec<Entry>> {
        let entries = self.store.replace_all(seed_entries()).await.map_err(|e| {
            tracing::error!(error = %e, "Seed reset failed");
            e
        })?;
        tracing::info!(count = entries.len(), "Entries reset to seed data");
        Ok(entries)
    }

    /// Add one favorite; any logged-in user may do this repeatedly
    pub async fn increment_favorite(&self, id: Uuid) -> Result<Entry> {
        let entry = self.store.increment_favorites(id).await?;
        tracing::debug!(entry_id = %id, favorites = entry.meta.favorites, "Entry favorited");
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cannanote_core::{InMemoryEntryStore, SEED_COUNT};

    fn service() -> EntryService {
        EntryService::new(Arc::new(InMemoryEntryStore::new()))
    }

    fn fields(strain: &str) -> EntryFields {
        EntryFields {
            strain: strain.to_string(),
            amount: "1g".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_id() {
        let id = Uuid::now_v7();
        assert_eq!(EntryService::parse_id(&id.to_string()).unwrap(), id);
        assert!(matches!(
            EntryService::parse_id("not-a-uuid"),
            Err(CannaError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_sets_owner_and_defaults() {
        let service = service();
        let entry = service.create(fields("Gelato"), "kim").await.unwrap();

        assert_eq!(entry.username.as_deref(), Some("kim"));
        assert_eq!(entry.meta.favorites, 0);
        assert_eq!(entry.meta.votes, 0);
        assert_eq!(service.get(entry.id).await.unwrap(), entry);
    }

    #[tokio::test]
    async fn test_favorites_accumulate() {
        let service = service();
        let entry = service.create(fields("Gelato"), "kim").await.unwrap();

        service.increment_favorite(entry.id).await.unwrap();
        let after = service.increment_favorite(entry.id).await.unwrap();
        assert_eq!(after.meta.favorites, 2);

        let missing = service.increment_favorite(Uuid::now_v7()).await;
        assert!(matches!(missing, Err(CannaError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_seed_reset_replaces_everything() {
        let service = service();
        for i in 0..3 {
            service.create(fields(&format!("Strain {i}")), "kim").await.unwrap();
        }

        let seeded = service.seed_reset().await.unwrap();
        assert_eq!(seeded.len(), SEED_COUNT);
        assert_eq!(service.list().await.unwrap().len(), SEED_COUNT);

        // Idempotent in count
        service.seed_reset().await.unwrap();
        assert_eq!(service.list().await.unwrap().len(), SEED_COUNT);
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let service = service();
        let entry = service.create(fields("Gelato"), "kim").await.unwrap();

        service.delete(entry.id).await.unwrap();
        assert!(matches!(
            service.get(entry.id).await,
            Err(CannaError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(entry.id).await,
            Err(CannaError::NotFound(_))
        ));
    }
}
