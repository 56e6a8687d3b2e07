// Entry domain types
//
// An Entry is a single logged consumption record. Stores assign the id and
// fill `date` and `meta` when the caller leaves them out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Counters attached to an entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMeta {
    pub votes: i64,
    pub favorites: i64,
}

/// A logged consumption record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    /// Username of the author, if known
    pub username: Option<String>,
    pub strain: String,
    /// Product kind, e.g. "flower" or "edible"
    pub kind: String,
    pub amount: String,
    /// Consumption method, e.g. "vaporized"
    pub consumption: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub tags: Vec<String>,
    pub meta: EntryMeta,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User-editable fields of an entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFields {
    pub strain: String,
    pub kind: String,
    pub amount: String,
    pub consumption: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// Input for creating an entry
#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub username: Option<String>,
    pub fields: EntryFields,
    /// Defaults to the creation time
    pub date: Option<DateTime<Utc>>,
    /// Defaults to zero votes and zero favorites
    pub meta: Option<EntryMeta>,
}

impl NewEntry {
    pub fn new(fields: EntryFields) -> Self {
        Self {
            fields,
            ..Default::default()
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_meta(mut self, meta: EntryMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Materialize into a stored entry, filling defaults
    pub fn into_entry(self, id: Uuid, now: DateTime<Utc>) -> Entry {
        let EntryFields {
            strain,
            kind,
            amount,
            consumption,
            description,
            tags,
        } = self.fields;

        Entry {
            id,
            username: self.username,
            strain,
            kind,
            amount,
            consumption,
            description,
            date: self.date.unwrap_or(now),
            tags,
            meta: self.meta.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entry {
    /// Overwrite the user-editable fields
    pub fn apply(&mut self, fields: EntryFields, now: DateTime<Utc>) {
        self.strain = fields.strain;
        self.kind = fields.kind;
        self.amount = fields.amount;
        self.consumption = fields.consumption;
        self.description = fields.description;
        self.tags = fields.tags;
        self.updated_at = now;
    }
}
