// Repository layer for database operations

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::models::*;

const ENTRY_COLUMNS: &str = "id, username, strain, kind, amount, consumption, description, \
     entry_date, tags, votes, favorites, created_at, updated_at";

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create database connection from URL
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Apply embedded migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Close all pooled connections
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // ============================================
    // Entries
    // ============================================

    pub async fn list_entries(&self) -> Result<Vec<EntryRow>> {
        let rows = sqlx::query_as::<_, EntryRow>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM entries ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn get_entry(&self, id: Uuid) -> Result<Option<EntryRow>> {
        let row = sqlx::query_as::<_, EntryRow>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM entries WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn create_entry(&self, input: CreateEntryRow) -> Result<EntryRow> {
        Ok(insert_entry(&self.pool, &input).await?)
    }

    pub async fn update_entry(&self, id: Uuid, input: UpdateEntryRow) -> Result<Option<EntryRow>> {
        let row = sqlx::query_as::<_, EntryRow>(&format!(
            r#"
            UPDATE entries
            SET
                strain = $2,
                kind = $3,
                amount = $4,
                consumption = $5,
                description = $6,
                tags = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&input.strain)
        .bind(&input.kind)
        .bind(&input.amount)
        .bind(&input.consumption)
        .bind(&input.description)
        .bind(&input.tags)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete_entry(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_all_entries(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM entries")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Single-statement increment, safe under concurrent callers
    pub async fn increment_entry_favorites(&self, id: Uuid) -> Result<Option<EntryRow>> {
        let row = sqlx::query_as::<_, EntryRow>(&format!(
            r#"
            UPDATE entries
            SET favorites = favorites + 1, updated_at = NOW()
            WHERE id = $1
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Delete every entry and insert `inputs` in one transaction
    pub async fn replace_entries(&self, inputs: Vec<CreateEntryRow>) -> Result<Vec<EntryRow>> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM entries").execute(&mut *tx).await?;

        let mut rows = Vec::with_capacity(inputs.len());
        for input in &inputs {
            rows.push(insert_entry(&mut *tx, input).await?);
        }

        tx.commit().await?;

        Ok(rows)
    }

    // ============================================
    // Users
    // ============================================

    /// Fails with a unique violation if the username is taken
    pub async fn create_user(&self, input: CreateUserRow) -> Result<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(input.id)
        .bind(&input.username)
        .bind(&input.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    // ============================================
    // Auth sessions
    // ============================================

    pub async fn create_auth_session(&self, input: CreateAuthSessionRow) -> Result<AuthSessionRow> {
        let row = sqlx::query_as::<_, AuthSessionRow>(
            r#"
            INSERT INTO auth_sessions (token_hash, username, logged_in, expires_at)
            VALUES ($1, $2, TRUE, $3)
            RETURNING token_hash, username, logged_in, created_at, expires_at
            "#,
        )
        .bind(&input.token_hash)
        .bind(&input.username)
        .bind(input.expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_auth_session(&self, token_hash: &str) -> Result<Option<AuthSessionRow>> {
        let row = sqlx::query_as::<_, AuthSessionRow>(
            r#"
            SELECT token_hash, username, logged_in, created_at, expires_at
            FROM auth_sessions
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete_auth_session(&self, token_hash: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM auth_sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_expired_auth_sessions(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM auth_sessions WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

async fn insert_entry<'e, E>(executor: E, input: &CreateEntryRow) -> sqlx::Result<EntryRow>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, EntryRow>(&format!(
        r#"
        INSERT INTO entries (id, username, strain, kind, amount, consumption, description, entry_date, tags, votes, favorites)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {ENTRY_COLUMNS}
        "#
    ))
    .bind(input.id)
    .bind(&input.username)
    .bind(&input.strain)
    .bind(&input.kind)
    .bind(&input.amount)
    .bind(&input.consumption)
    .bind(&input.description)
    .bind(input.entry_date)
    .bind(&input.tags)
    .bind(input.votes)
    .bind(input.favorites)
    .fetch_one(executor)
    .await
}

/// Whether an error is a PostgreSQL unique constraint violation
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .map(|e| e.is_unique_violation())
        .unwrap_or(false)
}
