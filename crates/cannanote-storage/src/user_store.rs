// Database-backed UserStore implementation

use async_trait::async_trait;
use cannanote_core::{CannaError, NewUser, Result, User, UserStore};
use uuid::Uuid;

use crate::models::{CreateUserRow, UserRow};
use crate::repositories::{is_unique_violation, Database};

/// Database-backed user store
///
/// Username uniqueness is enforced by the `users.username` constraint.
#[derive(Clone)]
pub struct DbUserStore {
    db: Database,
}

impl DbUserStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn row_to_user(row: UserRow) -> User {
    User {
        id: row.id,
        username: row.username,
        password_hash: row.password_hash,
        created_at: row.created_at,
    }
}

#[async_trait]
impl UserStore for DbUserStore {
    async fn create(&self, input: NewUser) -> Result<User> {
        let username = input.username.clone();
        let row = self
            .db
            .create_user(CreateUserRow {
                id: Uuid::now_v7(),
                username: input.username,
                password_hash: input.password_hash,
            })
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    CannaError::DuplicateUsername(username)
                } else {
                    CannaError::store(e.to_string())
                }
            })?;

        Ok(row_to_user(row))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = self
            .db
            .get_user_by_username(username)
            .await
            .map_err(|e| CannaError::store(e.to_string()))?;

        Ok(row.map(row_to_user))
    }
}
