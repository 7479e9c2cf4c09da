//! In-memory persistence gateway.
//!
//! Behaves like the SeaORM store, including the unique email index, but keeps
//! everything in a map. Used by tests and local demos.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::UserRepository;
use common::{AppError, AppResult};
use domain::{NewUser, User};

#[derive(Default)]
struct Table {
    next_id: i32,
    rows: BTreeMap<i32, User>,
}

impl Table {
    fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
        self.rows
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

/// Map-backed implementation of UserRepository
#[derive(Default)]
pub struct InMemoryUserStore {
    table: RwLock<Table>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn unique_violation(email: &str) -> AppError {
    AppError::storage(format!("duplicate key value violates unique constraint on email '{email}'"))
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn save(&self, user: NewUser) -> AppResult<User> {
        let mut table = self.table.write().await;
        if table.email_taken(&user.email, None) {
            return Err(unique_violation(&user.email));
        }

        table.next_id += 1;
        let stored = User {
            id: table.next_id,
            name: user.name,
            email: user.email,
            age: user.age,
            created_at: user.created_at,
        };
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        // Ids only grow, so key order is insertion order
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let mut table = self.table.write().await;
        if table.email_taken(&user.email, Some(user.id)) {
            return Err(unique_violation(&user.email));
        }

        let row = table
            .rows
            .get_mut(&user.id)
            .ok_or(AppError::NotFound(user.id))?;
        row.name = user.name;
        row.email = user.email;
        row.age = user.age;
        Ok(row.clone())
    }

    async fn delete(&self, user: User) -> AppResult<()> {
        if self.delete_by_id(user.id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(user.id))
        }
    }

    async fn delete_by_id(&self, id: i32) -> AppResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        Ok(self.table.read().await.email_taken(email, None))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
