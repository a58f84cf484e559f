//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;

use super::repository::UserRepository;

#[derive(Default)]
struct MockStore {
    next_id: i64,
    users: HashMap<i64, User>,
}

/// Mock user repository backed by a lock-guarded map
///
/// Id assignment lives inside the same lock as the map, so there is
/// no global mutable state and no id races under concurrent creates.
pub struct MockUserRepository {
    store: Arc<RwLock<MockStore>>,
}

impl MockUserRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(MockStore::default())),
        }
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut store = self.store.write().await;

        if store.users.values().any(|u| u.username == user.username) {
            return Err(DomainError::Database {
                message: "duplicate username".to_string(),
            });
        }

        store.next_id += 1;
        let now = Utc::now();
        let created = User {
            id: store.next_id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: now,
            updated_at: now,
        };

        store.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let store = self.store.read().await;
        Ok(store.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let store = self.store.read().await;
        Ok(store.users.values().find(|u| u.email == email).cloned())
    }
}
