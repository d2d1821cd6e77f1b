use std::collections::HashMap;
use std::collections::hash_map::Entry;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::db::models::{ChatEntry, User};
use crate::db::store::Store;
use crate::error::StoreError;

#[derive(Debug)]
struct UserRecord {
    user: User,
    history: Vec<ChatEntry>,
}

/// Process-local [`Store`] backed by a single map guarded by an async lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_user(&self, email: &str) -> Result<Option<User>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(email).map(|record| record.user.clone()))
    }

    async fn user_exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.records.read().await.contains_key(email))
    }

    async fn insert_user(&self, user: User) -> Result<(), StoreError> {
        let mut records = self.records.write().await;

        match records.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate),
            Entry::Vacant(slot) => {
                debug!("Created user record for {}", user.email);
                slot.insert(UserRecord {
                    user,
                    history: Vec::new(),
                });
                Ok(())
            }
        }
    }

    async fn append_chat(&self, email: &str, mut entry: ChatEntry) -> Result<ChatEntry, StoreError> {
        let mut records = self.records.write().await;
        let record = records.get_mut(email).ok_or(StoreError::NotFound)?;

        // Two exchanges finishing in the same millisecond still get distinct ids.
        if let Some(last) = record.history.last() {
            if entry.id <= last.id {
                entry.id = last.id + 1;
            }
        }

        record.history.push(entry.clone());
        Ok(entry)
    }

    async fn get_history(&self, email: &str) -> Result<Vec<ChatEntry>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .get(email)
            .map(|record| record.history.clone())
            .unwrap_or_default())
    }
}
