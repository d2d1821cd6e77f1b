use async_trait::async_trait;

use crate::db::models::{ChatEntry, User};
use crate::error::StoreError;

/// Keyed storage for users and their chat histories.
///
/// Implementations must make [`Store::insert_user`] a compare-and-set on the
/// email and must serialize appends to a single user's history.
#[async_trait]
pub trait Store: Send + Sync {
    async fn get_user(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn user_exists(&self, email: &str) -> Result<bool, StoreError>;

    /// Creates the user together with an empty history.
    ///
    /// Fails with [`StoreError::Duplicate`] when the email is already taken,
    /// leaving the existing record untouched.
    async fn insert_user(&self, user: User) -> Result<(), StoreError>;

    /// Appends to the user's history and returns the entry as stored.
    ///
    /// Fails with [`StoreError::NotFound`] when the user has no history.
    async fn append_chat(&self, email: &str, entry: ChatEntry) -> Result<ChatEntry, StoreError>;

    /// The user's history in insertion order; empty for unknown emails.
    async fn get_history(&self, email: &str) -> Result<Vec<ChatEntry>, StoreError>;
}
