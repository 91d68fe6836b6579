//! User repository trait

use async_trait::async_trait;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Repository trait for user storage
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by their ID
    async fn get_user(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by their login name
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Check if a login name is already registered
    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.get_user_by_username(username).await?.is_some())
    }
}
