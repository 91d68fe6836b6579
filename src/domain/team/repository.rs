//! Team repository trait

use async_trait::async_trait;

use super::entity::{Team, TeamId, TeamPatch};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Repository trait for team storage
///
/// Budgets are not writable here; they only move through a settled purchase.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Get a team by its ID
    async fn get_team(&self, id: TeamId) -> Result<Option<Team>, DomainError>;

    /// Get the team owned by a user
    async fn get_team_by_user(&self, user_id: UserId) -> Result<Option<Team>, DomainError>;

    /// Apply the supplied name/country fields and return the stored team
    async fn update_team_details(&self, id: TeamId, patch: &TeamPatch)
        -> Result<Team, DomainError>;

    /// Resolve the caller's team, which every registered user owns
    async fn require_team_for_user(&self, user_id: UserId) -> Result<Team, DomainError> {
        self.get_team_by_user(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("No team found for user {}", user_id)))
    }
}
