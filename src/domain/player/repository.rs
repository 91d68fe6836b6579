//! Player repository trait

use async_trait::async_trait;

use super::entity::{MarketStatus, Player, PlayerId, PlayerPatch};
use crate::domain::team::TeamId;
use crate::domain::DomainError;

/// Repository trait for player storage
///
/// Writes are conditioned on the expected owning team so that an edit or a
/// listing change racing a completed transfer fails instead of undoing it.
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Get a player by ID
    async fn get_player(&self, id: PlayerId) -> Result<Option<Player>, DomainError>;

    /// All players owned by a team, ordered by ID
    async fn list_players_by_team(&self, team_id: TeamId) -> Result<Vec<Player>, DomainError>;

    /// All players currently listed on the market, ordered by ID
    async fn list_players_on_market(&self) -> Result<Vec<Player>, DomainError>;

    /// Apply the supplied name/surname/country fields to a player owned by `owner`
    async fn update_player_details(
        &self,
        id: PlayerId,
        owner: TeamId,
        patch: &PlayerPatch,
    ) -> Result<Player, DomainError>;

    /// Replace the market state of a player owned by `owner`
    async fn set_market_status(
        &self,
        id: PlayerId,
        owner: TeamId,
        status: MarketStatus,
    ) -> Result<Player, DomainError>;
}

/// Failure for a player id that resolves to nothing
pub fn player_not_found() -> DomainError {
    DomainError::not_found("player does not exist")
}

/// Failure for a player addressed by someone other than its owner
pub fn player_not_owned() -> DomainError {
    DomainError::ownership("player with the given id does not belong to user")
}
