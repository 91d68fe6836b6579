//! Team service for a manager's own club and squad

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::player::{
    player_not_found, player_not_owned, validate_player_patch, Player, PlayerId, PlayerPatch,
};
use crate::domain::team::{validate_team_patch, Team, TeamPatch};
use crate::domain::user::UserId;
use crate::domain::{DomainError, GameStore};

/// A team together with the summed value of its squad
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamOverview {
    pub team: Team,
    pub value: i64,
}

/// Team service scoped to the calling manager
pub struct TeamService<S: GameStore + ?Sized> {
    store: Arc<S>,
}

impl<S: GameStore + ?Sized> TeamService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn overview(&self, team: Team) -> Result<TeamOverview, DomainError> {
        let value = self
            .store
            .list_players_by_team(team.id())
            .await?
            .iter()
            .map(Player::value)
            .sum();

        Ok(TeamOverview { team, value })
    }

    /// The caller's team and its squad value
    pub async fn team_overview(&self, user_id: UserId) -> Result<TeamOverview, DomainError> {
        let team = self.store.require_team_for_user(user_id).await?;
        debug!(team_id = %team.id(), "Loaded team");

        self.overview(team).await
    }

    /// Rename or relocate the caller's team; omitted fields stay as they are
    pub async fn update_team(
        &self,
        user_id: UserId,
        patch: TeamPatch,
    ) -> Result<TeamOverview, DomainError> {
        validate_team_patch(&patch).map_err(|e| DomainError::validation(e.to_string()))?;

        let team = self.store.require_team_for_user(user_id).await?;
        if patch.is_empty() {
            return self.overview(team).await;
        }

        let team = self.store.update_team_details(team.id(), &patch).await?;
        info!(team_id = %team.id(), "Updated team details");

        self.overview(team).await
    }

    /// Players owned by the caller's team
    pub async fn players(&self, user_id: UserId) -> Result<Vec<Player>, DomainError> {
        let team = self.store.require_team_for_user(user_id).await?;
        self.store.list_players_by_team(team.id()).await
    }

    /// Edit one of the caller's players; omitted fields stay as they are
    pub async fn update_player(
        &self,
        user_id: UserId,
        player_id: PlayerId,
        patch: PlayerPatch,
    ) -> Result<Player, DomainError> {
        let team = self.store.require_team_for_user(user_id).await?;

        let player = self
            .store
            .get_player(player_id)
            .await?
            .ok_or_else(player_not_found)?;
        if !player.is_owned_by(team.id()) {
            return Err(player_not_owned());
        }

        validate_player_patch(&patch).map_err(|e| DomainError::validation(e.to_string()))?;
        if patch.is_empty() {
            return Ok(player);
        }

        let player = self
            .store
            .update_player_details(player_id, team.id(), &patch)
            .await?;
        info!(player_id = %player.id(), team_id = %team.id(), "Updated player details");

        Ok(player)
    }
}

impl<S: GameStore + ?Sized> std::fmt::Debug for TeamService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeamService").finish_non_exhaustive()
    }
}
