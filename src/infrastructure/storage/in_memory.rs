//! In-memory game store

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::market::{Purchase, Trade, TradeRepository};
use crate::domain::player::{
    player_not_found, player_not_owned, MarketStatus, NewPlayer, Player, PlayerId, PlayerPatch,
    PlayerRepository, MAX_PLAYER_AGE, MIN_PLAYER_AGE,
};
use crate::domain::roster::RosterGenerator;
use crate::domain::team::{NewTeam, Team, TeamId, TeamPatch, TeamRepository};
use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::{Account, DomainError, GameStore};

#[derive(Debug, Default)]
struct StoreState {
    users: BTreeMap<UserId, User>,
    teams: BTreeMap<TeamId, Team>,
    players: BTreeMap<PlayerId, Player>,
    last_user_id: i64,
    last_team_id: i64,
    last_player_id: i64,
}

impl StoreState {
    fn owned_player_mut(&mut self, id: PlayerId, owner: TeamId) -> Result<&mut Player, DomainError> {
        let player = self.players.get_mut(&id).ok_or_else(player_not_found)?;

        if !player.is_owned_by(owner) {
            return Err(player_not_owned());
        }

        Ok(player)
    }

    fn username_taken(&self, username: &str) -> bool {
        self.users.values().any(|u| u.username() == username)
    }

    fn insert_players(&mut self, drafts: Vec<NewPlayer>) -> Vec<Player> {
        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            self.last_player_id += 1;
            let player = draft.into_player(PlayerId::new(self.last_player_id));
            self.players.insert(player.id(), player.clone());
            created.push(player);
        }
        created
    }

    fn team(&self, id: TeamId) -> Result<Team, DomainError> {
        self.teams
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("Team {} not found", id)))
    }
}

// Same row checks the relational schema enforces

fn check_team_row(team: &NewTeam) -> Result<(), DomainError> {
    if team.budget < 0 {
        return Err(DomainError::storage("teams.budget must not be negative"));
    }
    Ok(())
}

fn check_player_rows(players: &[NewPlayer]) -> Result<(), DomainError> {
    for player in players {
        if !(MIN_PLAYER_AGE..=MAX_PLAYER_AGE).contains(&player.age) {
            return Err(DomainError::storage("players.age is out of range"));
        }
        if player.value <= 0 {
            return Err(DomainError::storage("players.value must be positive"));
        }
    }
    Ok(())
}

/// Thread-safe in-memory store
///
/// A single lock guards users, teams and players so a purchase settles as one
/// step. Data is lost when the process terminates.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn get_user(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let state = self.state.read().await;

        Ok(state
            .users
            .values()
            .find(|user| user.username() == username)
            .cloned())
    }
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn get_team(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        Ok(self.state.read().await.teams.get(&id).cloned())
    }

    async fn get_team_by_user(&self, user_id: UserId) -> Result<Option<Team>, DomainError> {
        let state = self.state.read().await;

        Ok(state
            .teams
            .values()
            .find(|team| team.is_owned_by(user_id))
            .cloned())
    }

    async fn update_team_details(&self, id: TeamId, patch: &TeamPatch) -> Result<Team, DomainError> {
        let mut state = self.state.write().await;

        let team = state
            .teams
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("Team {} not found", id)))?;
        team.apply(patch);

        Ok(team.clone())
    }
}

#[async_trait]
impl PlayerRepository for InMemoryStore {
    async fn get_player(&self, id: PlayerId) -> Result<Option<Player>, DomainError> {
        Ok(self.state.read().await.players.get(&id).cloned())
    }

    async fn list_players_by_team(&self, team_id: TeamId) -> Result<Vec<Player>, DomainError> {
        let state = self.state.read().await;

        Ok(state
            .players
            .values()
            .filter(|player| player.is_owned_by(team_id))
            .cloned()
            .collect())
    }

    async fn list_players_on_market(&self) -> Result<Vec<Player>, DomainError> {
        let state = self.state.read().await;

        Ok(state
            .players
            .values()
            .filter(|player| player.market().is_listed())
            .cloned()
            .collect())
    }

    async fn update_player_details(
        &self,
        id: PlayerId,
        owner: TeamId,
        patch: &PlayerPatch,
    ) -> Result<Player, DomainError> {
        let mut state = self.state.write().await;

        let player = state.owned_player_mut(id, owner)?;
        player.apply(patch);

        Ok(player.clone())
    }

    async fn set_market_status(
        &self,
        id: PlayerId,
        owner: TeamId,
        status: MarketStatus,
    ) -> Result<Player, DomainError> {
        let mut state = self.state.write().await;

        let player = state.owned_player_mut(id, owner)?;
        match status {
            MarketStatus::Listed { price } => {
                player.list_for_sale(price)?;
            }
            MarketStatus::OffMarket => player.withdraw()?,
        }

        Ok(player.clone())
    }
}

#[async_trait]
impl TradeRepository for InMemoryStore {
    async fn settle_purchase(&self, purchase: &Purchase) -> Result<Trade, DomainError> {
        purchase.ensure_distinct_parties()?;

        let mut state = self.state.write().await;

        let mut player = state
            .players
            .get(&purchase.player_id)
            .cloned()
            .ok_or_else(player_not_found)?;
        let mut buyer = state.team(purchase.buyer)?;
        let mut seller = state.team(purchase.seller)?;

        let previous_value = purchase.settle(&mut player, &mut buyer, &mut seller)?;

        state.players.insert(player.id(), player.clone());
        state.teams.insert(buyer.id(), buyer.clone());
        state.teams.insert(seller.id(), seller.clone());

        Ok(Trade {
            player,
            buyer,
            seller,
            price: purchase.price,
            previous_value,
        })
    }
}

#[async_trait]
impl GameStore for InMemoryStore {
    async fn create_account(
        &self,
        user: NewUser,
        roster: &RosterGenerator,
    ) -> Result<Account, DomainError> {
        let mut state = self.state.write().await;

        if state.username_taken(&user.username) {
            return Err(DomainError::conflict("User already exists"));
        }

        // Nothing is written until every row has passed its checks
        let user = user.into_user(UserId::new(state.last_user_id + 1));
        let team = roster.generate_team(&user);
        check_team_row(&team)?;
        let team = team.into_team(TeamId::new(state.last_team_id + 1));
        let drafts = roster.generate_players(&team);
        check_player_rows(&drafts)?;

        state.last_user_id += 1;
        state.last_team_id += 1;
        state.users.insert(user.id(), user.clone());
        state.teams.insert(team.id(), team.clone());
        let players = state.insert_players(drafts);

        Ok(Account {
            user,
            team,
            players,
        })
    }

    async fn ping(&self) -> Result<(), DomainError> {
        let _state = self.state.read().await;
        Ok(())
    }
}
