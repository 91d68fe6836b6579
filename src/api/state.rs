//! Application state for shared services

use std::sync::Arc;

use chrono::Duration;

use crate::domain::{
    DomainError, GameStore, Player, PlayerId, PlayerPatch, TeamPatch, Trade, User, UserId,
};
use crate::infrastructure::auth::TokenService;
use crate::infrastructure::market::{ListingOutcome, MarketService};
use crate::infrastructure::team::{TeamOverview, TeamService};
use crate::infrastructure::user::{AccountService, PasswordHasher, RegisterRequest, Registration};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait>,
    pub team_service: Arc<dyn TeamServiceTrait>,
    pub market_service: Arc<dyn MarketServiceTrait>,
    pub token_service: Arc<dyn TokenService>,
    pub store: Arc<dyn GameStore>,
    /// Lifetime of tokens handed out by the login endpoint
    pub login_token_validity: Duration,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("token_service", &self.token_service)
            .field("login_token_validity", &self.login_token_validity)
            .finish_non_exhaustive()
    }
}

/// Trait for account operations
#[async_trait::async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> Result<Registration, DomainError>;
    async fn authenticate(&self, username: &str, password: &str)
        -> Result<Option<User>, DomainError>;
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
}

/// Trait for operations on the caller's own team
#[async_trait::async_trait]
pub trait TeamServiceTrait: Send + Sync {
    async fn team_overview(&self, user_id: UserId) -> Result<TeamOverview, DomainError>;
    async fn update_team(&self, user_id: UserId, patch: TeamPatch)
        -> Result<TeamOverview, DomainError>;
    async fn players(&self, user_id: UserId) -> Result<Vec<Player>, DomainError>;
    async fn update_player(
        &self,
        user_id: UserId,
        player_id: PlayerId,
        patch: PlayerPatch,
    ) -> Result<Player, DomainError>;
}

/// Trait for transfer market operations
#[async_trait::async_trait]
pub trait MarketServiceTrait: Send + Sync {
    async fn list_available(&self) -> Result<Vec<Player>, DomainError>;
    async fn list_for_sale(
        &self,
        user_id: UserId,
        player_id: PlayerId,
        price: i64,
    ) -> Result<ListingOutcome, DomainError>;
    async fn withdraw(&self, user_id: UserId, player_id: PlayerId) -> Result<Player, DomainError>;
    async fn buy(&self, user_id: UserId, player_id: PlayerId) -> Result<Trade, DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<S, H> AccountServiceTrait for AccountService<S, H>
where
    S: GameStore + ?Sized + 'static,
    H: PasswordHasher + ?Sized + 'static,
{
    async fn register(&self, request: RegisterRequest) -> Result<Registration, DomainError> {
        AccountService::register(self, request).await
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        AccountService::authenticate(self, username, password).await
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        AccountService::get_by_username(self, username).await
    }
}

#[async_trait::async_trait]
impl<S: GameStore + ?Sized + 'static> TeamServiceTrait for TeamService<S> {
    async fn team_overview(&self, user_id: UserId) -> Result<TeamOverview, DomainError> {
        TeamService::team_overview(self, user_id).await
    }

    async fn update_team(
        &self,
        user_id: UserId,
        patch: TeamPatch,
    ) -> Result<TeamOverview, DomainError> {
        TeamService::update_team(self, user_id, patch).await
    }

    async fn players(&self, user_id: UserId) -> Result<Vec<Player>, DomainError> {
        TeamService::players(self, user_id).await
    }

    async fn update_player(
        &self,
        user_id: UserId,
        player_id: PlayerId,
        patch: PlayerPatch,
    ) -> Result<Player, DomainError> {
        TeamService::update_player(self, user_id, player_id, patch).await
    }
}

#[async_trait::async_trait]
impl<S: GameStore + ?Sized + 'static> MarketServiceTrait for MarketService<S> {
    async fn list_available(&self) -> Result<Vec<Player>, DomainError> {
        MarketService::list_available(self).await
    }

    async fn list_for_sale(
        &self,
        user_id: UserId,
        player_id: PlayerId,
        price: i64,
    ) -> Result<ListingOutcome, DomainError> {
        MarketService::list_for_sale(self, user_id, player_id, price).await
    }

    async fn withdraw(&self, user_id: UserId, player_id: PlayerId) -> Result<Player, DomainError> {
        MarketService::withdraw(self, user_id, player_id).await
    }

    async fn buy(&self, user_id: UserId, player_id: PlayerId) -> Result<Trade, DomainError> {
        MarketService::buy(self, user_id, player_id).await
    }
}
