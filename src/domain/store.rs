//! Combined store seam used by the services

use async_trait::async_trait;

use super::market::TradeRepository;
use super::player::{Player, PlayerRepository};
use super::roster::RosterGenerator;
use super::team::{Team, TeamRepository};
use super::user::{NewUser, User, UserRepository};
use super::DomainError;

/// A manager together with the team and squad generated for them
#[derive(Debug, Clone)]
pub struct Account {
    pub user: User,
    pub team: Team,
    pub players: Vec<Player>,
}

/// A backend holding users, teams and players together so purchases can
/// settle across all three atomically
#[async_trait]
pub trait GameStore: UserRepository + TeamRepository + PlayerRepository + TradeRepository {
    /// Store a user with the team and squad drawn from `roster`
    ///
    /// Either all three are persisted or none are; a taken login name fails
    /// with a conflict.
    async fn create_account(
        &self,
        user: NewUser,
        roster: &RosterGenerator,
    ) -> Result<Account, DomainError>;

    /// Round-trip to the backing store, used by readiness checks
    async fn ping(&self) -> Result<(), DomainError>;
}
