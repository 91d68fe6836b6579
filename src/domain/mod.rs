//! Domain layer - Core business logic and entities

pub mod error;
pub mod market;
pub mod player;
pub mod roster;
pub mod rules;
pub mod store;
pub mod team;
pub mod user;

pub use error::DomainError;
pub use market::{apply_markup, MarkupPolicy, MarkupRange, Purchase, Trade, TradeRepository};
pub use player::{
    MarketStatus, NewPlayer, Player, PlayerId, PlayerPatch, PlayerRepository, PlayerRole,
};
pub use roster::{RosterComposition, RosterGenerator};
pub use rules::GameRules;
pub use store::{Account, GameStore};
pub use team::{NewTeam, Team, TeamId, TeamPatch, TeamRepository};
pub use user::{NewUser, User, UserId, UserRepository};
