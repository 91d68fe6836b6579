//! Player domain

mod entity;
mod repository;
mod validation;

pub use entity::{
    MarketStatus, NewPlayer, Player, PlayerId, PlayerPatch, PlayerRole, MAX_PLAYER_AGE,
    MIN_PLAYER_AGE,
};
pub use repository::{player_not_found, player_not_owned, PlayerRepository};
pub use validation::{validate_player_patch, PlayerValidationError};
