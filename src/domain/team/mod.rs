//! Team domain
//!
//! Clubs, their owner-editable details and the budget used on the transfer market.

mod entity;
mod repository;
mod validation;

pub use entity::{NewTeam, Team, TeamId, TeamPatch};
pub use repository::TeamRepository;
pub use validation::{
    validate_country, validate_team_name, validate_team_patch, TeamValidationError,
};
