//! Roster generation for newly registered accounts

mod composition;
mod generator;
mod names;

pub use composition::RosterComposition;
pub use generator::RosterGenerator;
