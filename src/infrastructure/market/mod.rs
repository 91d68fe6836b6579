//! Market infrastructure implementations

mod service;

pub use service::{ListingOutcome, MarketService};
