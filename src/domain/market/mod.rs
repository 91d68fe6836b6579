//! Transfer market domain
//!
//! A player is either off the market or listed at an asking price
//! (`MarketStatus`). A purchase moves the asking price from the buyer's budget
//! to the seller's, hands the player over and marks its value up by a
//! percentage drawn from the configured `MarkupRange`.

mod markup;
mod purchase;
mod repository;

pub use markup::{apply_markup, MarkupPolicy, MarkupRange};
pub use purchase::{Purchase, Trade};
pub use repository::TradeRepository;
