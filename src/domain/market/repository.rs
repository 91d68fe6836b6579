use async_trait::async_trait;

use super::purchase::{Purchase, Trade};
use crate::domain::DomainError;

/// Store capability to settle a purchase atomically
#[async_trait]
pub trait TradeRepository: Send + Sync {
    /// Apply `purchase` as one unit: budgets, ownership, value and listing
    /// change together or not at all.
    async fn settle_purchase(&self, purchase: &Purchase) -> Result<Trade, DomainError>;
}
