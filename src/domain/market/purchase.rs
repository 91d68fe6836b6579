//! Purchase settlement

use serde::Serialize;

use super::markup::apply_markup;
use crate::domain::player::{MarketStatus, Player, PlayerId};
use crate::domain::team::{Team, TeamId};
use crate::domain::DomainError;

/// A buy the market engine has validated and hands to the store to settle.
///
/// The store re-checks every condition against the state it holds locked, so
/// at most one purchase can complete per listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub player_id: PlayerId,
    pub seller: TeamId,
    pub buyer: TeamId,
    /// Asking price the buyer agreed to pay
    pub price: i64,
    /// Percentage drawn for the post-sale value markup
    pub markup_percent: u32,
}

/// Outcome of a settled purchase
#[derive(Debug, Clone, Serialize)]
pub struct Trade {
    pub player: Player,
    pub buyer: Team,
    pub seller: Team,
    pub price: i64,
    pub previous_value: i64,
}

impl Purchase {
    pub fn ensure_distinct_parties(&self) -> Result<(), DomainError> {
        if self.buyer == self.seller {
            return Err(DomainError::ownership(
                "player with the given id already belongs to user",
            ));
        }

        Ok(())
    }

    /// Check the purchase against current state and apply it.
    ///
    /// Nothing is modified when an error is returned. On success returns the
    /// player's value before the markup.
    pub fn settle(
        &self,
        player: &mut Player,
        buyer: &mut Team,
        seller: &mut Team,
    ) -> Result<i64, DomainError> {
        self.ensure_distinct_parties()?;

        if player.id() != self.player_id || buyer.id() != self.buyer || seller.id() != self.seller
        {
            return Err(DomainError::internal("purchase settled against the wrong records"));
        }

        if !player.is_owned_by(self.seller) {
            return Err(DomainError::business_rule(
                "player changed owner before the purchase completed",
            ));
        }

        match player.market() {
            MarketStatus::OffMarket => {
                return Err(DomainError::business_rule("player not on market list"));
            }
            MarketStatus::Listed { price } if price != self.price => {
                return Err(DomainError::business_rule(
                    "asking price changed before the purchase completed",
                ));
            }
            MarketStatus::Listed { .. } => {}
        }

        buyer.debit(self.price)?;
        seller.credit(self.price);

        let previous_value = player.value();
        player.transfer_to(buyer.id(), apply_markup(previous_value, self.markup_percent));

        Ok(previous_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::player::{NewPlayer, PlayerRole};
    use crate::domain::user::UserId;

    fn fixtures(price: Option<i64>, buyer_budget: i64) -> (Player, Team, Team) {
        let mut player = NewPlayer {
            name: "Luca".to_string(),
            surname: "Verdi".to_string(),
            country: "Italy".to_string(),
            role: PlayerRole::Attacker,
            age: 30,
            team_id: TeamId::new(1),
            value: 1_000_000,
        }
        .into_player(PlayerId::new(10));

        if let Some(price) = price {
            player.list_for_sale(price).unwrap();
        }

        let seller = Team::from_parts(TeamId::new(1), UserId::new(1), "Sellers", "Italy", 5_000_000);
        let buyer = Team::from_parts(TeamId::new(2), UserId::new(2), "Buyers", "Spain", buyer_budget);

        (player, buyer, seller)
    }

    fn purchase(price: i64) -> Purchase {
        Purchase {
            player_id: PlayerId::new(10),
            seller: TeamId::new(1),
            buyer: TeamId::new(2),
            price,
            markup_percent: 50,
        }
    }

    #[test]
    fn test_settle_moves_money_and_player() {
        let (mut player, mut buyer, mut seller) = fixtures(Some(1_100_000), 5_000_000);

        let previous = purchase(1_100_000)
            .settle(&mut player, &mut buyer, &mut seller)
            .unwrap();

        assert_eq!(previous, 1_000_000);
        assert_eq!(buyer.budget(), 3_900_000);
        assert_eq!(seller.budget(), 6_100_000);
        assert_eq!(player.team_id(), TeamId::new(2));
        assert_eq!(player.value(), 1_500_000);
        assert_eq!(player.market(), MarketStatus::OffMarket);
    }

    #[test]
    fn test_settle_insufficient_funds_changes_nothing() {
        let (mut player, mut buyer, mut seller) = fixtures(Some(1_100_000), 1_000_000);
        let before = (player.clone(), buyer.clone(), seller.clone());

        let result = purchase(1_100_000).settle(&mut player, &mut buyer, &mut seller);

        assert!(matches!(result, Err(DomainError::BusinessRule { .. })));
        assert_eq!((player, buyer, seller), before);
    }

    #[test]
    fn test_settle_unlisted_player() {
        let (mut player, mut buyer, mut seller) = fixtures(None, 5_000_000);

        let result = purchase(1_100_000).settle(&mut player, &mut buyer, &mut seller);
        assert!(matches!(result, Err(DomainError::BusinessRule { .. })));
    }

    #[test]
    fn test_settle_price_changed() {
        let (mut player, mut buyer, mut seller) = fixtures(Some(2_000_000), 5_000_000);

        let result = purchase(1_100_000).settle(&mut player, &mut buyer, &mut seller);
        assert!(matches!(result, Err(DomainError::BusinessRule { .. })));
        assert_eq!(buyer.budget(), 5_000_000);
    }

    #[test]
    fn test_same_team_purchase_rejected() {
        let mut purchase = purchase(1);
        purchase.buyer = purchase.seller;

        assert!(matches!(
            purchase.ensure_distinct_parties(),
            Err(DomainError::Ownership { .. })
        ));
    }
}
