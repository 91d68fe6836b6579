//! Market service: listings and purchases

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::market::{MarkupPolicy, Purchase, Trade};
use crate::domain::player::{
    player_not_found, player_not_owned, MarketStatus, Player, PlayerId,
};
use crate::domain::team::Team;
use crate::domain::user::UserId;
use crate::domain::{DomainError, GameStore};
use crate::infrastructure::observability::{
    record_market_listing, record_market_trade, TradeOutcome,
};

/// Result of putting a player on the market
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingOutcome {
    pub player: Player,
    /// The player already had an asking price, which was overwritten
    pub previously_listed: bool,
}

/// Market engine over the shared game store
pub struct MarketService<S: GameStore + ?Sized> {
    store: Arc<S>,
    markup: Arc<MarkupPolicy>,
}

impl<S: GameStore + ?Sized> MarketService<S> {
    pub fn new(store: Arc<S>, markup: Arc<MarkupPolicy>) -> Self {
        Self { store, markup }
    }

    /// Caller's team and the addressed player, in that order
    async fn resolve(&self, user_id: UserId, player_id: PlayerId) -> Result<(Team, Player), DomainError> {
        let team = self.store.require_team_for_user(user_id).await?;
        let player = self
            .store
            .get_player(player_id)
            .await?
            .ok_or_else(player_not_found)?;

        Ok((team, player))
    }

    /// Every listed player regardless of owner
    pub async fn list_available(&self) -> Result<Vec<Player>, DomainError> {
        let players = self.store.list_players_on_market().await?;
        debug!(count = players.len(), "Listed market players");

        Ok(players)
    }

    /// Put one of the caller's players on the market, replacing any previous price
    pub async fn list_for_sale(
        &self,
        user_id: UserId,
        player_id: PlayerId,
        price: i64,
    ) -> Result<ListingOutcome, DomainError> {
        let (team, player) = self.resolve(user_id, player_id).await?;
        if !player.is_owned_by(team.id()) {
            return Err(player_not_owned());
        }

        if price <= 0 {
            return Err(DomainError::validation("price requested for player not allowed"));
        }

        let previously_listed = player.market().is_listed();
        let player = self
            .store
            .set_market_status(player_id, team.id(), MarketStatus::Listed { price })
            .await?;

        info!(
            player_id = %player_id,
            team_id = %team.id(),
            price,
            previously_listed,
            "Player listed on market"
        );
        record_market_listing(if previously_listed { "relisted" } else { "listed" });

        Ok(ListingOutcome {
            player,
            previously_listed,
        })
    }

    /// Take one of the caller's players off the market
    pub async fn withdraw(&self, user_id: UserId, player_id: PlayerId) -> Result<Player, DomainError> {
        let (team, player) = self.resolve(user_id, player_id).await?;
        if !player.is_owned_by(team.id()) {
            return Err(player_not_owned());
        }

        if !player.market().is_listed() {
            return Err(DomainError::business_rule("player not on market list"));
        }

        let player = self
            .store
            .set_market_status(player_id, team.id(), MarketStatus::OffMarket)
            .await?;

        info!(player_id = %player_id, team_id = %team.id(), "Player withdrawn from market");
        record_market_listing("withdrawn");

        Ok(player)
    }

    /// Buy a listed player from another team at its asking price
    pub async fn buy(&self, user_id: UserId, player_id: PlayerId) -> Result<Trade, DomainError> {
        let (buyer, player) = self.resolve(user_id, player_id).await?;

        let result = self.settle(&buyer, &player).await;
        match &result {
            Ok(trade) => {
                info!(
                    player_id = %player_id,
                    buyer_id = %trade.buyer.id(),
                    seller_id = %trade.seller.id(),
                    price = trade.price,
                    previous_value = trade.previous_value,
                    new_value = trade.player.value(),
                    "Player transferred"
                );
                record_market_trade(TradeOutcome::Settled, Some(trade.price));
            }
            Err(e) => {
                warn!(player_id = %player_id, buyer_id = %buyer.id(), error = %e, "Purchase rejected");
                record_market_trade(TradeOutcome::Rejected, None);
            }
        }

        result
    }

    async fn settle(&self, buyer: &Team, player: &Player) -> Result<Trade, DomainError> {
        if player.is_owned_by(buyer.id()) {
            return Err(DomainError::ownership(
                "player with the given id already belongs to user",
            ));
        }

        let price = player
            .market()
            .asking_price()
            .ok_or_else(|| DomainError::business_rule("player not on market list"))?;

        if !buyer.can_afford(price) {
            return Err(DomainError::business_rule(
                "user does not have enough money to buy player",
            ));
        }

        let purchase = Purchase {
            player_id: player.id(),
            seller: player.team_id(),
            buyer: buyer.id(),
            price,
            markup_percent: self.markup.draw_percent(),
        };

        self.store.settle_purchase(&purchase).await
    }
}

impl<S: GameStore + ?Sized> std::fmt::Debug for MarketService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketService")
            .field("markup", &self.markup.range())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::MarkupRange;
    use crate::domain::player::PlayerRepository;
    use crate::domain::team::TeamRepository;
    use crate::infrastructure::storage::InMemoryStore;
    use crate::infrastructure::test_support::{seed_manager, SeededManager};

    struct Fixture {
        store: Arc<InMemoryStore>,
        service: MarketService<InMemoryStore>,
        seller: SeededManager,
        buyer: SeededManager,
    }

    async fn setup_with(range: MarkupRange, buyer_budget: i64) -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let seller = seed_manager(&*store, "seller@example.com", 5_000_000).await;
        let buyer = seed_manager(&*store, "buyer@example.com", buyer_budget).await;
        let service = MarketService::new(store.clone(), Arc::new(MarkupPolicy::with_seed(range, 9)));

        Fixture {
            store,
            service,
            seller,
            buyer,
        }
    }

    async fn setup() -> Fixture {
        setup_with(MarkupRange::default(), 5_000_000).await
    }

    impl Fixture {
        fn target(&self) -> PlayerId {
            self.seller.players[0].id()
        }

        async fn list(&self, price: i64) -> ListingOutcome {
            self.service
                .list_for_sale(self.seller.user.id(), self.target(), price)
                .await
                .unwrap()
        }

        async fn budgets(&self) -> (i64, i64) {
            let seller = self.store.get_team(self.seller.team.id()).await.unwrap().unwrap();
            let buyer = self.store.get_team(self.buyer.team.id()).await.unwrap().unwrap();
            (seller.budget(), buyer.budget())
        }
    }

    #[tokio::test]
    async fn test_list_for_sale() {
        let fixture = setup().await;

        let outcome = fixture.list(1_100_000).await;

        assert!(!outcome.previously_listed);
        assert_eq!(outcome.player.market(), MarketStatus::Listed { price: 1_100_000 });
    }

    #[tokio::test]
    async fn test_relisting_overwrites_price_without_duplicates() {
        let fixture = setup().await;

        fixture.list(1_100_000).await;
        let outcome = fixture.list(750_000).await;

        assert!(outcome.previously_listed);
        let listed = fixture.service.list_available().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].market().asking_price(), Some(750_000));
    }

    #[tokio::test]
    async fn test_list_rejects_non_positive_price() {
        let fixture = setup().await;

        for price in [0, -5] {
            let result = fixture
                .service
                .list_for_sale(fixture.seller.user.id(), fixture.target(), price)
                .await;
            assert!(matches!(result, Err(DomainError::Validation { .. })));
        }
        assert!(fixture.service.list_available().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_owner_cannot_list_or_withdraw() {
        let fixture = setup().await;

        let result = fixture
            .service
            .list_for_sale(fixture.buyer.user.id(), fixture.target(), 100)
            .await;
        assert!(matches!(result, Err(DomainError::Ownership { .. })));

        fixture.list(100).await;
        let result = fixture
            .service
            .withdraw(fixture.buyer.user.id(), fixture.target())
            .await;
        assert!(matches!(result, Err(DomainError::Ownership { .. })));
    }

    #[tokio::test]
    async fn test_missing_player() {
        let fixture = setup().await;

        let result = fixture
            .service
            .list_for_sale(fixture.seller.user.id(), PlayerId::new(9_999), 100)
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));

        let result = fixture.service.buy(fixture.buyer.user.id(), PlayerId::new(9_999)).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_withdraw() {
        let fixture = setup().await;
        fixture.list(1_100_000).await;

        let player = fixture
            .service
            .withdraw(fixture.seller.user.id(), fixture.target())
            .await
            .unwrap();

        assert_eq!(player.market(), MarketStatus::OffMarket);
        assert_eq!(player.market().asking_price(), None);
        assert!(fixture.service.list_available().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_withdraw_unlisted() {
        let fixture = setup().await;

        let result = fixture
            .service
            .withdraw(fixture.seller.user.id(), fixture.target())
            .await;
        assert!(matches!(result, Err(DomainError::BusinessRule { .. })));
    }

    #[tokio::test]
    async fn test_buy_settles_trade() {
        let fixture = setup().await;
        fixture.list(1_100_000).await;

        let trade = fixture
            .service
            .buy(fixture.buyer.user.id(), fixture.target())
            .await
            .unwrap();

        assert_eq!(fixture.budgets().await, (6_100_000, 3_900_000));
        assert_eq!(trade.price, 1_100_000);
        assert_eq!(trade.player.team_id(), fixture.buyer.team.id());
        assert!(trade.player.value() >= 1_100_000);
        assert!(trade.player.value() <= 2_000_000);
        assert!(!trade.player.market().is_listed());

        let stored = fixture.store.get_player(fixture.target()).await.unwrap().unwrap();
        assert_eq!(stored, trade.player);
    }

    #[tokio::test]
    async fn test_buy_markup_follows_configured_range() {
        let fixture = setup_with(MarkupRange { min: 110, max: 200 }, 5_000_000).await;
        fixture.list(500_000).await;

        let trade = fixture
            .service
            .buy(fixture.buyer.user.id(), fixture.target())
            .await
            .unwrap();

        assert!(trade.player.value() >= 2_100_000);
        assert!(trade.player.value() <= 3_000_000);
        assert_eq!(fixture.budgets().await, (5_500_000, 4_500_000));
    }

    #[tokio::test]
    async fn test_buy_own_player() {
        let fixture = setup().await;
        fixture.list(100).await;

        let result = fixture.service.buy(fixture.seller.user.id(), fixture.target()).await;
        assert!(matches!(result, Err(DomainError::Ownership { .. })));
    }

    #[tokio::test]
    async fn test_buy_unlisted_player() {
        let fixture = setup().await;

        let result = fixture.service.buy(fixture.buyer.user.id(), fixture.target()).await;
        assert!(matches!(result, Err(DomainError::BusinessRule { .. })));
    }

    #[tokio::test]
    async fn test_buy_without_funds_changes_nothing() {
        let fixture = setup_with(MarkupRange::default(), 1_000_000).await;
        fixture.list(1_100_000).await;

        let result = fixture.service.buy(fixture.buyer.user.id(), fixture.target()).await;

        assert!(matches!(result, Err(DomainError::BusinessRule { .. })));
        assert_eq!(fixture.budgets().await, (5_000_000, 1_000_000));
        let player = fixture.store.get_player(fixture.target()).await.unwrap().unwrap();
        assert_eq!(player.team_id(), fixture.seller.team.id());
        assert_eq!(player.value(), 1_000_000);
        assert!(player.market().is_listed());
    }

    #[tokio::test]
    async fn test_second_buy_of_same_listing_fails() {
        let fixture = setup().await;
        let third = seed_manager(&*fixture.store, "third@example.com", 5_000_000).await;
        fixture.list(1_000_000).await;

        fixture
            .service
            .buy(fixture.buyer.user.id(), fixture.target())
            .await
            .unwrap();
        let result = fixture.service.buy(third.user.id(), fixture.target()).await;

        assert!(matches!(result, Err(DomainError::BusinessRule { .. })));
        assert_eq!(fixture.budgets().await, (6_000_000, 4_000_000));
    }
}
