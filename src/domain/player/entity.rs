//! Player entity, playing roles and market state

use serde::{Deserialize, Serialize};

use crate::domain::team::TeamId;
use crate::domain::DomainError;

/// Youngest age a generated player can have
pub const MIN_PLAYER_AGE: u8 = 18;
/// Oldest age a generated player can have
pub const MAX_PLAYER_AGE: u8 = 40;

/// Player identifier assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(i64);

impl PlayerId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position a player is fielded in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    Goalkeeper,
    Defender,
    Midfielder,
    Attacker,
}

impl PlayerRole {
    pub const ALL: [PlayerRole; 4] = [
        PlayerRole::Goalkeeper,
        PlayerRole::Defender,
        PlayerRole::Midfielder,
        PlayerRole::Attacker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Goalkeeper => "goalkeeper",
            Self::Defender => "defender",
            Self::Midfielder => "midfielder",
            Self::Attacker => "attacker",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "goalkeeper" => Some(Self::Goalkeeper),
            "defender" => Some(Self::Defender),
            "midfielder" => Some(Self::Midfielder),
            "attacker" => Some(Self::Attacker),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transfer market state of a player
///
/// An asking price exists exactly when the player is listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MarketStatus {
    #[default]
    OffMarket,
    Listed { price: i64 },
}

impl MarketStatus {
    pub fn is_listed(&self) -> bool {
        matches!(self, Self::Listed { .. })
    }

    pub fn asking_price(&self) -> Option<i64> {
        match self {
            Self::Listed { price } => Some(*price),
            Self::OffMarket => None,
        }
    }

    /// Rebuild from the stored column pair
    pub fn from_columns(on_market: bool, requested_value: Option<i64>) -> Result<Self, DomainError> {
        match (on_market, requested_value) {
            (true, Some(price)) => Ok(Self::Listed { price }),
            (false, None) => Ok(Self::OffMarket),
            (true, None) => Err(DomainError::storage("listed player is missing its asking price")),
            (false, Some(_)) => Err(DomainError::storage("unlisted player carries an asking price")),
        }
    }
}

/// A footballer owned by exactly one team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    surname: String,
    country: String,
    role: PlayerRole,
    age: u8,
    team_id: TeamId,
    value: i64,
    market: MarketStatus,
}

impl Player {
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: PlayerId,
        name: impl Into<String>,
        surname: impl Into<String>,
        country: impl Into<String>,
        role: PlayerRole,
        age: u8,
        team_id: TeamId,
        value: i64,
        market: MarketStatus,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            surname: surname.into(),
            country: country.into(),
            role,
            age,
            team_id,
            value,
            market,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn role(&self) -> PlayerRole {
        self.role
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn team_id(&self) -> TeamId {
        self.team_id
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn market(&self) -> MarketStatus {
        self.market
    }

    pub fn is_owned_by(&self, team_id: TeamId) -> bool {
        self.team_id == team_id
    }

    /// Put the player on the market, overwriting any previous asking price.
    ///
    /// Returns whether the player was already listed.
    pub fn list_for_sale(&mut self, price: i64) -> Result<bool, DomainError> {
        if price <= 0 {
            return Err(DomainError::validation("price requested for player not allowed"));
        }

        let was_listed = self.market.is_listed();
        self.market = MarketStatus::Listed { price };
        Ok(was_listed)
    }

    /// Take the player off the market
    pub fn withdraw(&mut self) -> Result<(), DomainError> {
        if !self.market.is_listed() {
            return Err(DomainError::business_rule("player not on market list"));
        }

        self.market = MarketStatus::OffMarket;
        Ok(())
    }

    /// Apply the supplied fields of a patch, leaving the rest untouched
    pub fn apply(&mut self, patch: &PlayerPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }

        if let Some(surname) = &patch.surname {
            self.surname = surname.clone();
        }

        if let Some(country) = &patch.country {
            self.country = country.clone();
        }
    }

    /// Move the player to a new team at a new valuation, off the market
    pub(crate) fn transfer_to(&mut self, team_id: TeamId, value: i64) {
        self.team_id = team_id;
        self.value = value;
        self.market = MarketStatus::OffMarket;
    }
}

/// Player draft produced by the roster generator
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlayer {
    pub name: String,
    pub surname: String,
    pub country: String,
    pub role: PlayerRole,
    pub age: u8,
    pub team_id: TeamId,
    pub value: i64,
}

impl NewPlayer {
    /// Materialize the draft under a store-assigned id; new players start off market
    pub fn into_player(self, id: PlayerId) -> Player {
        Player::from_parts(
            id,
            self.name,
            self.surname,
            self.country,
            self.role,
            self.age,
            self.team_id,
            self.value,
            MarketStatus::OffMarket,
        )
    }
}

/// Partial update of the owner-editable player fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerPatch {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub country: Option<String>,
}

impl PlayerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.surname.is_none() && self.country.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        NewPlayer {
            name: "Marco".to_string(),
            surname: "Rossi".to_string(),
            country: "Italy".to_string(),
            role: PlayerRole::Midfielder,
            age: 24,
            team_id: TeamId::new(1),
            value: 1_000_000,
        }
        .into_player(PlayerId::new(10))
    }

    #[test]
    fn test_new_player_starts_off_market() {
        let player = player();
        assert_eq!(player.market(), MarketStatus::OffMarket);
        assert_eq!(player.market().asking_price(), None);
    }

    #[test]
    fn test_list_for_sale() {
        let mut player = player();

        let was_listed = player.list_for_sale(1_100_000).unwrap();
        assert!(!was_listed);
        assert_eq!(player.market(), MarketStatus::Listed { price: 1_100_000 });
    }

    #[test]
    fn test_relisting_overwrites_price() {
        let mut player = player();

        player.list_for_sale(1_100_000).unwrap();
        let was_listed = player.list_for_sale(900_000).unwrap();

        assert!(was_listed);
        assert_eq!(player.market().asking_price(), Some(900_000));
    }

    #[test]
    fn test_list_rejects_non_positive_price() {
        let mut player = player();

        for price in [0, -1] {
            let result = player.list_for_sale(price);
            assert!(matches!(result, Err(DomainError::Validation { .. })));
        }
        assert_eq!(player.market(), MarketStatus::OffMarket);
    }

    #[test]
    fn test_withdraw() {
        let mut player = player();
        player.list_for_sale(500).unwrap();

        player.withdraw().unwrap();
        assert_eq!(player.market(), MarketStatus::OffMarket);
    }

    #[test]
    fn test_withdraw_unlisted_player() {
        let mut player = player();

        let result = player.withdraw();
        assert!(matches!(result, Err(DomainError::BusinessRule { .. })));
    }

    #[test]
    fn test_apply_patch() {
        let mut player = player();

        player.apply(&PlayerPatch {
            name: None,
            surname: Some("Bianchi".to_string()),
            country: Some("Spain".to_string()),
        });

        assert_eq!(player.name(), "Marco");
        assert_eq!(player.surname(), "Bianchi");
        assert_eq!(player.country(), "Spain");
    }

    #[test]
    fn test_transfer_clears_listing() {
        let mut player = player();
        player.list_for_sale(1_100_000).unwrap();

        player.transfer_to(TeamId::new(2), 1_500_000);

        assert_eq!(player.team_id(), TeamId::new(2));
        assert_eq!(player.value(), 1_500_000);
        assert!(!player.market().is_listed());
    }

    #[test]
    fn test_market_status_from_columns() {
        assert_eq!(
            MarketStatus::from_columns(true, Some(10)).unwrap(),
            MarketStatus::Listed { price: 10 }
        );
        assert_eq!(
            MarketStatus::from_columns(false, None).unwrap(),
            MarketStatus::OffMarket
        );
        assert!(MarketStatus::from_columns(true, None).is_err());
        assert!(MarketStatus::from_columns(false, Some(10)).is_err());
    }

    #[test]
    fn test_role_round_trip_names() {
        for role in PlayerRole::ALL {
            assert_eq!(PlayerRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(PlayerRole::parse("striker"), None);
    }
}
