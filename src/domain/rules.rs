//! Tunable game parameters

use serde::{Deserialize, Serialize};

use super::market::MarkupRange;
use super::roster::RosterComposition;
use super::DomainError;

/// Economy and roster settings shared by registration and the market
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    /// Budget every new team starts with
    pub starting_budget: i64,
    /// Market value every generated player starts with
    pub initial_player_value: i64,
    pub roster: RosterComposition,
    pub markup: MarkupRange,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            starting_budget: 5_000_000,
            initial_player_value: 1_000_000,
            roster: RosterComposition::default(),
            markup: MarkupRange::default(),
        }
    }
}

impl GameRules {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.starting_budget < 0 {
            return Err(DomainError::configuration("Starting budget must not be negative"));
        }

        if self.initial_player_value <= 0 {
            return Err(DomainError::configuration("Initial player value must be positive"));
        }

        if self.roster.total() == 0 {
            return Err(DomainError::configuration("Roster must contain at least one player"));
        }

        self.markup.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GameRules::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_rules() {
        let negative_budget = GameRules {
            starting_budget: -1,
            ..GameRules::default()
        };
        assert!(negative_budget.validate().is_err());

        let worthless_players = GameRules {
            initial_player_value: 0,
            ..GameRules::default()
        };
        assert!(worthless_players.validate().is_err());

        let inverted_markup = GameRules {
            markup: MarkupRange { min: 90, max: 10 },
            ..GameRules::default()
        };
        assert!(matches!(
            inverted_markup.validate(),
            Err(DomainError::Configuration { .. })
        ));
    }

    #[test]
    fn test_partial_deserialization_keeps_defaults() {
        let rules: GameRules =
            serde_json::from_str(r#"{"starting_budget": 100, "markup": {"min": 5, "max": 6}}"#)
                .unwrap();

        assert_eq!(rules.starting_budget, 100);
        assert_eq!(rules.initial_player_value, 1_000_000);
        assert_eq!(rules.markup, MarkupRange { min: 5, max: 6 });
        assert_eq!(rules.roster, RosterComposition::default());
    }
}
