use serde::{Deserialize, Serialize};

use crate::domain::player::PlayerRole;

/// Number of players per role a new team is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterComposition {
    pub goalkeeper: u32,
    pub defender: u32,
    pub midfielder: u32,
    pub attacker: u32,
}

impl Default for RosterComposition {
    fn default() -> Self {
        Self {
            goalkeeper: 3,
            defender: 6,
            midfielder: 6,
            attacker: 5,
        }
    }
}

impl RosterComposition {
    pub fn count_for(&self, role: PlayerRole) -> u32 {
        match role {
            PlayerRole::Goalkeeper => self.goalkeeper,
            PlayerRole::Defender => self.defender,
            PlayerRole::Midfielder => self.midfielder,
            PlayerRole::Attacker => self.attacker,
        }
    }

    /// Role and count pairs in fielding order
    pub fn entries(&self) -> impl Iterator<Item = (PlayerRole, u32)> + '_ {
        PlayerRole::ALL
            .into_iter()
            .map(move |role| (role, self.count_for(role)))
    }

    pub fn total(&self) -> u32 {
        self.entries().map(|(_, count)| count).sum()
    }
}
