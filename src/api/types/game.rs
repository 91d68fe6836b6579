//! Player and message bodies returned by the game endpoints

use serde::Serialize;

use crate::domain::Player;

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Player as exposed over HTTP
#[derive(Debug, Clone, Serialize)]
pub struct PlayerResponse {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub country: String,
    pub role: String,
    pub age: u8,
    pub team_id: i64,
    pub value: i64,
    pub on_market: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_value: Option<i64>,
}

impl From<&Player> for PlayerResponse {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id().value(),
            name: player.name().to_string(),
            surname: player.surname().to_string(),
            country: player.country().to_string(),
            role: player.role().to_string(),
            age: player.age(),
            team_id: player.team_id().value(),
            value: player.value(),
            on_market: player.market().is_listed(),
            requested_value: player.market().asking_price(),
        }
    }
}

/// Acknowledgement carrying the affected player
#[derive(Debug, Clone, Serialize)]
pub struct PlayerMessageResponse {
    pub msg: String,
    pub player: PlayerResponse,
}

impl PlayerMessageResponse {
    pub fn new(msg: impl Into<String>, player: &Player) -> Self {
        Self {
            msg: msg.into(),
            player: PlayerResponse::from(player),
        }
    }
}

/// Blank query values count as omitted
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
