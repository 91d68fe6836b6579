//! Endpoints for the players of the caller's team

use axum::{extract::State, routing::get, Router};
use serde::Deserialize;
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{non_empty, ApiError, Json, PlayerResponse, Query};
use crate::domain::{PlayerId, PlayerPatch};

pub fn create_players_router() -> Router<AppState> {
    Router::new()
        .route("/user", get(list_players))
        .route("/update", get(update_player))
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlayerQuery {
    pub player_id: i64,
    pub player_name: Option<String>,
    pub player_surname: Option<String>,
    pub player_country: Option<String>,
}

/// GET /players/user
pub async fn list_players(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<PlayerResponse>>, ApiError> {
    let players = state.team_service.players(user.id()).await?;
    debug!(user_id = %user.id(), count = players.len(), "Listed players");

    Ok(Json(players.iter().map(PlayerResponse::from).collect()))
}

/// GET /players/update
///
/// Only name, surname and country are editable; blank or missing fields are kept.
pub async fn update_player(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(query): Query<UpdatePlayerQuery>,
) -> Result<Json<PlayerResponse>, ApiError> {
    let patch = PlayerPatch {
        name: non_empty(query.player_name),
        surname: non_empty(query.player_surname),
        country: non_empty(query.player_country),
    };

    let player = state
        .team_service
        .update_player(user.id(), PlayerId::new(query.player_id), patch)
        .await?;

    Ok(Json(PlayerResponse::from(&player)))
}
