//! Transfer market endpoints

use axum::{extract::State, routing::get, Router};
use serde::Deserialize;
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, PlayerMessageResponse, PlayerResponse, Query};
use crate::domain::PlayerId;

pub fn create_market_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_market))
        .route("/sell", get(sell_player))
        .route("/withdraw", get(withdraw_player))
        .route("/buy", get(buy_player))
}

#[derive(Debug, Deserialize)]
pub struct SellQuery {
    pub player_id: i64,
    pub asking_price: i64,
}

#[derive(Debug, Deserialize)]
pub struct PlayerQuery {
    pub player_id: i64,
}

/// GET /market
///
/// Public: every listed player with owner and asking price.
pub async fn list_market(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlayerResponse>>, ApiError> {
    let players = state.market_service.list_available().await?;
    Ok(Json(players.iter().map(PlayerResponse::from).collect()))
}

/// GET /market/sell
///
/// Listing an already listed player replaces its asking price.
pub async fn sell_player(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(query): Query<SellQuery>,
) -> Result<Json<PlayerMessageResponse>, ApiError> {
    let outcome = state
        .market_service
        .list_for_sale(user.id(), PlayerId::new(query.player_id), query.asking_price)
        .await?;

    let msg = if outcome.previously_listed {
        "player already on the market, updated price"
    } else {
        "player put on the market"
    };

    Ok(Json(PlayerMessageResponse::new(msg, &outcome.player)))
}

/// GET /market/withdraw
pub async fn withdraw_player(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(query): Query<PlayerQuery>,
) -> Result<Json<PlayerMessageResponse>, ApiError> {
    let player = state
        .market_service
        .withdraw(user.id(), PlayerId::new(query.player_id))
        .await?;

    Ok(Json(PlayerMessageResponse::new(
        "player withdrawn from market listing",
        &player,
    )))
}

/// GET /market/buy
pub async fn buy_player(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(query): Query<PlayerQuery>,
) -> Result<Json<PlayerMessageResponse>, ApiError> {
    let trade = state
        .market_service
        .buy(user.id(), PlayerId::new(query.player_id))
        .await?;

    debug!(
        player_id = %trade.player.id(),
        price = trade.price,
        "Purchase request completed"
    );

    Ok(Json(PlayerMessageResponse::new("player acquired", &trade.player)))
}
