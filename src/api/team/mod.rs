//! Endpoints for the caller's own team

use axum::{extract::State, routing::get, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{non_empty, ApiError, Json, Query};
use crate::domain::TeamPatch;
use crate::infrastructure::team::TeamOverview;

pub fn create_team_router() -> Router<AppState> {
    Router::new()
        .route("/user", get(get_team))
        .route("/update", get(update_team))
}

/// Team with the summed value of its squad
#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub country: String,
    pub budget: i64,
    pub value: i64,
}

impl From<&TeamOverview> for TeamResponse {
    fn from(overview: &TeamOverview) -> Self {
        let team = &overview.team;
        Self {
            id: team.id().value(),
            user_id: team.user_id().value(),
            name: team.name().to_string(),
            country: team.country().to_string(),
            budget: team.budget(),
            value: overview.value,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTeamQuery {
    pub team_name: Option<String>,
    pub team_country: Option<String>,
}

/// GET /team/user
pub async fn get_team(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<TeamResponse>, ApiError> {
    debug!(user_id = %user.id(), "Getting team");

    let overview = state.team_service.team_overview(user.id()).await?;
    Ok(Json(TeamResponse::from(&overview)))
}

/// GET /team/update
///
/// Blank or missing fields keep their current value.
pub async fn update_team(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(query): Query<UpdateTeamQuery>,
) -> Result<Json<TeamResponse>, ApiError> {
    let patch = TeamPatch {
        name: non_empty(query.team_name),
        country: non_empty(query.team_country),
    };

    let overview = state.team_service.update_team(user.id(), patch).await?;
    Ok(Json(TeamResponse::from(&overview)))
}
