//! Registration and login endpoints

use axum::{extract::State, routing::post, Router};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Form, Json, MessageResponse};
use crate::infrastructure::user::RegisterRequest;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Registration body
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub username: String,
    pub password: String,
}

/// Login form fields
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub msg: String,
    pub token: String,
}

/// Register a manager together with a generated team
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<Json<MessageResponse>, ApiError> {
    let registration = state
        .account_service
        .register(RegisterRequest {
            username: body.username,
            password: body.password,
        })
        .await?;

    debug!(user_id = %registration.user.id(), "Registration request completed");

    Ok(Json(MessageResponse::new("User and team successfully created")))
}

/// Exchange credentials for a bearer token
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .account_service
        .authenticate(&form.username, &form.password)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Incorrect username or password"))?;

    let token = state
        .token_service
        .issue_token(user.username(), Some(state.login_token_validity))?;

    info!(user_id = %user.id(), "User logged in");

    Ok(Json(LoginResponse {
        msg: format!("User {} validated", user.username()),
        token,
    }))
}
