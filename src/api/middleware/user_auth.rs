//! Manager authentication using JWT bearer tokens

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::User;

/// Extractor that requires a valid JWT token
///
/// The token is read from `Authorization: Bearer <jwt_token>` and its subject
/// must name an existing user.
#[derive(Debug, Clone)]
pub struct RequireUser(pub User);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_jwt_token(&parts.headers)?;

        let claims = state
            .token_service
            .validate_token(&token)
            .map_err(|_| invalid_credentials())?;

        debug!(subject = %claims.subject(), "Validated JWT token");

        let user = state
            .account_service
            .get_by_username(claims.subject())
            .await
            .map_err(ApiError::from)?
            .ok_or_else(invalid_credentials)?;

        Ok(RequireUser(user))
    }
}

fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("Credentials could not be validated")
}

/// Extract JWT token from Authorization header
pub fn extract_jwt_token(headers: &HeaderMap) -> Result<String, ApiError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| invalid_credentials())?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            let token = token.trim();
            if !token.is_empty() {
                return Ok(token.to_string());
            }
        }
    }

    Err(invalid_credentials())
}
