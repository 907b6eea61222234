use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::SessionResponseData;
use crate::domain::account::models::SignUpCommand;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn sign_up(
    State(state): State<AppState>,
    body: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .account_service
        .sign_up(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}

/// HTTP request body for creating an account (raw JSON)
#[derive(Clone, Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

impl SignUpRequest {
    fn try_into_command(self) -> Result<SignUpCommand, ApiError> {
        SignUpCommand::new(self.username, self.password)
            .map_err(|e| ApiError::BadRequest(e.to_string()))
    }
}
