use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::account::models::Session;

pub mod get_profile;
pub mod greeting;
pub mod log_in;
pub mod sign_up;
pub mod update_username;

pub const SUCCESS_MESSAGE: &str = "Operation successful";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const MISSING_AUTHORIZATION: &str = "Missing authorization header";
pub const INVALID_TOKEN: &str = "Invalid token";
pub const USERNAME_TAKEN: &str = "Username already taken";
pub const INVALID_REQUEST_BODY: &str = "Invalid request body";
pub const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Client-facing failure.
///
/// Messages are drawn from the fixed set above. Internal causes are logged
/// when the response is built and never written to the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(cause) => {
                tracing::error!(error = %cause, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorBody { error: message })).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Validation(e) => ApiError::BadRequest(e.to_string()),
            AccountError::DuplicateUsername(_) => ApiError::BadRequest(USERNAME_TAKEN.to_string()),
            AccountError::InvalidCredentials => {
                ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
            }
            AccountError::Unauthorized(_) | AccountError::NotFound(_) => {
                ApiError::Unauthorized(INVALID_TOKEN.to_string())
            }
            AccountError::Store(_) | AccountError::Internal(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        ApiError::BadRequest(INVALID_REQUEST_BODY.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Body returned by every operation that opens a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponseData {
    pub message: String,
    pub username: String,
    pub token: String,
}

impl From<Session> for SessionResponseData {
    fn from(session: Session) -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
            username: session.username.as_str().to_string(),
            token: session.token,
        }
    }
}
