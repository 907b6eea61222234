use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use super::handlers::MISSING_AUTHORIZATION;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated identity in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: Username,
}

/// Gate for protected routes.
///
/// Resolves the bearer token to a username and hands it to the inner handler
/// as an `AuthenticatedUser` extension. Any failure short-circuits with 401 and
/// the inner handler never runs.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(req.headers())?;

    let username = state
        .account_service
        .authenticate(token)
        .map_err(ApiError::from)?;

    req.extensions_mut().insert(AuthenticatedUser { username });

    Ok(next.run(req).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// A missing header, a non-text value, another scheme, or an empty token are
/// all reported as a missing authorization header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let missing = || ApiError::Unauthorized(MISSING_AUTHORIZATION.to_string());

    let auth_header = headers.get(AUTHORIZATION).ok_or_else(missing)?;

    let auth_str = auth_header.to_str().map_err(|_| {
        tracing::debug!("Authorization header is not valid text");
        missing()
    })?;

    let token = auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::debug!("Authorization header does not use the Bearer scheme");
        missing()
    })?;

    if token.is_empty() {
        return Err(missing());
    }

    Ok(token)
}
