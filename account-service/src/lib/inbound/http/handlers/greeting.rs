use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

pub async fn greeting() -> ApiSuccess<GreetingResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        GreetingResponseData {
            message: "Hello, World!".to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GreetingResponseData {
    pub message: String,
}
