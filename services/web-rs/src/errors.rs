use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Every failure a panel can surface. `Display` is the exact text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// The gateway base URL is missing; no network call was attempted.
    #[error("{0}")]
    Configuration(String),

    /// The submitted URL was rejected before reaching the gateway.
    #[error("{0}")]
    Validation(String),

    /// Non-success HTTP status or transport failure.
    #[error("{0}")]
    Request(String),
}

pub const MISSING_GATEWAY_MESSAGE: &str = "The API gateway URL is not configured.";

impl AppError {
    pub fn missing_gateway() -> Self {
        Self::Configuration(MISSING_GATEWAY_MESSAGE.to_string())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "configuration",
            AppError::Validation(_) => "validation",
            AppError::Request(_) => "request",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Request(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Request(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
