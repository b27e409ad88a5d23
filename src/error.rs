use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};
use serde::Serialize;

/// The `{"error": ...}` envelope every failed request answers with.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Crawl(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Crawl(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        crate::api::response::error(self.status(), self.to_string()).into_response()
    }
}

impl From<crate::crawler::CrawlError> for AppError {
    fn from(err: crate::crawler::CrawlError) -> Self {
        AppError::Crawl(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
