use axum::Json;
use axum::http::StatusCode;

use crate::api::models::CrawlPayload;
use crate::error::ErrorResponse;

pub fn success(payload: CrawlPayload) -> (StatusCode, Json<CrawlPayload>) {
    (StatusCode::OK, Json(payload))
}

pub fn error(status: StatusCode, message: String) -> (StatusCode, Json<ErrorResponse>) {
    (status, Json(ErrorResponse { error: message }))
}
