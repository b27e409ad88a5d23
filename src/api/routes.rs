use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use axum::{
    Form, Router,
    extract::{State, rejection::FormRejection},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use futures::FutureExt;
use log::{debug, info, warn};
use tower_http::cors::{Any as AnyOrigin, CorsLayer};

use crate::AppState;
use crate::api::models::{CrawlForm, CrawlPayload};
use crate::api::response;
use crate::error::{AppError, Result};
use crate::page::INDEX_HTML;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/crawl", post(crawl_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods(AnyOrigin)
                .allow_headers(AnyOrigin),
        )
        .with_state(app_state)
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn crawl_handler(
    State(state): State<AppState>,
    form: std::result::Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Response {
    let url = match form {
        Ok(Form(pairs)) => CrawlForm::from_pairs(pairs).url.filter(|url| !url.is_empty()),
        Err(rejection) => {
            debug!("Unreadable crawl form: {}", rejection);
            None
        }
    };
    let Some(url) = url else {
        return AppError::Validation("URL is required".to_string()).into_response();
    };

    info!("Processing crawl for URL: {}", url);
    let start_time = Instant::now();
    let result = process_crawl_request(&state, &url).await;
    let elapsed = start_time.elapsed();

    match result {
        Ok(payload) => {
            info!(
                "Crawled {} in {:?}: {} internal, {} external, {} images",
                url,
                elapsed,
                payload.links.internal.len(),
                payload.links.external.len(),
                payload.media.images.len()
            );
            response::success(payload).into_response()
        }
        Err(err) => {
            warn!("Crawl of {} failed after {:?}: {}", url, elapsed, err);
            err.into_response()
        }
    }
}

async fn process_crawl_request(state: &AppState, url: &str) -> Result<CrawlPayload> {
    let outcome = AssertUnwindSafe(state.crawler.crawl(url, &state.config.crawl))
        .catch_unwind()
        .await;

    let result = match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => return Err(err.into()),
        Err(panic) => return Err(AppError::Crawl(panic_message(panic.as_ref()))),
    };

    if !result.success {
        debug!(
            "Crawler reported failure for {} (status {:?})",
            result.url, result.status_code
        );
        let message = result
            .error_message
            .unwrap_or_else(|| format!("Failed to crawl {}", url));
        return Err(AppError::Crawl(message));
    }

    Ok(CrawlPayload::from(result))
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        format!("Crawler panicked: {}", message)
    } else if let Some(message) = panic.downcast_ref::<String>() {
        format!("Crawler panicked: {}", message)
    } else {
        "Crawler panicked".to_string()
    }
}
