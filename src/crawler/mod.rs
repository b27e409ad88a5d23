pub mod extract;
pub mod fetch;
pub mod social;

use std::collections::HashMap;
use std::time::Instant;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::Serialize;
use url::Url;

use self::fetch::FetchOutcome;

/// Key under which same-site links are stored in [`CrawlResult::links`].
pub const INTERNAL: &str = "internal";
/// Key under which off-site links are stored in [`CrawlResult::links`].
pub const EXTERNAL: &str = "external";
/// Key under which embedded images are stored in [`CrawlResult::media`].
pub const IMAGES: &str = "images";

#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Per-run switches for a crawl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlerRunConfig {
    /// Drop external links that point at known social-media sites.
    pub exclude_social_media_links: bool,
    /// Resolve lazy-loaded images to their real source before reporting them.
    pub wait_for_images: bool,
    /// Emit progress lines at info level instead of debug.
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
    pub text: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub src: String,
    pub alt: Option<String>,
}

/// Outcome of crawling one URL.
///
/// A crawl that could not produce content is still an `Ok` value with
/// `success == false` and a human readable `error_message`.
#[derive(Debug, Clone, Default)]
pub struct CrawlResult {
    pub url: String,
    pub success: bool,
    pub status_code: Option<u16>,
    pub error_message: Option<String>,
    pub links: HashMap<String, Vec<Link>>,
    pub media: HashMap<String, Vec<Image>>,
}

impl CrawlResult {
    pub fn failure(url: &str, message: impl Into<String>) -> Self {
        CrawlResult {
            url: url.to_string(),
            success: false,
            error_message: Some(message.into()),
            ..Default::default()
        }
    }
}

#[async_trait]
pub trait Crawler: Send + Sync {
    async fn crawl(&self, url: &str, config: &CrawlerRunConfig) -> Result<CrawlResult, CrawlError>;
}

/// Fetches a page over HTTP and extracts its links and images.
#[derive(Clone)]
pub struct WebCrawler {
    client: Client,
}

impl WebCrawler {
    pub fn new() -> Result<Self, CrawlError> {
        Ok(WebCrawler {
            client: fetch::build_client()?,
        })
    }
}

macro_rules! progress {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            info!($($arg)+)
        } else {
            debug!($($arg)+)
        }
    };
}

#[async_trait]
impl Crawler for WebCrawler {
    async fn crawl(&self, url: &str, config: &CrawlerRunConfig) -> Result<CrawlResult, CrawlError> {
        let start = Instant::now();

        let target = match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => parsed,
            Ok(parsed) => {
                return Ok(CrawlResult::failure(
                    url,
                    format!("Unsupported URL scheme: {}", parsed.scheme()),
                ));
            }
            Err(e) => return Ok(CrawlResult::failure(url, format!("Invalid URL '{}': {}", url, e))),
        };

        progress!(config.verbose, "[FETCH] {}", target);
        let page = match fetch::fetch_page(&self.client, target).await {
            FetchOutcome::Page(page) => page,
            FetchOutcome::Failed { status, message } => {
                progress!(config.verbose, "[ERROR] {}: {}", url, message);
                let mut result = CrawlResult::failure(url, message);
                result.status_code = status;
                return Ok(result);
            }
        };
        progress!(
            config.verbose,
            "[FETCH] {} ({} bytes, status {}) in {:?}",
            page.final_url,
            page.html.len(),
            page.status,
            start.elapsed()
        );

        let extracted = extract::extract(&page.html, &page.final_url, config);
        progress!(
            config.verbose,
            "[SCRAPE] {}: {} internal, {} external links, {} images",
            page.final_url,
            extracted.internal.len(),
            extracted.external.len(),
            extracted.images.len()
        );

        let mut links = HashMap::new();
        links.insert(INTERNAL.to_string(), extracted.internal);
        links.insert(EXTERNAL.to_string(), extracted.external);
        let mut media = HashMap::new();
        media.insert(IMAGES.to_string(), extracted.images);

        progress!(config.verbose, "[COMPLETE] {} in {:?}", url, start.elapsed());
        Ok(CrawlResult {
            url: url.to_string(),
            success: true,
            status_code: Some(page.status),
            error_message: None,
            links,
            media,
        })
    }
}
