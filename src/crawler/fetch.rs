use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use url::Url;

const USER_AGENT: &str = concat!("link-media-crawler/", env!("CARGO_PKG_VERSION"));

pub fn build_client() -> reqwest::Result<Client> {
    ClientBuilder::new()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .build()
}

#[derive(Debug)]
pub struct FetchedPage {
    /// URL after redirects.
    pub final_url: Url,
    pub status: u16,
    pub html: String,
}

#[derive(Debug)]
pub enum FetchOutcome {
    Page(FetchedPage),
    Failed { status: Option<u16>, message: String },
}

pub async fn fetch_page(client: &Client, url: Url) -> FetchOutcome {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) if e.is_timeout() => {
            return FetchOutcome::Failed {
                status: None,
                message: format!("Timed out fetching {}", url),
            };
        }
        Err(e) => {
            return FetchOutcome::Failed {
                status: None,
                message: format!("Failed to fetch {}: {}", url, e),
            };
        }
    };

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return FetchOutcome::Failed {
            status: Some(status.as_u16()),
            message: format!("Failed to fetch {}: HTTP {}", url, status),
        };
    }

    let final_url = response.url().clone();
    match response.text().await {
        Ok(html) => FetchOutcome::Page(FetchedPage {
            final_url,
            status: status.as_u16(),
            html,
        }),
        Err(e) => FetchOutcome::Failed {
            status: Some(status.as_u16()),
            message: format!("Failed to read body of {}: {}", url, e),
        },
    }
}
