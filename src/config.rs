use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use crate::crawler::CrawlerRunConfig;
use crate::error::{AppError, Result};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

/// Crawl flags every request runs with.
pub const CRAWL_FLAGS: CrawlerRunConfig = CrawlerRunConfig {
    exclude_social_media_links: true,
    wait_for_images: true,
    verbose: true,
};

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub crawl: CrawlerRunConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_values(env::var("HOST").ok(), env::var("PORT").ok())
    }

    pub fn from_values(host: Option<String>, port: Option<String>) -> Result<Self> {
        let host = host.unwrap_or_else(|| DEFAULT_HOST.to_string());
        let ip = IpAddr::from_str(&host)
            .map_err(|e| AppError::Config(format!("Invalid host address: {}", e)))?;
        let port = match port {
            Some(port) => port
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("Invalid port: {}", e)))?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            crawl: CRAWL_FLAGS,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            crawl: CRAWL_FLAGS,
        }
    }
}
