use std::sync::Arc;
use log::info;
use tokio::net::TcpListener;
use link_media_crawler::{
    config::Config,
    api::routes::create_router,
    crawler::WebCrawler,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Load configuration
    let config = Config::load()?;
    let server_addr = config.server_addr;
    info!("Starting server on {}", server_addr);

    // Create application state
    let app_state = AppState {
        config: Arc::new(config),
        crawler: Arc::new(WebCrawler::new()?),
    };

    // Build the router with routes
    let app = create_router(app_state);

    // Create the listener
    let listener = TcpListener::bind(server_addr).await?;

    // Start the server
    info!("Listening on http://{}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
