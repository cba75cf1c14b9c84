//! Web server for the network explorer
//!
//! Provides an HTTP server using Axum to serve the page and the JSON API
//! that runs the pipeline.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::debug;

use crate::pipeline::Pipeline;

use super::routes;

/// Shared application state
///
/// Read-only: requests share the configuration and HTTP client but no
/// per-request data.
pub struct AppState {
    pub pipeline: Pipeline,
    pub default_proteins: String,
    pub api_endpoint: Option<String>,
}

/// Configuration for the web server
pub struct ServerConfig {
    pub port: u16,
    pub open_browser: bool,
    pub api_endpoint: Option<String>,
    pub default_proteins: String,
}

/// Build the application router
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .merge(routes::static_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the web server and serve the page
pub async fn start_server(
    pipeline: Pipeline,
    config: ServerConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let state = Arc::new(AppState {
        pipeline,
        default_proteins: config.default_proteins.clone(),
        api_endpoint: config.api_endpoint.clone(),
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = TcpListener::bind(addr).await?;

    let url = format!("http://localhost:{}", config.port);
    debug!(%url, "web server listening");
    eprintln!("Starting web server at {}", url);

    if config.open_browser {
        eprintln!("Opening browser...");
        if let Err(e) = open::that(&url) {
            debug!(error = %e, "could not open browser");
            eprintln!("Warning: Could not open browser: {}", e);
            eprintln!("Please open {} manually", url);
        }
    }

    eprintln!("Press Ctrl+C to stop the server");

    axum::serve(listener, app(state)).await?;

    Ok(())
}
