//! HTTP routes for the network explorer
//!
//! Provides the network generation endpoint and static file serving.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::chart::Figure;
use crate::pipeline::{NetworkStats, Outcome, PipelineError};

use super::server::AppState;

/// Embedded static assets
#[derive(RustEmbed)]
#[folder = "web-assets/"]
struct Assets;

/// Frontend configuration
#[derive(Serialize)]
struct FrontendConfig {
    api_endpoint: Option<String>,
    default_proteins: String,
}

/// Body of a network request
#[derive(Deserialize)]
pub struct NetworkRequest {
    /// Comma-separated protein names, exactly as typed
    pub proteins: String,
}

/// Result of a network request, tagged by `kind`
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NetworkResponse {
    Figure { figure: Figure, stats: NetworkStats },
    Info { message: String },
    Error { message: String },
}

/// Create API routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/network", post(generate_network))
        .route("/api/config", get(get_config))
        .route("/api/health", get(health_check))
}

/// Create static file routes
pub fn static_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index_html))
        .route("/{*path}", get(static_handler))
}

/// POST /api/network - Fetch, build and render the network for a protein list
async fn generate_network(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NetworkRequest>,
) -> (StatusCode, Json<NetworkResponse>) {
    match state.pipeline.generate(&request.proteins).await {
        Ok(Outcome::Rendered { figure, stats }) => {
            (StatusCode::OK, Json(NetworkResponse::Figure { figure, stats }))
        }
        Ok(outcome) => {
            let message = outcome.message().unwrap_or_default().to_string();
            (StatusCode::OK, Json(NetworkResponse::Info { message }))
        }
        Err(e) => {
            let status = match e {
                PipelineError::Upstream(_) => StatusCode::BAD_GATEWAY,
                PipelineError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            error!(error = %e, "network request failed");
            (
                status,
                Json(NetworkResponse::Error {
                    message: e.to_string(),
                }),
            )
        }
    }
}

/// GET /api/config - Returns frontend configuration
async fn get_config(State(state): State<Arc<AppState>>) -> Json<FrontendConfig> {
    Json(FrontendConfig {
        api_endpoint: state.api_endpoint.clone(),
        default_proteins: state.default_proteins.clone(),
    })
}

/// GET /api/health - Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

/// GET / - Serve index.html
async fn index_html() -> impl IntoResponse {
    match Assets::get("index.html") {
        Some(content) => Html(content.data.into_owned()).into_response(),
        None => (StatusCode::NOT_FOUND, "index.html not found").into_response(),
    }
}

/// Static file handler for embedded assets
async fn static_handler(Path(path): Path<String>) -> Response {
    let path = path.trim_start_matches('/');

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, format!("File not found: {}", path)).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartOptions;
    use crate::layout::LayoutParams;
    use crate::pipeline::{NO_DATA_MESSAGE, Pipeline};
    use crate::string_db::StringClient;
    use crate::test_support::{self, UpstreamLog};
    use crate::web::server::app;

    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn app_with_upstream(upstream: Router) -> Router {
        let base = test_support::spawn_upstream(upstream).await;
        let client = StringClient::new(base, 9606, 900, None).unwrap();
        app(Arc::new(AppState {
            pipeline: Pipeline::new(client, LayoutParams::default(), ChartOptions::default()),
            default_proteins: "TP53, BRCA1, EGFR".to_string(),
            api_endpoint: None,
        }))
    }

    async fn post_network(app: Router, proteins: &str) -> (StatusCode, Value) {
        let request = Request::post("/api/network")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::json!({ "proteins": proteins }).to_string(),
            ))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_generate_figure() {
        let app = app_with_upstream(test_support::string_mock(
            UpstreamLog::default(),
            test_support::tp53_brca1_body(),
        ))
        .await;

        let (status, body) = post_network(app, "TP53, BRCA1, EGFR").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kind"], "figure");
        assert_eq!(body["stats"]["nodes"], 2);
        assert_eq!(body["stats"]["edges"], 1);
        assert_eq!(body["figure"]["data"][0]["x"].as_array().unwrap().len(), 3);
        assert_eq!(body["figure"]["data"][1]["text"][0], "TP53");
    }

    #[tokio::test]
    async fn test_empty_input_is_info() {
        let app = app_with_upstream(test_support::string_mock(
            UpstreamLog::default(),
            serde_json::json!([]),
        ))
        .await;

        let (status, body) = post_network(app, "").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kind"], "info");
        assert_eq!(body["message"], "Please enter a list of proteins.");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_bad_gateway() {
        let upstream = Router::new().route(
            "/json/network",
            get(|| async { StatusCode::TOO_MANY_REQUESTS }),
        );
        let app = app_with_upstream(upstream).await;

        let (status, body) = post_network(app, "TP53").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["kind"], "error");
        assert_eq!(body["message"], "Error fetching data: 429");
    }

    #[tokio::test]
    async fn test_no_interactions_is_info() {
        let app = app_with_upstream(test_support::string_mock(
            UpstreamLog::default(),
            serde_json::json!([]),
        ))
        .await;

        let (status, body) = post_network(app, "NOTAPROTEIN").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kind"], "info");
        assert_eq!(body["message"], NO_DATA_MESSAGE);
    }

    #[tokio::test]
    async fn test_malformed_upstream_is_internal_error() {
        let app = app_with_upstream(test_support::string_mock(
            UpstreamLog::default(),
            serde_json::json!([{"preferredName_A": "TP53", "score": 950}]),
        ))
        .await;

        let (status, body) = post_network(app, "TP53").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["kind"], "error");
        assert!(
            body["message"]
                .as_str()
                .unwrap()
                .starts_with("Unexpected error:")
        );
    }

    #[tokio::test]
    async fn test_config_and_health() {
        let app = app_with_upstream(Router::new()).await;

        let response = app
            .clone()
            .oneshot(Request::get("/api/config").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let config: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(config["default_proteins"], "TP53, BRCA1, EGFR");
        assert!(config["api_endpoint"].is_null());

        let response = app
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_static_assets() {
        let app = app_with_upstream(Router::new()).await;

        let response = app
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(Request::get("/app.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .contains("javascript")
        );

        let response = app
            .oneshot(Request::get("/missing.css").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
