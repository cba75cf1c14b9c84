//! Shared helpers for tests that need a stand-in STRING server

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{Json, Router, extract::Query, routing::get};
use serde_json::Value;
use tokio::net::TcpListener;

/// Records the query strings the mock upstream received
#[derive(Clone, Default)]
pub struct UpstreamLog(Arc<Mutex<Vec<HashMap<String, String>>>>);

impl UpstreamLog {
    pub fn queries(&self) -> Vec<HashMap<String, String>> {
        self.0.lock().unwrap().clone()
    }

    pub fn hits(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

/// Serve `app` on an ephemeral local port and return its base URL
pub async fn spawn_upstream(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A `json/network` endpoint answering every query with `body`
pub fn string_mock(log: UpstreamLog, body: Value) -> Router {
    Router::new().route(
        "/json/network",
        get(move |Query(query): Query<HashMap<String, String>>| {
            let log = log.clone();
            let body = body.clone();
            async move {
                log.0.lock().unwrap().push(query);
                Json(body)
            }
        }),
    )
}

pub fn tp53_brca1_body() -> Value {
    serde_json::json!([
        {"preferredName_A": "TP53", "preferredName_B": "BRCA1", "score": 950}
    ])
}
