//! Browser UI for ppi-network
//!
//! Serves a single page with a protein input field and a Plotly chart area,
//! plus the JSON API the page calls:
//! - `POST /api/network` runs the pipeline for the typed protein list
//! - `GET /api/config` returns frontend configuration
//! - `GET /api/health` liveness probe

pub mod routes;
pub mod server;

pub use routes::{NetworkRequest, NetworkResponse};
pub use server::{AppState, ServerConfig, app, start_server};
