//! Request pipeline: protein list → STRING → graph → figure
//!
//! One call to [`Pipeline::generate`] handles one "Generate Network" action
//! end to end. Nothing is kept between calls.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::chart::{ChartOptions, Figure, visualize_network};
use crate::config::PpiConfig;
use crate::graph::build_ppi_network;
use crate::layout::{LayoutError, LayoutParams};
use crate::string_db::{FetchError, StringClient};

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a list of proteins.";
pub const NO_DATA_MESSAGE: &str = "No PPI data found for the provided protein list.";

/// Failures shown to the user as errors
#[derive(Error, Debug)]
pub enum PipelineError {
    /// STRING answered with a non-200 status
    #[error("Error fetching data: {0}")]
    Upstream(u16),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<FetchError> for PipelineError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Status(code) => PipelineError::Upstream(code),
            other => PipelineError::Unexpected(other.to_string()),
        }
    }
}

impl From<LayoutError> for PipelineError {
    fn from(err: LayoutError) -> Self {
        PipelineError::Unexpected(err.to_string())
    }
}

/// Size of the rendered network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkStats {
    pub nodes: usize,
    pub edges: usize,
}

/// Successful outcomes of a request
#[derive(Debug)]
pub enum Outcome {
    Rendered { figure: Figure, stats: NetworkStats },
    /// No protein names were entered; nothing was fetched
    EmptyInput,
    /// STRING returned no interactions at the configured threshold
    NoData,
}

impl Outcome {
    /// Informational message for outcomes that render nothing
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Outcome::Rendered { .. } => None,
            Outcome::EmptyInput => Some(EMPTY_INPUT_MESSAGE),
            Outcome::NoData => Some(NO_DATA_MESSAGE),
        }
    }
}

/// Split comma-separated input into trimmed, non-empty protein names
pub fn parse_protein_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Everything a request needs, fixed at startup
#[derive(Debug, Clone)]
pub struct Pipeline {
    client: StringClient,
    layout: LayoutParams,
    chart: ChartOptions,
}

impl Pipeline {
    pub fn new(client: StringClient, layout: LayoutParams, chart: ChartOptions) -> Self {
        Self {
            client,
            layout,
            chart,
        }
    }

    pub fn from_config(config: &PpiConfig) -> Result<Self, FetchError> {
        let db = &config.string_db;
        let client = StringClient::new(
            db.base_url.clone(),
            db.species,
            db.required_score,
            db.timeout(),
        )?;
        Ok(Self::new(
            client,
            config.layout.params(),
            config.chart.options(),
        ))
    }

    /// Run one request for the raw text typed by the user
    pub async fn generate(&self, input: &str) -> Result<Outcome, PipelineError> {
        let proteins = parse_protein_list(input);
        if proteins.is_empty() {
            return Ok(Outcome::EmptyInput);
        }

        info!(proteins = ?proteins, "fetching interactions");
        let interactions = self.client.fetch_interactions(&proteins).await?;
        if interactions.is_empty() {
            info!("no interactions returned");
            return Ok(Outcome::NoData);
        }

        let graph = build_ppi_network(&interactions);
        let stats = NetworkStats {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
        };

        let (layout, chart) = (self.layout, self.chart);
        let figure =
            tokio::task::spawn_blocking(move || visualize_network(&graph, &layout, &chart))
                .await
                .map_err(|e| {
                    warn!(error = %e, "layout task failed");
                    PipelineError::Unexpected(e.to_string())
                })??;

        info!(nodes = stats.nodes, edges = stats.edges, "network rendered");
        Ok(Outcome::Rendered { figure, stats })
    }
}
