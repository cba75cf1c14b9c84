//! # ppi-network - Protein Interaction Network Explorer
//!
//! Looks up protein-protein interactions in the STRING database and renders
//! them as an interactive force-directed network in the browser.
//!
//! ## Overview
//!
//! A request flows through three stages:
//!
//! 1. **Fetch** - one query to STRING's `json/network` endpoint for the given
//!    proteins (human, combined score >= 900 by default)
//! 2. **Build** - interactions are folded into an undirected graph keyed by
//!    protein name, weighted by score
//! 3. **Render** - a seeded force-directed layout positions the vertices and a
//!    Plotly figure (edge trace + node trace) is produced
//!
//! ## Usage
//!
//! ```bash
//! # Start the web UI on http://localhost:3000
//! ppi-network
//!
//! # Write the figure JSON for a protein list
//! ppi-network --proteins "TP53, BRCA1, EGFR" -o network.json
//! ```

pub mod chart;
pub mod config;
pub mod graph;
pub mod layout;
pub mod pipeline;
pub mod string_db;
pub mod web;

#[cfg(test)]
mod test_support;

pub use chart::{ChartOptions, Figure, NodeColoring, render_figure, visualize_network};
pub use config::{ConfigError, PpiConfig, load_config, load_config_file};
pub use graph::{Edge, InteractionGraph, build_ppi_network};
pub use layout::{Layout, LayoutError, LayoutParams, Position, spring_layout};
pub use pipeline::{NetworkStats, Outcome, Pipeline, PipelineError, parse_protein_list};
pub use string_db::{FetchError, Interaction, StringClient};
