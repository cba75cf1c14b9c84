//! Force-directed layout
//!
//! Wraps the `force_graph` physics simulation. Vertices start at positions
//! drawn from a fixed-seed RNG, the simulation runs a fixed number of steps,
//! and the result is centered and rescaled into `[-1, 1]`. No wall-clock or
//! thread-local randomness is involved, so one graph always yields one layout.

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::debug;

use crate::graph::InteractionGraph;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_ITERATIONS: usize = 300;

/// Simulation step, in seconds of simulated time
const TIME_STEP: f32 = 0.035;

/// Half-width of the square initial positions are drawn from
const INITIAL_SPREAD: f32 = 100.0;

const NODE_MASS: f32 = 10.0;

/// Errors raised by the layout simulation
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Layout diverged: vertex '{0}' has no finite position")]
    Diverged(String),
}

/// A 2-D coordinate
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Simulation settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub seed: u64,
    pub iterations: usize,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// Vertex positions, indexed like [`InteractionGraph::nodes`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    positions: Vec<Position>,
}

impl Layout {
    pub fn position(&self, idx: usize) -> Option<Position> {
        self.positions.get(idx).copied()
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

fn simulation_parameters() -> SimulationParameters {
    SimulationParameters {
        force_charge: 150.0,
        force_spring: 0.05,
        force_max: 100.0,
        node_speed: 3000.0,
        damping_factor: 0.9,
    }
}

/// Compute a spring layout for `graph`
pub fn spring_layout(
    graph: &InteractionGraph,
    params: &LayoutParams,
) -> Result<Layout, LayoutError> {
    let n = graph.node_count();
    match n {
        0 => return Ok(Layout::default()),
        1 => {
            return Ok(Layout {
                positions: vec![Position::default()],
            });
        }
        _ => {}
    }

    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut simulation: ForceGraph<usize, ()> = ForceGraph::new(simulation_parameters());

    let handles: Vec<_> = (0..n)
        .map(|idx| {
            simulation.add_node(NodeData {
                x: rng.gen_range(-INITIAL_SPREAD..INITIAL_SPREAD),
                y: rng.gen_range(-INITIAL_SPREAD..INITIAL_SPREAD),
                mass: NODE_MASS,
                is_anchor: false,
                user_data: idx,
            })
        })
        .collect();

    // A spring from a vertex to itself has zero length and no direction.
    for edge in graph.edges().iter().filter(|e| !e.is_self_loop()) {
        simulation.add_edge(
            handles[edge.source],
            handles[edge.target],
            EdgeData::default(),
        );
    }

    for _ in 0..params.iterations {
        simulation.update(TIME_STEP);
    }

    let mut raw = vec![Position::default(); n];
    simulation.visit_nodes(|node| {
        raw[node.data.user_data] = Position {
            x: node.x() as f64,
            y: node.y() as f64,
        };
    });

    if let Some(idx) = raw.iter().position(|p| !p.x.is_finite() || !p.y.is_finite()) {
        let name = graph.node_name(idx).unwrap_or_default().to_string();
        return Err(LayoutError::Diverged(name));
    }

    debug!(
        nodes = n,
        edges = graph.edge_count(),
        iterations = params.iterations,
        "layout settled"
    );

    Ok(Layout {
        positions: rescale(raw),
    })
}

/// Center on the origin and scale so the largest coordinate magnitude is 1
fn rescale(mut positions: Vec<Position>) -> Vec<Position> {
    let n = positions.len() as f64;
    let mean_x = positions.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = positions.iter().map(|p| p.y).sum::<f64>() / n;

    let mut extent: f64 = 0.0;
    for p in &mut positions {
        p.x -= mean_x;
        p.y -= mean_y;
        extent = extent.max(p.x.abs()).max(p.y.abs());
    }

    if extent > 0.0 {
        for p in &mut positions {
            p.x /= extent;
            p.y /= extent;
        }
    }
    positions
}
