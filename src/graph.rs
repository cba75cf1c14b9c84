//! Interaction graph
//!
//! An undirected, simple graph whose vertices are protein names and whose
//! edges carry the STRING combined score as weight. Vertices and edges keep
//! their first-insertion order so that layout and chart output are stable for
//! identical input.

use std::collections::HashMap;

use crate::string_db::Interaction;

/// An undirected edge between two vertex indices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

impl Edge {
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Protein interaction network
#[derive(Debug, Clone, Default)]
pub struct InteractionGraph {
    nodes: Vec<String>,
    node_index: HashMap<String, usize>,
    edges: Vec<Edge>,
    /// (min index, max index) -> position in `edges`
    edge_index: HashMap<(usize, usize), usize>,
}

fn pair_key(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

impl InteractionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex if it is not present yet and return its index
    pub fn add_node(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.node_index.get(name) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(name.to_string());
        self.node_index.insert(name.to_string(), idx);
        idx
    }

    /// Add an edge, or overwrite the weight of an existing one
    ///
    /// `(a, b)` and `(b, a)` name the same edge; the last weight written wins.
    pub fn add_edge(&mut self, a: &str, b: &str, weight: f64) {
        let source = self.add_node(a);
        let target = self.add_node(b);
        let key = pair_key(source, target);

        match self.edge_index.get(&key) {
            Some(&pos) => self.edges[pos].weight = weight,
            None => {
                self.edge_index.insert(key, self.edges.len());
                self.edges.push(Edge {
                    source,
                    target,
                    weight,
                });
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Vertex names in insertion order
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_name(&self, idx: usize) -> Option<&str> {
        self.nodes.get(idx).map(String::as_str)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.node_index.get(name).copied()
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.node_index.contains_key(name)
    }

    /// Weight of the edge between `a` and `b`, in either orientation
    pub fn weight(&self, a: &str, b: &str) -> Option<f64> {
        let key = pair_key(self.index_of(a)?, self.index_of(b)?);
        self.edge_index.get(&key).map(|&pos| self.edges[pos].weight)
    }

    /// Indices of the vertices adjacent to `idx`
    pub fn neighbors(&self, idx: usize) -> Vec<usize> {
        self.edges
            .iter()
            .filter_map(|e| {
                if e.source == idx {
                    Some(e.target)
                } else if e.target == idx {
                    Some(e.source)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Degree of every vertex, indexed like [`nodes`](Self::nodes)
    ///
    /// A self-loop contributes 2 to its vertex.
    pub fn degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.nodes.len()];
        for edge in &self.edges {
            degrees[edge.source] += 1;
            degrees[edge.target] += 1;
        }
        degrees
    }
}

/// Fold interaction records into a graph
pub fn build_ppi_network(interactions: &[Interaction]) -> InteractionGraph {
    let mut graph = InteractionGraph::new();
    for interaction in interactions {
        graph.add_edge(
            &interaction.protein_a,
            &interaction.protein_b,
            interaction.score,
        );
    }
    graph
}
