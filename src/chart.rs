//! Plotly figure description
//!
//! Converts a laid-out [`InteractionGraph`] into a JSON-serializable figure
//! that Plotly.js renders directly with `Plotly.newPlot(el, data, layout)`.
//!
//! Edges become a single `lines` trace: each edge contributes its two
//! endpoints followed by a `null` gap so the line primitive breaks between
//! unrelated edges. Vertices become a `markers+text` trace labelled with the
//! protein names.

use serde::{Deserialize, Serialize};

use crate::graph::InteractionGraph;
use crate::layout::{self, Layout, LayoutError, LayoutParams};

/// Gap marker separating consecutive edge segments (serialized as `null`)
pub const SEGMENT_BREAK: Option<f64> = None;

pub const DEFAULT_NODE_SIZE: f64 = 15.0;

const COLOR_SCALE: &str = "YlGnBu";
const SLIDER_STEPS: usize = 5;

/// How node marker colors are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeColoring {
    /// Color value is the number of connections of the vertex
    #[default]
    Degree,
    /// Every vertex gets color value 0
    Placeholder,
}

/// Node styling options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartOptions {
    pub node_size: f64,
    pub node_color: NodeColoring,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            node_size: DEFAULT_NODE_SIZE,
            node_color: NodeColoring::default(),
        }
    }
}

/// Complete figure: traces plus layout
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: FigureLayout,
}

impl Figure {
    pub fn edge_trace(&self) -> Option<&EdgeTrace> {
        self.data.iter().find_map(|t| match t {
            Trace::Edges(edges) => Some(edges),
            Trace::Nodes(_) => None,
        })
    }

    pub fn node_trace(&self) -> Option<&NodeTrace> {
        self.data.iter().find_map(|t| match t {
            Trace::Nodes(nodes) => Some(nodes),
            Trace::Edges(_) => None,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Trace {
    Edges(EdgeTrace),
    Nodes(NodeTrace),
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeTrace {
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
    pub line: Line,
    pub hoverinfo: &'static str,
    pub mode: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Line {
    pub width: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeTrace {
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub mode: &'static str,
    pub text: Vec<String>,
    pub hoverinfo: &'static str,
    pub marker: Marker,
    pub name: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub showscale: bool,
    pub colorscale: &'static str,
    pub size: Vec<f64>,
    pub color: Vec<f64>,
    pub colorbar: ColorBar,
    pub line: MarkerLine,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorBar {
    pub thickness: f64,
    pub title: ColorBarTitle,
    pub xanchor: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorBarTitle {
    pub text: &'static str,
    pub side: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkerLine {
    pub width: f64,
}

/// Figure-level layout configuration
#[derive(Debug, Clone, Serialize)]
pub struct FigureLayout {
    pub showlegend: bool,
    pub hovermode: &'static str,
    pub margin: Margin,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub paper_bgcolor: &'static str,
    pub plot_bgcolor: &'static str,
    pub updatemenus: Vec<serde_json::Value>,
    pub sliders: Vec<Slider>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Margin {
    pub b: u32,
    pub l: u32,
    pub r: u32,
    pub t: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub showgrid: bool,
    pub zeroline: bool,
}

/// Animation slider
///
/// The steps reference no frames, so moving the slider changes nothing.
#[derive(Debug, Clone, Serialize)]
pub struct Slider {
    pub active: usize,
    pub steps: Vec<SliderStep>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SliderStep {
    pub label: String,
    pub method: &'static str,
    pub args: serde_json::Value,
}

fn edge_trace(graph: &InteractionGraph, layout: &Layout) -> EdgeTrace {
    let mut x = Vec::with_capacity(graph.edge_count() * 3);
    let mut y = Vec::with_capacity(graph.edge_count() * 3);

    for edge in graph.edges() {
        let p0 = layout.position(edge.source).unwrap_or_default();
        let p1 = layout.position(edge.target).unwrap_or_default();
        x.extend([Some(p0.x), Some(p1.x), SEGMENT_BREAK]);
        y.extend([Some(p0.y), Some(p1.y), SEGMENT_BREAK]);
    }

    EdgeTrace {
        trace_type: "scatter",
        x,
        y,
        line: Line {
            width: 0.5,
            color: "#888",
        },
        hoverinfo: "none",
        mode: "lines",
        name: "Edges",
    }
}

fn node_trace(graph: &InteractionGraph, layout: &Layout, options: &ChartOptions) -> NodeTrace {
    let (x, y): (Vec<f64>, Vec<f64>) = (0..graph.node_count())
        .map(|idx| {
            let p = layout.position(idx).unwrap_or_default();
            (p.x, p.y)
        })
        .unzip();

    let color = match options.node_color {
        NodeColoring::Degree => graph.degrees().into_iter().map(|d| d as f64).collect(),
        NodeColoring::Placeholder => vec![0.0; graph.node_count()],
    };

    NodeTrace {
        trace_type: "scatter",
        x,
        y,
        mode: "markers+text",
        text: graph.nodes().to_vec(),
        hoverinfo: "text",
        marker: Marker {
            showscale: true,
            colorscale: COLOR_SCALE,
            size: vec![options.node_size; graph.node_count()],
            color,
            colorbar: ColorBar {
                thickness: 15.0,
                title: ColorBarTitle {
                    text: "Node Connections",
                    side: "right",
                },
                xanchor: "left",
            },
            line: MarkerLine { width: 2.0 },
        },
        name: "Nodes",
    }
}

fn figure_layout() -> FigureLayout {
    let steps = (1..=SLIDER_STEPS)
        .map(|i| SliderStep {
            label: i.to_string(),
            method: "animate",
            args: serde_json::json!([
                [null],
                {"frame": {"duration": 500, "redraw": true}, "mode": "immediate"}
            ]),
        })
        .collect();

    FigureLayout {
        showlegend: false,
        hovermode: "closest",
        margin: Margin {
            b: 0,
            l: 0,
            r: 0,
            t: 40,
        },
        xaxis: Axis {
            showgrid: true,
            zeroline: false,
        },
        yaxis: Axis {
            showgrid: true,
            zeroline: false,
        },
        paper_bgcolor: "rgb(245, 245, 245)",
        plot_bgcolor: "rgb(255, 255, 255)",
        updatemenus: Vec::new(),
        sliders: vec![Slider { active: 0, steps }],
    }
}

/// Build the figure for an already laid-out graph
pub fn render_figure(graph: &InteractionGraph, layout: &Layout, options: &ChartOptions) -> Figure {
    Figure {
        data: vec![
            Trace::Edges(edge_trace(graph, layout)),
            Trace::Nodes(node_trace(graph, layout, options)),
        ],
        layout: figure_layout(),
    }
}

/// Lay out `graph` and build its figure
pub fn visualize_network(
    graph: &InteractionGraph,
    params: &LayoutParams,
    options: &ChartOptions,
) -> Result<Figure, LayoutError> {
    let layout = layout::spring_layout(graph, params)?;
    Ok(render_figure(graph, &layout, options))
}
