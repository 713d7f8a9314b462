use thiserror::Error;

use crate::graph::Metric;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Vertex index {index} is out of range for a graph of {vertex_count} vertices")]
    InvalidVertexIndex { index: usize, vertex_count: usize },
    #[error("Edge from vertex {vertex} to itself is not allowed")]
    SelfLoop { vertex: usize },
    #[error("Invalid {metric} weight: {value}")]
    InvalidWeight { metric: Metric, value: f64 },
    /// No finite path exists between the two vertices
    #[error("No path from vertex {from} to vertex {to}")]
    Unreachable { from: usize, to: usize },
    /// Prim's algorithm could not reach these vertices from its root
    #[error("Graph is disconnected, unreached vertices: {unreached:?}")]
    DisconnectedGraph { unreached: Vec<usize> },
    #[error("Degenerate input: {0}")]
    DegenerateInput(&'static str),
}
