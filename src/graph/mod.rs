use std::fmt;

use serde::Serialize;

use crate::{Error, Result};

/// All-pairs shortest values with [Floyd–Warshall](https://en.wikipedia.org/wiki/Floyd%E2%80%93Warshall_algorithm)
pub mod closure;
/// Find the [Minimum Spanning Tree (MST)](https://en.wikipedia.org/wiki/Minimum_spanning_tree)
pub mod mst;
/// Solve the [Traveling Salesman Problem (TSP)](https://en.wikipedia.org/wiki/Travelling_salesman_problem)
pub mod tsp;

/// One of the three independent weight dimensions carried by every edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Cost,
    Distance,
    Time,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Cost, Metric::Distance, Metric::Time];
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Metric::Cost => "cost",
            Metric::Distance => "distance",
            Metric::Time => "time",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weights {
    pub cost: f64,
    pub distance: f64,
    pub time: f64,
}

impl Weights {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Cost => self.cost,
            Metric::Distance => self.distance,
            Metric::Time => self.time,
        }
    }
}

/// An undirected edge as it was added to the graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub u: usize,
    pub v: usize,
    pub weights: Weights,
}

/// An entry in a vertex's incidence list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjacency {
    pub neighbor: usize,
    pub weights: Weights,
}

/// Undirected multigraph over dense vertex indices `0..n`.
///
/// Labels are carried along for display only, the algorithms never look at them.
#[derive(Debug, Clone)]
pub struct Graph {
    labels: Vec<String>,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<Adjacency>>,
}

impl Graph {
    pub fn new(labels: Vec<String>) -> Result<Self> {
        if labels.is_empty() {
            return Err(Error::DegenerateInput("a graph needs at least one vertex"));
        }
        let adjacency = vec![vec![]; labels.len()];
        Ok(Self {
            labels,
            edges: vec![],
            adjacency,
        })
    }

    /// Register an edge in both endpoints' incidence lists.
    ///
    /// Parallel edges are allowed. Nothing is modified if validation fails.
    pub fn add_edge(&mut self, u: usize, v: usize, distance: f64, time: f64, cost: f64) -> Result<()> {
        for index in [u, v] {
            self.check_vertex(index)?;
        }
        if u == v {
            return Err(Error::SelfLoop { vertex: u });
        }
        let weights = Weights {
            cost,
            distance,
            time,
        };
        for metric in Metric::ALL {
            let value = weights.get(metric);
            // Also rejects NaN
            if !(value.is_finite() && value >= 0.) {
                return Err(Error::InvalidWeight { metric, value });
            }
        }

        self.edges.push(Edge { u, v, weights });
        self.adjacency[u].push(Adjacency {
            neighbor: v,
            weights,
        });
        self.adjacency[v].push(Adjacency {
            neighbor: u,
            weights,
        });
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, vertex: usize) -> Option<&str> {
        self.labels.get(vertex).map(String::as_str)
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Incident edges of `vertex` in insertion order.
    pub fn adjacency(&self, vertex: usize) -> Result<&[Adjacency]> {
        self.check_vertex(vertex)?;
        Ok(&self.adjacency[vertex])
    }

    pub(crate) fn check_vertex(&self, index: usize) -> Result<()> {
        if index < self.vertex_count() {
            Ok(())
        } else {
            Err(Error::InvalidVertexIndex {
                index,
                vertex_count: self.vertex_count(),
            })
        }
    }
}
