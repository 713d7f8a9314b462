//! Round trip planning over a city graph whose routes carry a cost, a distance and a travel time.
//!
//! - [graph::closure]: all-pairs shortest values, one matrix per metric
//! - [graph::tsp]: exact cheapest circuit through every city
//! - [graph::mst]: cheapest set of routes connecting every city

pub mod dataset;
mod error;
pub mod graph;
pub mod math;
pub mod render;

pub use error::{Error, Result};
pub use graph::{
    closure::{MetricClosure, MetricMatrix},
    mst::{compute_mst, SpanningTree, TreeEdge},
    tsp::{solve_exact_tsp, Permutations, Tour},
    Graph, Metric, Weights,
};
