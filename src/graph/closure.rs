use ndarray::{prelude::*, Zip};
use tracing::debug;

use super::{Graph, Metric};
use crate::{Error, Result};

/// Sentinel for a pair of vertices with no path between them.
///
/// Larger than any finite sum of finite weights.
pub const UNREACHABLE: f64 = f64::INFINITY;

/// Square table of shortest values for a single [Metric].
#[derive(Debug, Clone, PartialEq)]
pub struct MetricMatrix {
    metric: Metric,
    values: Array2<f64>,
}

impl MetricMatrix {
    /// Matrix of direct edges only.
    ///
    /// For parallel edges, the smallest weight of this metric wins.
    pub fn direct(graph: &Graph, metric: Metric) -> Self {
        let n = graph.vertex_count();
        let mut values = Array2::from_elem((n, n), UNREACHABLE);
        values.diag_mut().fill(0.);
        for edge in graph.edges() {
            let weight = edge.weights.get(metric);
            for (i, j) in [(edge.u, edge.v), (edge.v, edge.u)] {
                let entry = &mut values[[i, j]];
                *entry = entry.min(weight);
            }
        }
        Self { metric, values }
    }

    /// Relax every pair through each intermediate vertex in increasing index order.
    ///
    /// Row and column `k` can't change while relaxing through `k` since the diagonal
    /// stays at zero, so they are copied out and the sweep over `(i, j)` runs in parallel.
    pub fn closed(&self) -> Self {
        let mut values = self.values.clone();
        for k in 0..values.nrows() {
            let to_k = values.column(k).to_owned();
            let from_k = values.row(k).to_owned();
            Zip::indexed(&mut values).par_for_each(|(i, j), value| {
                let (first, second) = (to_k[i], from_k[j]);
                if first.is_finite() && second.is_finite() {
                    *value = value.min(first + second);
                }
            });
        }
        Self {
            metric: self.metric,
            values,
        }
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Number of vertices.
    pub fn dim(&self) -> usize {
        self.values.nrows()
    }

    pub fn view(&self) -> ArrayView2<f64> {
        self.values.view()
    }

    pub fn is_reachable(&self, from: usize, to: usize) -> bool {
        self.values
            .get([from, to])
            .map_or(false, |value| value.is_finite())
    }

    /// Shortest value from `from` to `to`, or [Error::Unreachable] if there is no path.
    pub fn value(&self, from: usize, to: usize) -> Result<f64> {
        let vertex_count = self.dim();
        if let Some(&index) = [from, to].iter().find(|index| **index >= vertex_count) {
            return Err(Error::InvalidVertexIndex {
                index,
                vertex_count,
            });
        }
        let value = self.values[[from, to]];
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Error::Unreachable { from, to })
        }
    }

    /// First pair in row-major order without a path, if any.
    pub fn first_unreachable(&self) -> Option<(usize, usize)> {
        self.values
            .indexed_iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(pos, _)| pos)
    }
}

/// The three metrics closed independently of one another.
///
/// The cheapest route between two vertices need not be the shortest or the quickest,
/// so entries at the same position may come from different physical paths.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricClosure {
    pub cost: MetricMatrix,
    pub distance: MetricMatrix,
    pub time: MetricMatrix,
}

impl MetricClosure {
    pub fn compute(graph: &Graph) -> Self {
        debug!(
            "Closing metrics over {} vertices and {} edges",
            graph.vertex_count(),
            graph.edges().len()
        );
        let close = |metric| MetricMatrix::direct(graph, metric).closed();
        let (cost, (distance, time)) = rayon::join(
            || close(Metric::Cost),
            || rayon::join(|| close(Metric::Distance), || close(Metric::Time)),
        );
        Self {
            cost,
            distance,
            time,
        }
    }

    pub fn get(&self, metric: Metric) -> &MetricMatrix {
        match metric {
            Metric::Cost => &self.cost,
            Metric::Distance => &self.distance,
            Metric::Time => &self.time,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.cost.dim()
    }
}
