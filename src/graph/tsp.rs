use std::iter;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::closure::{MetricClosure, MetricMatrix};
use crate::{math::KbnSum, Error, Result};

/// Past this many free vertices the enumeration takes minutes.
const MAX_PRACTICAL_FREE_VERTICES: usize = 11;

/// A closed circuit starting and ending at the same vertex.
///
/// `distance` and `time` are sums of the closed distance and time matrices between
/// consecutive stops. Each leg of those sums may follow a different physical path than
/// the cheapest one, so they are not necessarily attainable on a single route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    pub order: Vec<usize>,
    pub cost: f64,
    pub distance: f64,
    pub time: f64,
}

/// Lazy sequence of every permutation of a set of items in lexicographic order.
///
/// Starts at the ascending sort of the items and ends once the descending order has been yielded.
#[derive(Debug, Clone)]
pub struct Permutations<T> {
    next: Option<Vec<T>>,
}

impl<T: Ord + Clone> Permutations<T> {
    pub fn new(mut items: Vec<T>) -> Self {
        items.sort();
        Self { next: Some(items) }
    }
}

impl<T: Ord + Clone> Iterator for Permutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut successor = current.clone();
        if next_permutation(&mut successor) {
            self.next = Some(successor);
        }
        Some(current)
    }
}

/// Rearrange into the lexicographically next greater permutation.
///
/// Returns false, leaving the items untouched, if they are already in descending order.
fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    // Rightmost item that is smaller than its successor
    let Some(pivot) = items.windows(2).rposition(|pair| pair[0] < pair[1]) else {
        return false;
    };
    // Guaranteed to exist, items[pivot + 1] is greater
    let Some(swap) = items.iter().rposition(|item| items[pivot] < *item) else {
        return false;
    };
    items.swap(pivot, swap);
    items[pivot + 1..].reverse();
    true
}

/// Sum a matrix along `origin -> ordering... -> origin`.
fn circuit_sum(matrix: &MetricMatrix, origin: usize, ordering: &[usize]) -> Result<f64> {
    let stops = || iter::once(&origin).chain(ordering).chain(iter::once(&origin));
    stops()
        .zip(stops().skip(1))
        .map(|(from, to)| matrix.value(*from, *to))
        .sum::<Result<KbnSum>>()
        .map(|sum| sum.total())
}

/// Find the cheapest circuit from `origin` through every other vertex by trying every ordering.
///
/// Orderings are scored on the closed cost matrix. On ties, the lexicographically first
/// ordering wins. Takes O((n-1)! n) time, so only use this for small graphs.
pub fn solve_exact_tsp(closure: &MetricClosure, origin: usize) -> Result<Tour> {
    let n = closure.vertex_count();
    if n == 0 {
        return Err(Error::DegenerateInput("cannot route over an empty graph"));
    }
    if origin >= n {
        return Err(Error::DegenerateInput("TSP origin is not a vertex of the graph"));
    }
    // The closure is transitive, so one missing pair means no circuit exists
    if let Some((from, to)) = closure.cost.first_unreachable() {
        return Err(Error::Unreachable { from, to });
    }

    let others = (0..n).filter(|v| *v != origin).collect::<Vec<_>>();
    if others.len() > MAX_PRACTICAL_FREE_VERTICES {
        warn!(
            "Exhaustive search over {} vertices will be very slow",
            others.len()
        );
    }
    match (1..=others.len()).try_fold(1usize, |acc, k| acc.checked_mul(k)) {
        Some(count) => info!("Scoring {} orderings from vertex {}", count, origin),
        None => info!("Scoring {}! orderings from vertex {}", others.len(), origin),
    }

    let mut orderings = Permutations::new(others);
    // Always yields at least one ordering, the empty one when `n == 1`
    let mut ordering = orderings.next().unwrap_or_default();
    let mut cost = circuit_sum(&closure.cost, origin, &ordering)?;
    for candidate in orderings {
        let candidate_cost = circuit_sum(&closure.cost, origin, &candidate)?;
        // Strictly less, so the first ordering found keeps a tie
        if candidate_cost < cost {
            debug!("New best {} via {:?}", candidate_cost, candidate);
            cost = candidate_cost;
            ordering = candidate;
        }
    }

    let distance = circuit_sum(&closure.distance, origin, &ordering)?;
    let time = circuit_sum(&closure.time, origin, &ordering)?;
    let order = iter::once(origin)
        .chain(ordering)
        .chain(iter::once(origin))
        .collect();
    Ok(Tour {
        order,
        cost,
        distance,
        time,
    })
}
