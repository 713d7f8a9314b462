use serde::Serialize;
use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};
use tracing::debug;

use super::Graph;
use crate::{math::KbnSum, Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TreeEdge {
    pub parent: usize,
    pub child: usize,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanningTree {
    /// In the order vertices joined the tree
    pub edges: Vec<TreeEdge>,
    pub total_cost: f64,
}

/// A vertex waiting to join the tree at the given cost.
///
/// The queue may hold several entries for one vertex, only the cheapest one is used.
#[derive(Debug, PartialEq)]
struct PendingVertex {
    cost: f64,
    vertex: usize,
}

impl Eq for PendingVertex {}

impl PartialOrd for PendingVertex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PendingVertex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

/// Compute the MST over raw edge costs with Prim's algorithm in O(E log(v)) time, growing from `root`.
///
/// Fails with [Error::DisconnectedGraph] if any vertex can't be reached from `root`.
pub fn compute_mst(graph: &Graph, root: usize) -> Result<SpanningTree> {
    graph.check_vertex(root)?;
    let n = graph.vertex_count();

    let mut best_cost = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut in_mst = vec![false; n];
    let mut priority_queue = BinaryHeap::new();

    // Kickstart MST with the root
    best_cost[root] = 0.;
    priority_queue.push(Reverse(PendingVertex {
        cost: 0.,
        vertex: root,
    }));

    let mut edges = Vec::with_capacity(n.saturating_sub(1));
    let mut total_cost = KbnSum::default();
    while let Some(Reverse(PendingVertex { vertex, .. })) = priority_queue.pop() {
        // Superseded by a cheaper entry that was already popped
        if in_mst[vertex] {
            continue;
        }
        in_mst[vertex] = true;
        total_cost.add(best_cost[vertex]);
        if let Some(parent) = parent[vertex] {
            edges.push(TreeEdge {
                parent,
                child: vertex,
                cost: best_cost[vertex],
            });
        }

        for adjacency in graph.adjacency(vertex)? {
            let neighbor = adjacency.neighbor;
            let cost = adjacency.weights.cost;
            if !in_mst[neighbor] && cost < best_cost[neighbor] {
                best_cost[neighbor] = cost;
                parent[neighbor] = Some(vertex);
                priority_queue.push(Reverse(PendingVertex {
                    cost,
                    vertex: neighbor,
                }));
            }
        }
    }

    let unreached = in_mst
        .iter()
        .enumerate()
        .filter(|(_, in_mst)| !**in_mst)
        .map(|(vertex, _)| vertex)
        .collect::<Vec<_>>();
    if !unreached.is_empty() {
        return Err(Error::DisconnectedGraph { unreached });
    }

    let total_cost = total_cost.total();
    debug!("MST has {} edges costing {}", edges.len(), total_cost);
    Ok(SpanningTree { edges, total_cost })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{closure::tests::random_graph, tests::square_with_diagonals};
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    /// Independent MST total via Kruskal's algorithm with a union-find.
    fn kruskal_total_cost(graph: &Graph) -> f64 {
        fn find(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }

        let mut edges = graph.edges().to_vec();
        edges.sort_by(|a, b| a.weights.cost.total_cmp(&b.weights.cost));
        let mut parent = (0..graph.vertex_count()).collect::<Vec<_>>();
        let mut total = 0.;
        for edge in edges {
            let (root_u, root_v) = (find(&mut parent, edge.u), find(&mut parent, edge.v));
            if root_u != root_v {
                parent[root_u] = root_v;
                total += edge.weights.cost;
            }
        }
        total
    }

    #[test]
    fn mst_is_correct_for_square() {
        assert_eq!(
            compute_mst(&square_with_diagonals(), 0),
            Ok(SpanningTree {
                edges: vec![
                    TreeEdge {
                        parent: 0,
                        child: 1,
                        cost: 1.
                    },
                    TreeEdge {
                        parent: 1,
                        child: 2,
                        cost: 2.
                    },
                    TreeEdge {
                        parent: 2,
                        child: 3,
                        cost: 1.
                    },
                ],
                total_cost: 4.,
            })
        );
    }

    #[test]
    fn mst_of_single_vertex_is_empty() {
        let graph = Graph::new(vec!["solo".into()]).unwrap();
        assert_eq!(
            compute_mst(&graph, 0),
            Ok(SpanningTree {
                edges: vec![],
                total_cost: 0.,
            })
        );
    }

    #[test]
    fn mst_uses_cheapest_parallel_edge() {
        let mut graph = Graph::new(vec!["x".into(), "y".into()]).unwrap();
        graph.add_edge(0, 1, 1., 1., 9.).unwrap();
        graph.add_edge(0, 1, 9., 9., 4.).unwrap();
        let tree = compute_mst(&graph, 1).unwrap();
        assert_eq!(
            tree.edges,
            vec![TreeEdge {
                parent: 1,
                child: 0,
                cost: 4.
            }]
        );
    }

    #[test]
    fn mst_reports_disconnected_graph() {
        let mut graph = square_with_diagonals();
        let mut labels = graph.labels().to_vec();
        labels.push("E".into());
        let mut with_isolated = Graph::new(labels).unwrap();
        for edge in graph.edges() {
            let w = edge.weights;
            with_isolated
                .add_edge(edge.u, edge.v, w.distance, w.time, w.cost)
                .unwrap();
        }
        assert_eq!(
            compute_mst(&with_isolated, 0),
            Err(Error::DisconnectedGraph { unreached: vec![4] })
        );

        graph = Graph::new(["a", "b", "c", "d"].map(String::from).to_vec()).unwrap();
        graph.add_edge(0, 1, 1., 1., 1.).unwrap();
        graph.add_edge(2, 3, 1., 1., 1.).unwrap();
        assert_eq!(
            compute_mst(&graph, 3),
            Err(Error::DisconnectedGraph {
                unreached: vec![0, 1]
            })
        );
    }

    #[test]
    fn mst_rejects_invalid_root() {
        assert_eq!(
            compute_mst(&square_with_diagonals(), 9),
            Err(Error::InvalidVertexIndex {
                index: 9,
                vertex_count: 4
            })
        );
    }

    #[test]
    fn prim_matches_kruskal() {
        let mut rng = StdRng::seed_from_u64(1234);
        for _ in 0..50 {
            let n = rng.gen_range(1..30);
            let edge_count = rng.gen_range(0..n * 3);
            let mut graph = random_graph(&mut rng, n, edge_count);
            for v in 1..n {
                let u = rng.gen_range(0..v);
                graph.add_edge(u, v, 1., 1., 200.).unwrap();
            }
            let tree = compute_mst(&graph, rng.gen_range(0..n)).unwrap();
            assert_eq!(tree.edges.len(), n - 1);
            assert_eq!(tree.total_cost, kruskal_total_cost(&graph));
        }
    }
}
