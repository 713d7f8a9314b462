use std::io::Read;

use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::Graph;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed dataset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Route refers to unknown city: {0}")]
    UnknownCity(String),
    #[error("City listed more than once: {0}")]
    DuplicateCity(String),
    #[error(transparent)]
    Graph(#[from] crate::Error),
}

/// A direct connection between two cities, in both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub from: String,
    pub to: String,
    pub distance: f64,
    pub time: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub cities: Vec<String>,
    pub routes: Vec<Route>,
}

impl Dataset {
    pub fn from_reader(reader: impl Read) -> Result<Self, LoadError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Cities become vertices in the order they are listed.
    pub fn to_graph(&self) -> Result<Graph, LoadError> {
        let mut index_by_city: HashMap<&str, usize> = HashMap::default();
        index_by_city.reserve(self.cities.len());
        for (i, city) in self.cities.iter().enumerate() {
            if index_by_city.insert(city.as_str(), i).is_some() {
                return Err(LoadError::DuplicateCity(city.clone()));
            }
        }
        let lookup = |city: &str| {
            index_by_city
                .get(city)
                .copied()
                .ok_or_else(|| LoadError::UnknownCity(city.to_owned()))
        };

        let mut graph = Graph::new(self.cities.clone())?;
        for route in &self.routes {
            graph.add_edge(
                lookup(route.from.as_str())?,
                lookup(route.to.as_str())?,
                route.distance,
                route.time,
                route.cost,
            )?;
        }
        debug!(
            "Loaded {} cities and {} routes",
            graph.vertex_count(),
            graph.edges().len()
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compute_mst, solve_exact_tsp, Error, MetricClosure, TreeEdge};
    use pretty_assertions::assert_eq;

    const EUROTRIP: &str = include_str!("../demos/eurotrip.json");

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "{actual} is not close to {expected}"
        );
    }

    #[test]
    fn eurotrip_dataset_loads() {
        let graph = Dataset::from_reader(EUROTRIP.as_bytes())
            .unwrap()
            .to_graph()
            .unwrap();
        assert_eq!(graph.vertex_count(), 7);
        assert_eq!(graph.edges().len(), 11);
        assert_eq!(graph.label(6), Some("Atenas"));
        assert_eq!(graph.index_of("Sevilha"), Some(3));
    }

    #[test]
    fn eurotrip_plan_is_correct() {
        let graph = Dataset::from_reader(EUROTRIP.as_bytes())
            .unwrap()
            .to_graph()
            .unwrap();
        let closure = MetricClosure::compute(&graph);
        assert_eq!(
            closure.cost.view().row(0).to_vec(),
            vec![0., 5780., 5600., 7037., 7350., 6450., 7510.]
        );

        let tour = solve_exact_tsp(&closure, 0).unwrap();
        assert_eq!(tour.order, vec![0, 1, 3, 4, 6, 5, 2, 0]);
        assert_close(tour.cost, 18122.);
        assert_close(tour.distance, 29525.5);
        assert_close(tour.time, 73.5);

        let tree = compute_mst(&graph, 0).unwrap();
        let edges = tree
            .edges
            .iter()
            .map(|TreeEdge { parent, child, .. }| (*parent, *child))
            .collect::<Vec<_>>();
        assert_eq!(edges, vec![(0, 2), (2, 5), (5, 4), (5, 6), (2, 1), (2, 3)]);
        assert_close(tree.total_cost, 11034.);
    }

    #[test]
    fn unknown_and_duplicate_cities_are_rejected() {
        let dataset = Dataset {
            cities: vec!["a".into(), "b".into()],
            routes: vec![Route {
                from: "a".into(),
                to: "c".into(),
                distance: 1.,
                time: 1.,
                cost: 1.,
            }],
        };
        assert!(matches!(
            dataset.to_graph(),
            Err(LoadError::UnknownCity(city)) if city == "c"
        ));

        let dataset = Dataset {
            cities: vec!["a".into(), "a".into()],
            routes: vec![],
        };
        assert!(matches!(
            dataset.to_graph(),
            Err(LoadError::DuplicateCity(city)) if city == "a"
        ));
    }

    #[test]
    fn graph_errors_pass_through() {
        let dataset = Dataset {
            cities: vec!["a".into(), "b".into()],
            routes: vec![Route {
                from: "a".into(),
                to: "b".into(),
                distance: 1.,
                time: 1.,
                cost: -1.,
            }],
        };
        assert!(matches!(
            dataset.to_graph(),
            Err(LoadError::Graph(Error::InvalidWeight { .. }))
        ));
        assert!(matches!(
            Dataset::from_reader(&b"{\"cities\": 3}"[..]),
            Err(LoadError::Json(_))
        ));
    }
}
