use std::io::{self, Write};

use serde::Serialize;

use crate::{Graph, Metric, MetricClosure, MetricMatrix, SpanningTree, Tour};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixReport {
    pub metric: Metric,
    /// `None` where there is no path
    pub rows: Vec<Vec<Option<f64>>>,
}

impl From<&MetricMatrix> for MatrixReport {
    fn from(matrix: &MetricMatrix) -> Self {
        Self {
            metric: matrix.metric(),
            rows: matrix
                .view()
                .rows()
                .into_iter()
                .map(|row| {
                    row.iter()
                        .map(|value| value.is_finite().then_some(*value))
                        .collect()
                })
                .collect(),
        }
    }
}

/// Everything computed for one dataset, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub cities: Vec<String>,
    pub matrices: Vec<MatrixReport>,
    pub tour: Tour,
    pub tree: SpanningTree,
}

impl Report {
    pub fn new(graph: &Graph, closure: &MetricClosure, tour: Tour, tree: SpanningTree) -> Self {
        Self {
            cities: graph.labels().to_vec(),
            matrices: Metric::ALL
                .iter()
                .map(|metric| closure.get(*metric).into())
                .collect(),
            tour,
            tree,
        }
    }

    pub fn write_json(&self, out: impl Write) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(out, self)
    }

    pub fn write_text(&self, mut out: impl Write) -> io::Result<()> {
        for matrix in &self.matrices {
            self.write_matrix(&mut out, matrix)?;
        }
        self.write_tour(&mut out)?;
        self.write_tree(&mut out)
    }

    /// Tour and tree indices always refer to `cities`, since all three come from the same graph.
    fn city(&self, index: usize) -> &str {
        &self.cities[index]
    }

    fn write_matrix(&self, out: &mut impl Write, matrix: &MatrixReport) -> io::Result<()> {
        let abbreviation = |city: &str| city.chars().take(3).collect::<String>();
        writeln!(out, "{} table", matrix.metric)?;
        write!(out, "     ")?;
        for city in &self.cities {
            write!(out, " {:>8}", abbreviation(city))?;
        }
        writeln!(out)?;
        for (city, row) in self.cities.iter().zip(&matrix.rows) {
            write!(out, "{:<3} |", abbreviation(city))?;
            for value in row {
                match value {
                    Some(value) => write!(out, " {:>8.1}", value)?,
                    None => write!(out, " {:>8}", "-")?,
                }
            }
            writeln!(out)?;
        }
        writeln!(out)
    }

    fn write_tour(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Cheapest round trip")?;
        let last = self.tour.order.len().saturating_sub(1);
        for (step, city) in self.tour.order.iter().enumerate() {
            let note = match step {
                0 => " (departure)",
                _ if step == last => " (arrival)",
                _ => "",
            };
            writeln!(out, "  {}. {}{}", step + 1, self.city(*city), note)?;
        }
        writeln!(out, "  cost:     {:.2}", self.tour.cost)?;
        writeln!(out, "  distance: {:.1}", self.tour.distance)?;
        writeln!(out, "  time:     {:.1}", self.tour.time)?;
        writeln!(out)
    }

    fn write_tree(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Cheapest connecting routes")?;
        for edge in &self.tree.edges {
            writeln!(
                out,
                "  {:<10} --- {} ({:.2})",
                self.city(edge.parent),
                self.city(edge.child),
                edge.cost
            )?;
        }
        writeln!(out, "  total cost: {:.2}", self.tree.total_cost)
    }
}
