use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::PathBuf,
};

use clap::{ArgAction, Parser, ValueEnum};
use eurotrip::{
    compute_mst, dataset::Dataset, render::Report, solve_exact_tsp, Graph, MetricClosure,
};
use tracing::{info, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Opt {
    /// A path to a JSON dataset of cities and routes, else reads from stdin
    file: Option<PathBuf>,

    /// City the round trip starts and ends at, defaults to the first listed city
    #[arg(long)]
    origin: Option<String>,

    /// City the spanning tree is grown from, defaults to the first listed city
    #[arg(long)]
    mst_root: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Output file path (overwrites old files), else writes to stdout
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Increase log verbosity, may be repeated
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn resolve(graph: &Graph, city: Option<&str>) -> Result<usize, String> {
    match city {
        Some(city) => graph
            .index_of(city)
            .ok_or_else(|| format!("Unknown city: {city}")),
        None => Ok(0),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = Opt::parse();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(match opt.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        })
        .init();

    let dataset = match &opt.file {
        Some(path) => Dataset::from_reader(BufReader::new(File::open(path)?))?,
        None => {
            info!("Reading from stdin");
            Dataset::from_reader(io::stdin().lock())?
        }
    };
    let graph = dataset.to_graph()?;
    let origin = resolve(&graph, opt.origin.as_deref())?;
    let mst_root = resolve(&graph, opt.mst_root.as_deref())?;

    let closure = MetricClosure::compute(&graph);
    let tour = solve_exact_tsp(&closure, origin)?;
    let tree = compute_mst(&graph, mst_root)?;
    let report = Report::new(&graph, &closure, tour, tree);

    let mut out: Box<dyn Write> = match &opt.out {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    match opt.format {
        Format::Text => report.write_text(&mut out)?,
        Format::Json => {
            report.write_json(&mut out)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
