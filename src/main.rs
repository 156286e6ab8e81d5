use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use railpath::{
    config::Args,
    graph::build_graph,
    search::Search,
    timetable::Timetable,
    travel::{travels, write_travels},
};

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("Invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let started = Instant::now();
    let timetable = Timetable::load(&args.data_dir)
        .with_context(|| format!("Failed to load timetable from {:?}", args.data_dir))?;
    info!(elapsed = ?started.elapsed(), "Timetable loaded");

    let started = Instant::now();
    let graph = build_graph(&timetable.trains, &timetable.stops, &timetable.stations)
        .context("Failed to build graph")?;
    info!(elapsed = ?started.elapsed(), "Graph built");

    if let Some(path) = &args.travels_out {
        let travels = travels(&timetable.trains, &timetable.stops, &timetable.stations)
            .context("Failed to derive travels")?;
        write_travels(path, &travels).context("Failed to export travels")?;
    }

    let started = Instant::now();
    let route = Search::new(&graph)
        .with_cost(args.cost_model())
        .run(&args.from, &args.to)?;
    info!(elapsed = ?started.elapsed(), "Search finished");

    if route.is_empty() {
        println!("No route from {} to {}", args.from, args.to);
    }
    for station in route.stations(&graph) {
        println!("{} ({})", station.name, station.id);
    }

    Ok(())
}
