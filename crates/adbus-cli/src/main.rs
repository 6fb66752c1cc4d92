//! Driver binary: reads the five-line stdin protocol, runs the Intersector
//! and Knapsack in sequence, and writes the allocation to standard output.
//!
//! Diagnostics go to the log stream (stderr via `tracing`), never stdout —
//! stdout carries only the `outputId,count` allocation lines a caller might
//! pipe elsewhere.

use std::io;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use adbus_core::AdbusError;
use adbus_io::{parse_activity_factors, parse_regions, parse_routes, read_stdin_request};

fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .with_writer(io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("warning: tracing subscriber already set");
    }

    match run() {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            error!("{err:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<()> {
    let start = Instant::now();

    let request =
        read_stdin_request(io::stdin().lock()).context("reading the five-line input protocol")?;
    info!(
        ages = %request.target_ages,
        budget = request.budget,
        "parsed request"
    );

    let active_factors = parse_activity_factors(request.activity_csv_path.as_ref())
        .context("parsing activity-factors CSV")?;
    info!(?active_factors, "parsed activity factors");

    let (mut routes, route_diag) =
        parse_routes(request.routes_path.as_ref()).context("parsing routes file")?;
    info!(routes = route_diag.stats.features, "parsed routes");

    let (regions, region_diag) = parse_regions(
        request.regions_path.as_ref(),
        &request.target_ages,
        active_factors,
    )
    .context("parsing regions file")?;
    info!(regions = region_diag.stats.features, "parsed regions");

    adbus_algo::compute_benefits(&mut routes, &regions);

    let allocation = adbus_algo::allocate(&routes, request.budget);
    if allocation.counts.is_empty() {
        info!("no route is affordable within the given budget; emitting an empty allocation");
    }

    let mut stdout = io::stdout().lock();
    write_allocation(&mut stdout, &allocation)?;

    info!(
        benefit = allocation.benefit,
        routes_purchased = allocation.counts.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "allocation complete"
    );

    Ok(())
}

fn write_allocation(
    out: &mut impl io::Write,
    allocation: &adbus_algo::knapsack::Allocation,
) -> Result<(), AdbusError> {
    use std::io::Write;
    for (id, count) in &allocation.counts {
        writeln!(out, "{id},{count}")?;
    }
    Ok(())
}
