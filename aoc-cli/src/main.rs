//! AOC CLI - run Advent of Code solvers against local puzzle inputs

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod logger;
mod output;
mod store;

// Link the 2024 solutions so their plugins are registered
use aoc_2024 as _;

use aoc_solver::SolverRegistryBuilder;
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::Executor;
use output::{OutputFormatter, Summary};

fn main() {
    let config = Config::from(Args::parse());
    logger::init_cli_logger(config.verbose);

    if let Err(e) = run(config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<(), CliError> {
    tracing::debug!(?config, "resolved configuration");

    let registry = build_registry(&config.tags)?;
    let executor =
        Executor::new(registry, &config).map_err(|e| CliError::Config(e.to_string()))?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    let store = executor.store();
    for work in work_items.iter().filter(|w| !store.contains(w.year, w.day)) {
        tracing::warn!(
            path = %store.input_path(work.year, work.day).display(),
            "missing input for {}/{:02}",
            work.year,
            work.day
        );
    }

    let summary = run_executor(executor, &work_items, config.quiet)?;
    if summary.is_success() {
        Ok(())
    } else {
        Err(CliError::Unsuccessful {
            failed: summary.failed,
            mismatched: summary.mismatched,
        })
    }
}

/// Run the executor, printing results in order as they become ready
fn run_executor(
    executor: Executor,
    work_items: &[executor::WorkItem],
    quiet: bool,
) -> Result<Summary, CliError> {
    tracing::info!("running {} solver(s)", work_items.len());

    let expected_keys: Vec<aggregator::ResultKey> = work_items
        .iter()
        .flat_map(|w| {
            w.parts.clone().map(move |p| aggregator::ResultKey {
                year: w.year,
                day: w.day,
                part: p,
            })
        })
        .collect();

    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = aggregator::ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }

    if !aggregator.is_complete() {
        tracing::warn!("not all expected results were received");
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))?
        .map_err(CliError::Executor)?;

    formatter.print_summary(&results);
    Ok(Summary::from_results(&results))
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    let registry = builder.build();
    tracing::debug!(solvers = registry.storage().len(), "registry built");
    Ok(registry)
}
