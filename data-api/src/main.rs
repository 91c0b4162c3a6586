//! # Data API CLI Entry Point
//!
//! The main executable for the data clients. This file drives the application lifecycle:
//!
//! 1. **Initialization**: Parses command-line arguments using [`cli::Cli`] and installs the
//!    `tracing` subscriber (`RUST_LOG`, defaults to `warn`).
//! 2. **Configuration**: Merges the configuration file, environment and flags, then validates
//!    the result with `data_api_core`.
//! 3. **Execution**: Issues every accessor of the chosen data type. The id lookups are fed with
//!    ids returned by the zero-argument accessors.
//! 4. **Presentation**: Prints each value, or the reason it could not be fetched. Exits with
//!    status 1 if any accessor failed.
mod cli;
mod formatter;
mod runner;

use clap::Parser;
use cli::{Cli, DataType};
use data_api_core::{Assembly, GenomeAnnotation, Taxon, ValidatedConfig};
use formatter::FormattedString;
use runner::Outcome;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match args.client_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    };

    let config = match data_api_core::validate(config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    };

    let outcomes = run(args.data_type, config).await;

    for outcome in &outcomes {
        println!("{}", FormattedString::from(outcome));
    }

    if outcomes.iter().any(Outcome::is_failure) {
        process::exit(1);
    }
}

async fn run(data_type: DataType, config: ValidatedConfig) -> Vec<Outcome> {
    tracing::info!(?data_type, object_ref = %config.object_ref(), "running all accessors");

    match data_type {
        DataType::Taxon => runner::run_taxon(&Taxon::from_config(config)).await,
        DataType::Assembly => runner::run_assembly(&Assembly::from_config(config)).await,
        DataType::GenomeAnnotation => {
            runner::run_genome_annotation(&GenomeAnnotation::from_config(config)).await
        }
    }
}
