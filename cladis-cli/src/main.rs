use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;

use crate::cli::{Cli, Commands};
use cladis_core::{CladisError, LookupError, TaxonomyBuildError};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(exit_code(&e));
    }
}

/// `CLADIS_LOG` wins, then `RUST_LOG`, then `warn`; each `-v` raises the floor
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => std::env::var("CLADIS_LOG")
            .ok()
            .and_then(|level| EnvFilter::try_new(level).ok())
            .or_else(|| EnvFilter::try_from_default_env().ok())
            .unwrap_or_else(|| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(e: &anyhow::Error) -> i32 {
    if let Some(err) = e.downcast_ref::<CladisError>() {
        return match err {
            CladisError::Configuration(_) => 2,
            CladisError::Io(_) => 3,
            CladisError::Parse(_) | CladisError::Serialization(_) => 4,
            CladisError::Build(_) => 5,
            CladisError::Lookup(_) => 6,
            _ => 1,
        };
    }
    if e.downcast_ref::<TaxonomyBuildError>().is_some() {
        return 5;
    }
    if e.downcast_ref::<LookupError>().is_some() {
        return 6;
    }
    1
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = cli::settings::Settings::resolve(&cli)?;

    match cli.command {
        Commands::Check(args) => crate::cli::commands::check::run(args, &settings),
        Commands::Info(args) => crate::cli::commands::info::run(args, &settings),
        Commands::Tree(args) => crate::cli::commands::tree::run(args, &settings),
        Commands::Filter(args) => crate::cli::commands::filter::run(args, &settings),
    }
}
