pub mod commands;
pub mod output;
pub mod settings;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cladis",
    version,
    about = "Inspect and query a species-identification model's taxonomy",
    long_about = "Cladis builds a nested-set index over a model's taxonomy table, answers \
                  ancestor/descendant questions in constant time and restricts model score \
                  vectors to a clade."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Taxonomy CSV (taxon_id, parent_taxon_id, name, rank, leaf_class_id)
    #[arg(long, global = true, value_name = "CSV")]
    pub taxonomy: Option<PathBuf>,

    /// Threshold CSV (taxon_id, thres)
    #[arg(long, global = true, value_name = "CSV")]
    pub thresholds: Option<PathBuf>,

    /// Config file (defaults to $CLADIS_HOME/config.toml when present)
    #[arg(long, global = true, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the index and print a summary
    Check(commands::check::CheckArgs),

    /// Show one taxon: bounds, leaf class, threshold, lineage and children
    Info(commands::info::InfoArgs),

    /// Print the taxonomy as a tree
    Tree(commands::tree::TreeArgs),

    /// Restrict a score vector to a clade
    Filter(commands::filter::FilterArgs),
}
