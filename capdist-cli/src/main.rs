//! capdist CLI - Command-line interface
//!
//! Computes pairwise capital distances with the capdist library.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};
use commands::{cache_demo, countries, distances, stream};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "capdist")]
#[command(version = capdist::VERSION)]
#[command(about = "Great-circle distances between country capitals", long_about = None)]
struct Cli {
    /// Config file (default: ~/.capdist/config.ini)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute all pairwise distances and print them sorted
    Distances(distances::DistancesArgs),
    /// Compute distances, printing progress events as NDJSON
    Stream(stream::StreamArgs),
    /// List the known countries and their capitals
    Countries,
    /// Run the same request repeatedly and show result cache statistics
    CacheDemo(cache_demo::CacheDemoArgs),
}

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Commands::Distances(args) => distances::run(config_path, args),
        Commands::Stream(args) => stream::run(config_path, args),
        Commands::Countries => countries::run(config_path),
        Commands::CacheDemo(args) => cache_demo::run(config_path, args),
    };

    if let Err(e) = result {
        e.exit();
    }
}
