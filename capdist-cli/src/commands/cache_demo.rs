//! Result cache demonstration.

use clap::Args;
use std::path::Path;
use std::time::Instant;
use tracing::info;

use super::common::print_json_pretty;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the cache-demo command.
#[derive(Debug, Args)]
pub struct CacheDemoArgs {
    /// Location codes (at least two)
    #[arg(required = true, num_args = 2..)]
    pub codes: Vec<String>,

    /// How many times to issue the request
    #[arg(long, default_value_t = 3)]
    pub repeat: usize,
}

/// Run the cache-demo command.
pub fn run(config_path: Option<&Path>, args: CacheDemoArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(config_path)?;
    runner.log_startup("cache-demo");
    let service = runner.create_service()?;

    for attempt in 1..=args.repeat.max(1) {
        let started = Instant::now();
        let result = runner.block_on(service.compute(args.codes.as_slice()))?;
        let elapsed = started.elapsed();

        info!(
            attempt,
            pairs = result.count,
            elapsed_us = elapsed.as_micros() as u64,
            "Request served"
        );
        println!(
            "Request {}: {} pairs in {:.3} ms",
            attempt,
            result.count,
            elapsed.as_secs_f64() * 1000.0
        );
    }

    println!();
    println!("Cache statistics:");
    print_json_pretty(&service.cache_stats())
}
