//! Synchronous distance computation.

use clap::Args;
use std::path::Path;
use tracing::info;

use super::common::{format_table, print_json_pretty, OutputFormat};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the distances command.
#[derive(Debug, Args)]
pub struct DistancesArgs {
    /// Location codes (at least two, e.g. US CA MX)
    #[arg(required = true, num_args = 2..)]
    pub codes: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Run the distances command.
pub fn run(config_path: Option<&Path>, args: DistancesArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(config_path)?;
    runner.log_startup("distances");
    let service = runner.create_service()?;

    let result = runner.block_on(service.compute(args.codes.as_slice()))?;
    info!(pairs = result.count, "Distances computed");

    match args.format {
        OutputFormat::Json => print_json_pretty(result.as_ref()),
        OutputFormat::Table => {
            print!("{}", format_table(&result));
            Ok(())
        }
    }
}
