//! Streaming distance computation.
//!
//! Prints one JSON object per line: `{done, total, latest?}` for each
//! progress step, then either the full result or `{error}`. With
//! `--progress`, a readable speed and ETA line goes to stderr as well.

use capdist::stream::SessionEvent;
use clap::Args;
use std::path::Path;

use super::common::print_json_line;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the stream command.
#[derive(Debug, Args)]
pub struct StreamArgs {
    /// Location codes (at least two)
    #[arg(required = true, num_args = 2..)]
    pub codes: Vec<String>,

    /// Also print progress with speed and ETA to stderr
    #[arg(long)]
    pub progress: bool,
}

/// Run the stream command.
pub fn run(config_path: Option<&Path>, args: StreamArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(config_path)?;
    runner.log_startup("stream");
    let service = runner.create_service()?;

    runner.block_on(async {
        let mut session = service.stream(args.codes.as_slice())?;

        while let Some(event) = session.next().await {
            // A failed write drops the session, which cancels the computation
            print_json_line(&event)?;
            if args.progress {
                if let SessionEvent::Progress(progress) = &event {
                    eprintln!("{progress}");
                }
            }
            if let SessionEvent::Failed(payload) = event {
                return Err(CliError::SessionFailed(payload.error));
            }
        }
        Ok(())
    })
}
