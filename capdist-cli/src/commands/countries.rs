//! List known locations.

use std::path::Path;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the countries command.
pub fn run(config_path: Option<&Path>) -> Result<(), CliError> {
    let runner = CliRunner::new(config_path)?;
    runner.log_startup("countries");
    let store = runner.load_store()?;

    let mut points = store.points();
    points.sort_by(|a, b| a.code.cmp(&b.code));

    for point in &points {
        println!(
            "{:<4} {:<28} {:<20} {:>9.4} {:>10.4}",
            point.code, point.name, point.label, point.latitude, point.longitude
        );
    }
    println!("{} locations", points.len());
    Ok(())
}
