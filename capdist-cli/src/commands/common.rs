//! Common types and utilities shared across CLI commands.

use capdist::service::DistanceResult;
use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, Write};

use crate::error::CliError;

/// Output format for results.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `{pairs, count, unit}` JSON document
    #[default]
    Json,
    /// Aligned text table
    Table,
}

/// Write one value as a single JSON line to stdout.
pub fn print_json_line<T: Serialize>(value: &T) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout).map_err(|e| CliError::Output(e.to_string()))
}

/// Write a value as pretty-printed JSON to stdout.
pub fn print_json_pretty<T: Serialize>(value: &T) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout).map_err(|e| CliError::Output(e.to_string()))
}

/// Render pairs as a text table, one pair per line.
pub fn format_table(result: &DistanceResult) -> String {
    let mut out = format!("{:<4} {:<4} {:>10}\n", "A", "B", result.unit.to_uppercase());
    for pair in &result.pairs {
        out.push_str(&format!(
            "{:<4} {:<4} {:>10.1}\n",
            pair.first,
            pair.second,
            pair.rounded_km()
        ));
    }
    out.push_str(&format!("{} pairs\n", result.count));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use capdist::pairs::Pair;

    #[test]
    fn test_format_table() {
        let result = DistanceResult::from_sorted(vec![
            Pair::new("CA", "US", 734.21),
            Pair::new("US", "MX", 3034.04),
        ]);

        let table = format_table(&result);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("KM"));
        assert!(lines[1].starts_with("CA   US"));
        assert!(lines[1].ends_with("734.2"));
        assert!(lines[2].ends_with("3034.0"));
        assert_eq!(lines[3], "2 pairs");
    }
}
