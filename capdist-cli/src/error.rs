//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use capdist::config::ConfigFileError;
use capdist::geo::DatasetError;
use capdist::logging::LoggingError;
use capdist::request::InputError;
use capdist::service::ServiceError;
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(LoggingError),
    /// Configuration error
    Config(ConfigFileError),
    /// Failed to load the point dataset
    Dataset(DatasetError),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// Request rejected or computation failed
    Request(ServiceError),
    /// A streaming session ended with a failure event
    SessionFailed(String),
    /// Failed to write output
    Output(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Request(ServiceError::Input(InputError::UnknownCodes(_))) => {
                eprintln!();
                eprintln!("Run `capdist countries` to list the known codes.");
            }
            CliError::Config(_) => {
                eprintln!();
                eprintln!(
                    "Check the file at {} or pass another with --config.",
                    capdist::config::config_file_path().display()
                );
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(e) => write!(f, "Failed to initialize logging: {}", e),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Dataset(e) => write!(f, "Failed to load locations: {}", e),
            CliError::Runtime(e) => write!(f, "Failed to start runtime: {}", e),
            CliError::Request(e) => write!(f, "{}", e),
            CliError::SessionFailed(msg) => write!(f, "Computation failed: {}", msg),
            CliError::Output(msg) => write!(f, "Failed to write output: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::LoggingInit(e) => Some(e),
            CliError::Config(e) => Some(e),
            CliError::Dataset(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::Request(e) => Some(e),
            CliError::SessionFailed(_) | CliError::Output(_) => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<DatasetError> for CliError {
    fn from(e: DatasetError) -> Self {
        CliError::Dataset(e)
    }
}

impl From<ServiceError> for CliError {
    fn from(e: ServiceError) -> Self {
        CliError::Request(e)
    }
}

impl From<InputError> for CliError {
    fn from(e: InputError) -> Self {
        CliError::Request(ServiceError::Input(e))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_message_passes_through() {
        let err = CliError::from(InputError::UnknownCodes(vec!["ZZ".to_string()]));
        assert_eq!(err.to_string(), "Unknown country code(s): ZZ");
    }

    #[test]
    fn test_output_error_has_no_source() {
        use std::error::Error;
        let err = CliError::Output("broken pipe".to_string());
        assert!(err.source().is_none());
        assert!(err.to_string().contains("broken pipe"));
    }
}
