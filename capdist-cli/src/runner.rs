//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization, runtime and service
//! creation so command handlers stay small.

use crate::error::CliError;
use capdist::config::ConfigFile;
use capdist::geo::{bundled_capitals, load_points_file, GeoPointStore};
use capdist::logging::{init_from_settings, LoggingGuard};
use capdist::service::{DistanceService, ServiceConfig};
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::info;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Dropped first so shutdown logging still reaches the file
    runtime: Runtime,
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    config: ConfigFile,
}

impl CliRunner {
    /// Load config (from `config_path` or the default location), then
    /// initialize logging and the Tokio runtime.
    pub fn new(config_path: Option<&Path>) -> Result<Self, CliError> {
        let config = match config_path {
            Some(path) => ConfigFile::load_from(path)?,
            None => ConfigFile::load()?,
        };

        let logging_guard = init_from_settings(&config.logging).map_err(CliError::LoggingInit)?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(CliError::Runtime)?;

        Ok(Self {
            runtime,
            logging_guard,
            config,
        })
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("capdist v{}", capdist::VERSION);
        info!("capdist CLI: {} command", command);
    }

    /// Load the configured point dataset, or the bundled capitals.
    pub fn load_store(&self) -> Result<Arc<dyn GeoPointStore>, CliError> {
        let store = match &self.config.data.points_file {
            Some(path) => {
                info!(path = %path.display(), "Loading locations from file");
                load_points_file(path)?
            }
            None => bundled_capitals()?,
        };
        info!(locations = store.len(), "Locations loaded");
        Ok(Arc::new(store))
    }

    /// Create the distance service described by the config file.
    pub fn create_service(&self) -> Result<DistanceService, CliError> {
        let store = self.load_store()?;
        Ok(DistanceService::new(ServiceConfig::from(&self.config), store))
    }

    /// Drive a future to completion on the runner's runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}
