//! Configuration file for the distance engine.
//!
//! Settings are read from `~/.capdist/config.ini` (or an explicit path) and
//! overlaid on defaults; a missing file yields defaults. Each `[section]`
//! maps to one settings struct:
//!
//! ```ini
//! [cache]
//! enabled = true
//! max_entries = 200
//! ttl_secs = 600
//!
//! [request]
//! max_codes = 250
//!
//! [scheduler]
//! max_concurrency = 0
//! channel_capacity = 64
//!
//! [data]
//! points_file = ~/capitals.json
//!
//! [logging]
//! directory = logs
//! file = capdist.log
//! ```

mod defaults;
mod file;
mod parser;
mod settings;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    CacheSettings, ConfigFile, DataSettings, LoggingSettings, RequestSettings, SchedulerSettings,
};
