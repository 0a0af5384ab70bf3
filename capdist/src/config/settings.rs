//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing logic.

use std::path::PathBuf;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub cache: CacheSettings,
    pub request: RequestSettings,
    pub scheduler: SchedulerSettings,
    pub data: DataSettings,
    pub logging: LoggingSettings,
}

/// Result cache configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    /// Disable to recompute every request
    pub enabled: bool,
    /// Maximum cached results
    pub max_entries: usize,
    /// Lifetime of a cached result in seconds
    pub ttl_secs: u64,
}

/// Request validation limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSettings {
    /// Largest accepted code set
    pub max_codes: usize,
}

/// Batch scheduler tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerSettings {
    /// Cap on batches in flight (0 = staged policy default)
    pub max_concurrency: usize,
    /// Capacity of progress and session channels
    pub channel_capacity: usize,
}

/// Point dataset location.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataSettings {
    /// JSON dataset replacing the bundled capitals
    pub points_file: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Log directory
    pub directory: PathBuf,
    /// Log file name within the directory
    pub file: String,
}
