//! Default values and constants for all configuration settings.

use std::path::PathBuf;
use std::time::Duration;

use super::settings::*;
use crate::cache::CacheConfig;
use crate::scheduler::SchedulerConfig;
use crate::service::ServiceConfig;

pub const DEFAULT_CACHE_ENABLED: bool = true;
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = crate::cache::DEFAULT_MAX_ENTRIES;
pub const DEFAULT_CACHE_TTL_SECS: u64 = crate::cache::DEFAULT_TTL.as_secs();
pub const DEFAULT_MAX_CODES: usize = crate::request::DEFAULT_MAX_CODES;
/// 0 leaves the staged policy's concurrency unchanged
pub const DEFAULT_MAX_CONCURRENCY: usize = 0;
pub const DEFAULT_CHANNEL_CAPACITY: usize = crate::stream::DEFAULT_CHANNEL_CAPACITY;
pub const DEFAULT_LOG_DIRECTORY: &str = "logs";
pub const DEFAULT_LOG_FILE: &str = "capdist.log";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            cache: CacheSettings {
                enabled: DEFAULT_CACHE_ENABLED,
                max_entries: DEFAULT_CACHE_MAX_ENTRIES,
                ttl_secs: DEFAULT_CACHE_TTL_SECS,
            },
            request: RequestSettings {
                max_codes: DEFAULT_MAX_CODES,
            },
            scheduler: SchedulerSettings {
                max_concurrency: DEFAULT_MAX_CONCURRENCY,
                channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            },
            data: DataSettings::default(),
            logging: LoggingSettings {
                directory: PathBuf::from(DEFAULT_LOG_DIRECTORY),
                file: DEFAULT_LOG_FILE.to_string(),
            },
        }
    }
}

impl From<&CacheSettings> for CacheConfig {
    fn from(settings: &CacheSettings) -> Self {
        Self {
            max_entries: settings.max_entries,
            default_ttl: Duration::from_secs(settings.ttl_secs),
            enabled: settings.enabled,
        }
    }
}

impl From<&SchedulerSettings> for SchedulerConfig {
    fn from(settings: &SchedulerSettings) -> Self {
        Self {
            max_concurrency: settings.max_concurrency,
            policy: None,
        }
    }
}

impl From<&ConfigFile> for ServiceConfig {
    fn from(config: &ConfigFile) -> Self {
        ServiceConfig::builder()
            .cache(CacheConfig::from(&config.cache))
            .scheduler(SchedulerConfig::from(&config.scheduler))
            .max_codes(config.request.max_codes)
            .channel_capacity(config.scheduler.channel_capacity)
            .build()
    }
}
