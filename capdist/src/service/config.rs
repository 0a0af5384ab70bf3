//! Service configuration types.

use crate::cache::CacheConfig;
use crate::request::DEFAULT_MAX_CODES;
use crate::scheduler::SchedulerConfig;
use crate::stream::DEFAULT_CHANNEL_CAPACITY;

/// Configuration for the distance service.
///
/// # Example
///
/// ```
/// use capdist::service::ServiceConfig;
///
/// let config = ServiceConfig::builder()
///     .max_codes(50)
///     .cache_enabled(false)
///     .build();
///
/// assert_eq!(config.max_codes(), 50);
/// assert!(!config.cache().enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    cache: CacheConfig,
    scheduler: SchedulerConfig,
    /// Largest accepted code set
    max_codes: usize,
    /// Capacity of session and progress channels
    channel_capacity: usize,
}

impl ServiceConfig {
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    pub fn cache(&self) -> &CacheConfig {
        &self.cache
    }

    pub fn scheduler(&self) -> &SchedulerConfig {
        &self.scheduler
    }

    pub fn max_codes(&self) -> usize {
        self.max_codes
    }

    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            scheduler: SchedulerConfig::default(),
            max_codes: DEFAULT_MAX_CODES,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Builder for [`ServiceConfig`].
#[derive(Debug, Clone, Default)]
pub struct ServiceConfigBuilder {
    config: ServiceConfig,
}

impl ServiceConfigBuilder {
    pub fn cache(mut self, cache: CacheConfig) -> Self {
        self.config.cache = cache;
        self
    }

    pub fn cache_enabled(mut self, enabled: bool) -> Self {
        self.config.cache.enabled = enabled;
        self
    }

    pub fn scheduler(mut self, scheduler: SchedulerConfig) -> Self {
        self.config.scheduler = scheduler;
        self
    }

    /// Maximum codes per request (raised to at least 2).
    pub fn max_codes(mut self, max_codes: usize) -> Self {
        self.config.max_codes = max_codes.max(2);
        self
    }

    /// Channel capacity (raised to at least 1).
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.config.channel_capacity = capacity.max(1);
        self
    }

    pub fn build(self) -> ServiceConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::BatchPolicy;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.max_codes(), 250);
        assert_eq!(config.channel_capacity(), 64);
        assert_eq!(config.cache(), &CacheConfig::default());
        assert_eq!(config.scheduler(), &SchedulerConfig::default());
    }

    #[test]
    fn test_builder_clamps() {
        let config = ServiceConfig::builder()
            .max_codes(0)
            .channel_capacity(0)
            .scheduler(SchedulerConfig {
                max_concurrency: 2,
                policy: Some(BatchPolicy::new(10, 4)),
            })
            .build();

        assert_eq!(config.max_codes(), 2);
        assert_eq!(config.channel_capacity(), 1);
        assert_eq!(config.scheduler().max_concurrency, 2);
    }
}
