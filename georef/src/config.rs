//! Configuration surface for the georeferencing pipeline.
//!
//! The core consumes three settings from the export pipeline that hosts it:
//! the cache-root directory, the default network timeout, and the world-file
//! extension. `max_concurrent` bounds per-feature parallelism so a large
//! export does not overwhelm the remote image source.

use std::path::PathBuf;
use std::time::Duration;

/// Default network timeout for scene image downloads (in seconds).
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 60;

/// Default world-file extension (JPEG world file).
pub const DEFAULT_WORLD_FILE_EXT: &str = "jgw";

/// Default number of features processed concurrently.
pub const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Configuration for [`Georeferencer`](crate::orchestrator::Georeferencer)
/// and [`SceneCacheStore`](crate::cache::SceneCacheStore).
#[derive(Clone, Debug)]
pub struct GeorefConfig {
    /// Root directory of the downloaded-images cache.
    pub cache_root: PathBuf,

    /// Timeout applied to each scene image download.
    pub fetch_timeout: Duration,

    /// Extension of the emitted world file, without the leading dot.
    pub world_file_ext: String,

    /// Maximum number of features processed in parallel.
    pub max_concurrent: usize,
}

impl GeorefConfig {
    /// Create a configuration with defaults for everything but the cache root.
    pub fn new(cache_root: impl Into<PathBuf>) -> Self {
        Self {
            cache_root: cache_root.into(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            world_file_ext: DEFAULT_WORLD_FILE_EXT.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    /// Set the per-download timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set the world-file extension (without the leading dot).
    pub fn with_world_file_ext(mut self, ext: impl Into<String>) -> Self {
        self.world_file_ext = ext.into();
        self
    }

    /// Set the feature parallelism bound. A bound of zero is clamped to one.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GeorefConfig::new("/var/cache/scenes");
        assert_eq!(config.cache_root, PathBuf::from("/var/cache/scenes"));
        assert_eq!(
            config.fetch_timeout,
            Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS)
        );
        assert_eq!(config.world_file_ext, "jgw");
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
    }

    #[test]
    fn test_config_builders() {
        let config = GeorefConfig::new("/tmp/cache")
            .with_fetch_timeout(Duration::from_secs(5))
            .with_world_file_ext("wld")
            .with_max_concurrent(8);
        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
        assert_eq!(config.world_file_ext, "wld");
        assert_eq!(config.max_concurrent, 8);
    }

    #[test]
    fn test_zero_concurrency_clamped() {
        let config = GeorefConfig::new("/tmp/cache").with_max_concurrent(0);
        assert_eq!(config.max_concurrent, 1);
    }
}
