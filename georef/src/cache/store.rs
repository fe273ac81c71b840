//! Fetch-or-reuse store for scene rasters.
//!
//! [`SceneCacheStore::obtain`] resolves the deterministic cache path for a
//! scene and either reads the cached raster or downloads it through the
//! injected [`ImageFetcher`]. The cache is a write-once store: entries are
//! created on first successful fetch and never updated in place.
//!
//! # Write atomicity
//!
//! Concurrent callers may race to fill the same key. Bytes are written to a
//! uniquely named sibling file and renamed into place, so the last complete
//! write wins and readers never observe a torn file. A fetch or decode
//! failure leaves nothing on disk.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::cache::path::scene_cache_path;
use crate::coord::RasterSize;
use crate::error::{GeorefError, GeorefResult};
use crate::fetch::{FetchError, ImageFetcher};
use crate::raster::RasterDecoder;
use crate::scene::SceneKey;

/// Monotonic counter distinguishing temporary files written by this process.
static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A raster obtained from the cache store.
#[derive(Clone, Debug)]
pub struct CachedRaster {
    /// Canonical cache location of the raster.
    pub path: PathBuf,

    /// Raw encoded image bytes.
    pub bytes: Vec<u8>,

    /// Decoded pixel dimensions.
    pub size: RasterSize,

    /// Whether the raster was already cached.
    pub cache_hit: bool,
}

/// Orchestrates "fetch if absent, else reuse" for scene rasters.
pub struct SceneCacheStore {
    cache_root: PathBuf,
    fetcher: Arc<dyn ImageFetcher>,
    decoder: Arc<dyn RasterDecoder>,
    fetch_timeout: Duration,
}

impl SceneCacheStore {
    /// Create a store over the given cache root.
    ///
    /// # Arguments
    ///
    /// * `cache_root` - Root directory of the cache tree
    /// * `fetcher` - Downloader for cache misses
    /// * `decoder` - Dimension probe for raster bytes
    /// * `fetch_timeout` - Bound applied to each download
    pub fn new(
        cache_root: impl Into<PathBuf>,
        fetcher: Arc<dyn ImageFetcher>,
        decoder: Arc<dyn RasterDecoder>,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            cache_root: cache_root.into(),
            fetcher,
            decoder,
            fetch_timeout,
        }
    }

    /// The cache path this store would use for a scene.
    pub fn path_for(&self, key: &SceneKey) -> PathBuf {
        scene_cache_path(&self.cache_root, key)
    }

    /// Obtain the raster for a scene, fetching it on a cache miss.
    ///
    /// On a hit the cached bytes are read and decoded; a corrupted cache
    /// entry fails with [`GeorefError::Decode`] and is deliberately left in
    /// place so a shared-cache corruption problem surfaces instead of being
    /// silently re-downloaded over.
    ///
    /// On a miss, `source_url` is required; the download is bounded by the
    /// configured timeout and nothing is persisted unless both the fetch and
    /// the dimension decode succeed.
    pub async fn obtain(
        &self,
        key: &SceneKey,
        source_url: Option<&str>,
    ) -> GeorefResult<CachedRaster> {
        let path = self.path_for(key);

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let size = self.decoder.dimensions(&bytes)?;
                debug!(
                    scene_id = %key.scene_id,
                    path = %path.display(),
                    "Scene cache hit"
                );
                Ok(CachedRaster {
                    path,
                    bytes,
                    size,
                    cache_hit: true,
                })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let url = source_url.ok_or_else(|| GeorefError::MissingSource {
                    scene_id: key.scene_id.clone(),
                })?;

                let bytes = self.fetch_bounded(url).await?;
                let size = self.decoder.dimensions(&bytes)?;
                self.persist(&path, &bytes).await?;

                info!(
                    scene_id = %key.scene_id,
                    url = %url,
                    bytes = bytes.len(),
                    "Scene downloaded and cached"
                );
                Ok(CachedRaster {
                    path,
                    bytes,
                    size,
                    cache_hit: false,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Run the fetcher under the store's own timeout guard.
    ///
    /// The fetcher receives the timeout and is expected to honor it, but a
    /// misbehaving implementation must not stall the pipeline, so the call
    /// is additionally raced against `tokio::time::timeout`.
    async fn fetch_bounded(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        match tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch(url, self.fetch_timeout))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(FetchError::TimedOut {
                url: url.to_string(),
                timeout_secs: self.fetch_timeout.as_secs(),
            }),
        }
    }

    /// Write bytes to the cache path atomically (tmp sibling + rename).
    async fn persist(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = temp_sibling(path);
        if let Err(e) = tokio::fs::write(&tmp, bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e);
        }
        if let Err(e) = tokio::fs::rename(&tmp, path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e);
        }
        Ok(())
    }
}

/// A uniquely named temporary sibling of the final cache path.
///
/// The name carries the process id and a counter so concurrent fillers of
/// the same key never write through the same temporary file.
fn temp_sibling(path: &Path) -> PathBuf {
    let n = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let file_name = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}-{}.tmp", file_name, std::process::id(), n))
}
