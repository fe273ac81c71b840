//! Per-feature georeferencing pipeline.
//!
//! [`Georeferencer`] drives the whole flow for a batch of features:
//! extract → resolve cache → obtain raster → compute transform → copy the
//! raster into the staging area → emit sidecars. Features are independent,
//! so the batch runs with bounded parallelism; any failure is local to its
//! feature and the rest of the batch proceeds (partial-failure isolation).
//! Every attempted feature yields a [`FeatureOutcome`], in input order.
//!
//! # Example
//!
//! ```ignore
//! use georef::{Georeferencer, GeorefConfig, ReqwestFetcher, ImageDecoder};
//! use std::sync::Arc;
//!
//! let config = GeorefConfig::new("/var/cache/scenes");
//! let georeferencer = Georeferencer::new(
//!     config,
//!     Arc::new(ReqwestFetcher::new()?),
//!     Arc::new(ImageDecoder),
//! );
//! let outcomes = georeferencer.run(features, staging_dir).await;
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::cache::SceneCacheStore;
use crate::config::GeorefConfig;
use crate::coord::AffineTransform;
use crate::error::{GeorefError, SkipReason};
use crate::fetch::ImageFetcher;
use crate::raster::RasterDecoder;
use crate::scene::{extract, PropertyBag, SceneRecord};
use crate::sidecar::{self, SidecarPaths};

/// Result of processing one feature.
#[derive(Debug)]
pub struct FeatureOutcome {
    /// Position of the feature in the input batch.
    pub index: usize,

    /// Scene id, when extraction got far enough to know it.
    pub scene_id: Option<String>,

    /// What happened to the feature.
    pub status: OutcomeStatus,
}

/// Terminal state of one feature.
#[derive(Debug)]
pub enum OutcomeStatus {
    /// Raster copy and all four sidecars written to the staging area.
    Written {
        /// Path of the raster copy in the staging area.
        raster: PathBuf,
        /// Paths of the emitted sidecars.
        sidecars: SidecarPaths,
        /// Whether the raster came from the cache.
        cache_hit: bool,
    },

    /// The feature did not carry enough data to be georeferenced.
    Skipped(SkipReason),

    /// A stage that should have worked failed.
    Failed(GeorefError),
}

impl OutcomeStatus {
    /// Whether the feature produced its sidecar set.
    pub fn is_written(&self) -> bool {
        matches!(self, OutcomeStatus::Written { .. })
    }
}

/// Orchestrates georeferencing for batches of features.
pub struct Georeferencer {
    config: GeorefConfig,
    store: SceneCacheStore,
}

impl Georeferencer {
    /// Create an orchestrator with injected collaborators.
    pub fn new(
        config: GeorefConfig,
        fetcher: Arc<dyn ImageFetcher>,
        decoder: Arc<dyn RasterDecoder>,
    ) -> Self {
        let store = SceneCacheStore::new(
            config.cache_root.clone(),
            fetcher,
            decoder,
            config.fetch_timeout,
        );
        Self { config, store }
    }

    /// Access the underlying cache store (for cache-path queries).
    pub fn store(&self) -> &SceneCacheStore {
        &self.store
    }

    /// Process a batch of features, writing raster copies and sidecars into
    /// `output_dir`.
    ///
    /// `output_dir` is the caller-owned staging area (e.g. the temp
    /// directory of an export archive); its lifecycle belongs to the
    /// caller. Outcomes are returned in input order.
    pub async fn run(
        &self,
        features: impl IntoIterator<Item = PropertyBag>,
        output_dir: &Path,
    ) -> Vec<FeatureOutcome> {
        let mut outcomes: Vec<FeatureOutcome> = stream::iter(
            features
                .into_iter()
                .enumerate()
                .map(|(index, bag)| self.process_feature(index, bag, output_dir)),
        )
        .buffer_unordered(self.config.max_concurrent)
        .collect()
        .await;

        outcomes.sort_by_key(|o| o.index);

        let written = outcomes.iter().filter(|o| o.status.is_written()).count();
        info!(
            total = outcomes.len(),
            written,
            "Georeferencing batch finished"
        );
        outcomes
    }

    /// Run the per-feature state machine: extract → obtain → transform →
    /// copy → emit.
    async fn process_feature(
        &self,
        index: usize,
        bag: PropertyBag,
        output_dir: &Path,
    ) -> FeatureOutcome {
        let record = match extract(&bag) {
            Ok(record) => record,
            Err(reason) => {
                debug!(index, %reason, "Feature skipped");
                return FeatureOutcome {
                    index,
                    scene_id: None,
                    status: OutcomeStatus::Skipped(reason),
                };
            }
        };

        let scene_id = record.key.scene_id.clone();
        let status = match self.georeference(&record, output_dir).await {
            Ok(status) => status,
            Err(e) => {
                warn!(index, scene_id = %scene_id, error = %e, "Feature failed");
                OutcomeStatus::Failed(e)
            }
        };

        FeatureOutcome {
            index,
            scene_id: Some(scene_id),
            status,
        }
    }

    async fn georeference(
        &self,
        record: &SceneRecord,
        output_dir: &Path,
    ) -> Result<OutcomeStatus, GeorefError> {
        let raster = self
            .store
            .obtain(&record.key, record.source_url.as_deref())
            .await?;

        let transform = AffineTransform::from_corners(&record.corners, raster.size)?;

        // Fresh copy for the staging area; the cache keeps the canonical one.
        let output_path = output_dir.join(record.key.file_name());
        tokio::fs::write(&output_path, &raster.bytes).await?;

        let sidecars = sidecar::emit(
            &output_path,
            &transform,
            raster.size,
            &self.config.world_file_ext,
        )
        .await?;

        debug!(
            scene_id = %record.key.scene_id,
            cache_hit = raster.cache_hit,
            output = %output_path.display(),
            "Feature georeferenced"
        );

        Ok(OutcomeStatus::Written {
            raster: output_path,
            sidecars,
            cache_hit: raster.cache_hit,
        })
    }
}
