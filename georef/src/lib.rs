//! Georef - ground-control-point georeferencing for exported scene imagery
//!
//! This library augments a geospatial export pipeline: for each vector
//! feature that references a remotely hosted scene raster and carries four
//! ground-control corner coordinates, it ensures the image is cached
//! locally (downloaded once, reused thereafter) and emits the four
//! georeferencing sidecar files (world file, PAM aux.xml, MapInfo TAB, KML
//! GroundOverlay) that let downstream GIS tools place the raster on a map.
//!
//! The entry point is [`Georeferencer`], which takes its network fetcher
//! and raster decoder as injected collaborators and processes features with
//! bounded parallelism and per-feature failure isolation.

pub mod cache;
pub mod config;
pub mod coord;
pub mod error;
pub mod fetch;
pub mod orchestrator;
pub mod raster;
pub mod scene;
pub mod sidecar;

pub use cache::{day_bucket, scene_cache_path, CachedRaster, SceneCacheStore};
pub use config::GeorefConfig;
pub use coord::{AffineTransform, CornerPoints, GeoPoint, RasterSize};
pub use error::{GeorefError, GeorefResult, SkipReason};
pub use fetch::{FetchError, ImageFetcher, ReqwestFetcher};
pub use orchestrator::{FeatureOutcome, Georeferencer, OutcomeStatus};
pub use raster::{DecodeError, ImageDecoder, RasterDecoder};
pub use scene::{extract, PropertyBag, SceneKey, SceneRecord};
pub use sidecar::SidecarPaths;
