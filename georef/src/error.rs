//! Error types for the georeferencing pipeline.
//!
//! Two distinct outcomes exist for a feature that produces no sidecars:
//!
//! - [`SkipReason`]: the feature simply does not carry enough data to be
//!   georeferenced. Partial property bags are common in real exports, so
//!   this is a routine no-op, not an error.
//! - [`GeorefError`]: something that should have worked did not (network
//!   failure, corrupted raster, disk write failure). Errors are local to one
//!   feature and never abort the batch.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::fetch::FetchError;
use crate::raster::DecodeError;

/// Result type for georeferencing operations.
pub type GeorefResult<T> = Result<T, GeorefError>;

/// Errors that can occur while georeferencing a single feature.
#[derive(Debug, Error)]
pub enum GeorefError {
    /// Raster width or height is zero, so no affine transform exists.
    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// The scene is not cached and the feature carries no source URL.
    #[error("Scene {scene_id} is not cached and has no source URL")]
    MissingSource { scene_id: String },

    /// Downloading the scene image failed.
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The image bytes could not be decoded, whether freshly fetched or
    /// read back from the cache.
    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// A sidecar file could not be written.
    #[error("Failed to write sidecar {path}: {source}")]
    SidecarWrite { path: PathBuf, source: io::Error },

    /// Other filesystem failure (cache read, staging copy, directory
    /// creation).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Why a feature was skipped without being treated as an error.
///
/// The extraction contract is best-effort: any single missing or
/// unparseable property skips the whole feature silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// A required property (`id`, `sat_name`, `date`) is absent or not
    /// representable as a string.
    #[error("Missing required property '{0}'")]
    MissingProperty(&'static str),

    /// One of the eight corner coordinates is absent or non-numeric.
    #[error("Missing or non-numeric corner property '{0}'")]
    MissingCorner(&'static str),

    /// The `date` property is present but not parseable as a timestamp.
    #[error("Unparseable acquisition date '{0}'")]
    BadDate(String),
}
