//! Scene identity and extraction from feature property bags.
//!
//! Export features carry a string-keyed bag of dynamic values. This module
//! turns that bag into a typed [`SceneRecord`] — or an explicit
//! [`SkipReason`] when the feature does not carry enough data. Missing data
//! is routine in real exports (partial property bags are common), so
//! extraction never fails hard: any absent or unparseable required property
//! skips the feature and the pipeline moves on.
//!
//! # Required properties
//!
//! - `id` — scene identifier (string or number)
//! - `sat_name` — platform name
//! - `date` — acquisition timestamp (see [`parse_acquisition_date`])
//! - `x1,y1 .. x4,y4` — the four geographic corner coordinates, corner 1 =
//!   upper-left, winding clockwise in pixel space
//!
//! `url` is optional; without it a cache miss cannot be filled.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::coord::{CornerPoints, GeoPoint};
use crate::error::SkipReason;

/// Extension of the cached raster files.
pub const RASTER_EXT: &str = "jpg";

/// A string-keyed bag of dynamic feature properties.
pub type PropertyBag = serde_json::Map<String, Value>;

/// Unique identity of a scene raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneKey {
    /// Acquisition platform (e.g. `"Landsat8"`). Case is preserved here;
    /// the cache path lower-cases it.
    pub platform: String,

    /// Acquisition instant, UTC.
    pub acquired: DateTime<Utc>,

    /// Scene identifier, used as the raster file stem.
    pub scene_id: String,
}

impl SceneKey {
    /// File name of the raster for this scene (`{scene_id}.jpg`).
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.scene_id, RASTER_EXT)
    }
}

/// A fully extracted, georeferenceable feature.
#[derive(Clone, Debug)]
pub struct SceneRecord {
    /// Scene identity (drives cache path and output file name).
    pub key: SceneKey,

    /// The four ground-control corners.
    pub corners: CornerPoints,

    /// Source URL for the raster, if the feature carries one.
    pub source_url: Option<String>,
}

/// Extract a [`SceneRecord`] from a property bag, or decide to skip.
///
/// Pure function, no side effects. Each corner coordinate is independently
/// required; the first missing one names the skip reason.
pub fn extract(properties: &PropertyBag) -> Result<SceneRecord, SkipReason> {
    let scene_id = string_prop(properties, "id")?;
    let platform = string_prop(properties, "sat_name")?;

    let date_raw = string_prop(properties, "date")?;
    let acquired =
        parse_acquisition_date(&date_raw).ok_or_else(|| SkipReason::BadDate(date_raw.clone()))?;

    let corners = CornerPoints {
        upper_left: corner_prop(properties, "x1", "y1")?,
        upper_right: corner_prop(properties, "x2", "y2")?,
        lower_right: corner_prop(properties, "x3", "y3")?,
        lower_left: corner_prop(properties, "x4", "y4")?,
    };

    let source_url = properties
        .get("url")
        .and_then(value_to_string);

    Ok(SceneRecord {
        key: SceneKey {
            platform,
            acquired,
            scene_id,
        },
        corners,
        source_url,
    })
}

/// Parse an acquisition timestamp from the formats the feed produces.
///
/// Accepted shapes, tried in order: RFC 3339, `%Y-%m-%dT%H:%M:%S`,
/// `%Y-%m-%d %H:%M:%S`, and a bare `%Y-%m-%d` date (midnight UTC).
pub fn parse_acquisition_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

/// Read a required string-ish property (strings and numbers both qualify).
fn string_prop(properties: &PropertyBag, key: &'static str) -> Result<String, SkipReason> {
    properties
        .get(key)
        .and_then(value_to_string)
        .ok_or(SkipReason::MissingProperty(key))
}

/// Read one corner from its `x`/`y` property pair.
fn corner_prop(
    properties: &PropertyBag,
    x_key: &'static str,
    y_key: &'static str,
) -> Result<GeoPoint, SkipReason> {
    let x = numeric_prop(properties, x_key)?;
    let y = numeric_prop(properties, y_key)?;
    Ok(GeoPoint::new(x, y))
}

/// Read a required numeric property. Numeric strings qualify too, matching
/// the lenient coercion of the upstream feed.
fn numeric_prop(properties: &PropertyBag, key: &'static str) -> Result<f64, SkipReason> {
    properties
        .get(key)
        .and_then(value_to_f64)
        .ok_or(SkipReason::MissingCorner(key))
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
