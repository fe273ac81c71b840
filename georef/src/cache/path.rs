//! Deterministic cache path derivation.
//!
//! Layout: `{root}/{platform lowercased}/{year}/{month}/{day bucket}/{scene_id}.jpg`
//! with month rendered without a leading zero and days grouped into
//! ten-day buckets. Example: `landsat8/2021/3/11-20/SC123.jpg`.

use std::path::{Path, PathBuf};

use chrono::Datelike;

use crate::scene::SceneKey;

/// Ten-day bucket label for a day-of-month.
///
/// Days 29–31 in short months never occur as real dates, so the last bucket
/// needs no special-casing.
pub fn day_bucket(day: u32) -> &'static str {
    match day {
        1..=10 => "1-10",
        11..=20 => "11-20",
        _ => "21-31",
    }
}

/// Resolve the on-disk cache location for a scene.
pub fn scene_cache_path(root: &Path, key: &SceneKey) -> PathBuf {
    root.join(key.platform.to_lowercase())
        .join(key.acquired.year().to_string())
        .join(key.acquired.month().to_string())
        .join(day_bucket(key.acquired.day()))
        .join(key.file_name())
}
