//! Scene image cache.
//!
//! The cache stores the canonical copy of every downloaded scene raster in a
//! directory tree sharded by platform and acquisition date. Paths are a pure
//! function of the [`SceneKey`](crate::scene::SceneKey) — the same scene
//! always resolves to the same file, so a raster is fetched at most once and
//! reused by every later export that references it.

mod path;
mod store;

pub use path::{day_bucket, scene_cache_path};
pub use store::{CachedRaster, SceneCacheStore};
