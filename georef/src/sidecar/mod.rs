//! Georeferencing sidecar files.
//!
//! A georeferenced scene is described to downstream GIS tools by four
//! sidecar files sharing the raster's path stem:
//!
//! - world file (`.jgw` by default, configurable) — the six affine
//!   coefficients, one per line
//! - `.aux.xml` — a fixed WGS-84 (EPSG:4326) spatial-reference descriptor
//! - `.tab` — MapInfo raster registration (corners clockwise from
//!   upper-left)
//! - `.kml` — GroundOverlay quad (corners counter-clockwise from
//!   bottom-left; that format's required winding)
//!
//! All four encode the same [`AffineTransform`]; the differing corner
//! orderings are format conventions, not different geometries. Emission is
//! all-or-nothing per feature: a mid-sequence write failure removes the
//! sidecars already written for that base before returning the error.

mod aux_xml;
mod kml;
mod tab;
mod world;

pub use aux_xml::render_aux_xml;
pub use kml::render_kml;
pub use tab::render_tab;
pub use world::render_world;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::coord::{AffineTransform, RasterSize};
use crate::error::{GeorefError, GeorefResult};

/// The four sidecar paths derived from one output raster path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidecarPaths {
    pub world: PathBuf,
    pub aux_xml: PathBuf,
    pub tab: PathBuf,
    pub kml: PathBuf,
}

impl SidecarPaths {
    /// Derive the sidecar paths for an output raster.
    ///
    /// # Arguments
    ///
    /// * `base` - Path of the output raster copy (e.g. `out/SC123.jpg`)
    /// * `world_ext` - World-file extension without the leading dot
    pub fn for_base(base: &Path, world_ext: &str) -> Self {
        Self {
            world: base.with_extension(world_ext),
            aux_xml: base.with_extension("aux.xml"),
            tab: base.with_extension("tab"),
            kml: base.with_extension("kml"),
        }
    }

    /// The four paths in emission order.
    fn all(&self) -> [&Path; 4] {
        [&self.world, &self.aux_xml, &self.tab, &self.kml]
    }
}

/// Write the four sidecars for an output raster.
///
/// The geographic corners embedded in the tab and kml files are recovered
/// from the transform via the forward mapping at the raster's pixel corners,
/// so all four files describe the identical geometry.
///
/// # Errors
///
/// Returns [`GeorefError::SidecarWrite`] on the first failed write; any
/// sidecar already written for this base has been removed by then.
pub async fn emit(
    base: &Path,
    transform: &AffineTransform,
    size: RasterSize,
    world_ext: &str,
) -> GeorefResult<SidecarPaths> {
    let paths = SidecarPaths::for_base(base, world_ext);
    let file_name = base
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();

    let corners = transform.corners(size);
    let bodies: [String; 4] = [
        render_world(transform),
        render_aux_xml().to_string(),
        render_tab(&corners, size, &file_name),
        render_kml(&corners, &file_name),
    ];

    let mut written: Vec<&Path> = Vec::with_capacity(4);
    for (path, body) in paths.all().into_iter().zip(&bodies) {
        if let Err(source) = tokio::fs::write(path, body).await {
            for w in written {
                let _ = tokio::fs::remove_file(w).await;
            }
            return Err(GeorefError::SidecarWrite {
                path: path.to_path_buf(),
                source,
            });
        }
        written.push(path);
    }

    debug!(base = %base.display(), "Sidecars written");
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::{CornerPoints, GeoPoint};
    use tempfile::TempDir;

    fn reference_transform() -> AffineTransform {
        // 100x50 scene spanning lon 10..20, lat 40..50.
        AffineTransform {
            a: 0.1,
            b: -0.2,
            c: 0.0,
            d: 0.0,
            e: 10.0,
            f: 50.0,
        }
    }

    #[test]
    fn test_paths_for_base() {
        let paths = SidecarPaths::for_base(Path::new("/out/SC123.jpg"), "jgw");
        assert_eq!(paths.world, PathBuf::from("/out/SC123.jgw"));
        assert_eq!(paths.aux_xml, PathBuf::from("/out/SC123.aux.xml"));
        assert_eq!(paths.tab, PathBuf::from("/out/SC123.tab"));
        assert_eq!(paths.kml, PathBuf::from("/out/SC123.kml"));
    }

    #[test]
    fn test_paths_custom_world_ext() {
        let paths = SidecarPaths::for_base(Path::new("/out/SC123.jpg"), "wld");
        assert_eq!(paths.world, PathBuf::from("/out/SC123.wld"));
    }

    #[tokio::test]
    async fn test_emit_writes_all_four() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("SC123.jpg");

        let paths = emit(&base, &reference_transform(), RasterSize::new(100, 50), "jgw")
            .await
            .unwrap();

        for path in [&paths.world, &paths.aux_xml, &paths.tab, &paths.kml] {
            assert!(path.exists(), "{} should exist", path.display());
        }

        let world = std::fs::read_to_string(&paths.world).unwrap();
        assert_eq!(world, "0.1\r\n0\r\n0\r\n-0.2\r\n10\r\n50");
    }

    #[tokio::test]
    async fn test_emit_failure_cleans_up_earlier_sidecars() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("SC123.jpg");

        // A directory squatting on the .tab path makes the third write fail
        // after the world file and aux.xml have been written.
        std::fs::create_dir(base.with_extension("tab")).unwrap();

        let result = emit(&base, &reference_transform(), RasterSize::new(100, 50), "jgw").await;

        assert!(matches!(
            result,
            Err(GeorefError::SidecarWrite { ref path, .. }) if path.ends_with("SC123.tab")
        ));
        assert!(!base.with_extension("jgw").exists());
        assert!(!base.with_extension("aux.xml").exists());
        assert!(!base.with_extension("kml").exists());
    }

    #[test]
    fn test_cross_format_corner_consistency() {
        // The corners embedded in tab and kml, and the corners implied by
        // the world-file coefficients, must describe the same geometry.
        let transform = AffineTransform {
            a: 0.005,
            b: -0.01,
            c: 0.002,
            d: 0.001,
            e: 100.0,
            f: 60.0,
        };
        let size = RasterSize::new(200, 100);
        let corners = transform.corners(size);

        let tab = render_tab(&corners, size, "scene.jpg");
        let kml = render_kml(&corners, "scene.jpg");

        // Upper-left appears first in the tab, last in the kml quad.
        let ul = format!("({},{})", corners.upper_left.lon, corners.upper_left.lat);
        assert!(tab.contains(&ul));
        let ul_kml = format!(
            "{},{},0",
            corners.upper_left.lon, corners.upper_left.lat
        );
        assert!(kml.contains(&ul_kml));

        // And the world file's E/F origin is that same upper-left corner.
        let world = render_world(&transform);
        let mut lines = world.split("\r\n");
        let e: f64 = lines.clone().nth(4).unwrap().parse().unwrap();
        let f: f64 = lines.nth(5).unwrap().parse().unwrap();
        assert!((e - corners.upper_left.lon).abs() < 1e-12);
        assert!((f - corners.upper_left.lat).abs() < 1e-12);
    }

    #[test]
    fn test_opposite_windings() {
        let corners = CornerPoints {
            upper_left: GeoPoint::new(1.0, 4.0),
            upper_right: GeoPoint::new(2.0, 4.0),
            lower_right: GeoPoint::new(2.0, 3.0),
            lower_left: GeoPoint::new(1.0, 3.0),
        };

        let tab = render_tab(&corners, RasterSize::new(10, 10), "s.jpg");
        let kml = render_kml(&corners, "s.jpg");

        // tab: clockwise from upper-left.
        let tab_ul = tab.find("UpLeft").unwrap();
        let tab_br = tab.find("BottRight").unwrap();
        assert!(tab_ul < tab_br);

        // kml: counter-clockwise from bottom-left; upper-left comes last.
        let kml_ll = kml.find("1,3,0").unwrap();
        let kml_ul = kml.find("1,4,0").unwrap();
        assert!(kml_ll < kml_ul);
    }
}
