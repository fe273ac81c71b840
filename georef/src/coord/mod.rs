//! Ground-control-point geometry.
//!
//! Provides the corner-point model for a georeferenced scene and the affine
//! world-transform derived from it. The transform maps image pixel
//! coordinates (column, row; row increases downward) to geographic
//! coordinates (longitude, latitude):
//!
//! ```text
//! x = A*col + C*row + E
//! y = D*col + B*row + F
//! ```
//!
//! The origin of the mapping is corner 1 (upper-left), following the
//! standard world-file convention.

use crate::error::GeorefError;

/// A geographic point as (longitude, latitude) in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    /// Create a point from longitude and latitude.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// The four ground-control corners of a scene, in fixed order.
///
/// Corner ordering is contractual and matches image pixel-space winding:
/// 1 = upper-left, 2 = upper-right, 3 = lower-right, 4 = lower-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerPoints {
    /// Corner 1: upper-left (pixel 0, 0).
    pub upper_left: GeoPoint,
    /// Corner 2: upper-right (pixel width, 0).
    pub upper_right: GeoPoint,
    /// Corner 3: lower-right (pixel width, height).
    pub lower_right: GeoPoint,
    /// Corner 4: lower-left (pixel 0, height).
    pub lower_left: GeoPoint,
}

/// Raster dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RasterSize {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
}

impl RasterSize {
    /// Create a raster size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// The 6-coefficient affine world-transform.
///
/// Coefficient names follow the world-file convention: `a`/`d` are the
/// column scale/shear terms, `c`/`b` the row scale/shear terms, and
/// (`e`, `f`) the geographic position of the upper-left corner. For a
/// north-up image `b` is negative because pixel rows grow downward while
/// latitude grows upward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl AffineTransform {
    /// Derive the transform from the four corner points and the raster size.
    ///
    /// The column terms come from corner 2 (upper-right) divided by the
    /// width; the row terms come from corner 4 (lower-left) divided by the
    /// height. Corner 3 does not participate: an affine mapping has six
    /// degrees of freedom and is fully determined by three corners.
    ///
    /// # Errors
    ///
    /// Returns [`GeorefError::InvalidDimension`] if either dimension is zero.
    pub fn from_corners(
        corners: &CornerPoints,
        size: RasterSize,
    ) -> Result<Self, GeorefError> {
        if size.width == 0 || size.height == 0 {
            return Err(GeorefError::InvalidDimension {
                width: size.width,
                height: size.height,
            });
        }

        let width = f64::from(size.width);
        let height = f64::from(size.height);

        let e = corners.upper_left.lon;
        let f = corners.upper_left.lat;
        let a = (corners.upper_right.lon - e) / width;
        let d = (corners.upper_right.lat - f) / width;
        let c = (corners.lower_left.lon - e) / height;
        let b = (corners.lower_left.lat - f) / height;

        Ok(Self { a, b, c, d, e, f })
    }

    /// Map a pixel coordinate (column, row) to geographic (lon, lat).
    #[inline]
    pub fn apply(&self, col: f64, row: f64) -> GeoPoint {
        GeoPoint {
            lon: self.a * col + self.c * row + self.e,
            lat: self.d * col + self.b * row + self.f,
        }
    }

    /// The geographic corners implied by this transform for a raster of the
    /// given size, in contract order (UL, UR, LR, LL).
    ///
    /// For corners produced by [`from_corners`](Self::from_corners) this
    /// reproduces the original inputs for corners 1, 2 and 4; corner 3 is
    /// the affine completion of the parallelogram.
    pub fn corners(&self, size: RasterSize) -> CornerPoints {
        let width = f64::from(size.width);
        let height = f64::from(size.height);
        CornerPoints {
            upper_left: self.apply(0.0, 0.0),
            upper_right: self.apply(width, 0.0),
            lower_right: self.apply(width, height),
            lower_left: self.apply(0.0, height),
        }
    }
}
