//! MapInfo TAB raster registration rendering.
//!
//! The `.tab` file registers the raster by naming four geographic/pixel
//! correspondences, clockwise from the upper-left corner (UL → UR → BR →
//! BL). This winding is this format's convention; the KML GroundOverlay
//! uses the reverse one.

use crate::coord::{CornerPoints, RasterSize};

/// Coordinate-system clause for WGS-84 geographic (MapInfo notation).
const COORD_SYS: &str = "Earth Projection 1, 0";

/// Render the `.tab` body.
///
/// # Arguments
///
/// * `corners` - Geographic corners in contract order (UL, UR, LR, LL)
/// * `size` - Raster dimensions (pixel corners of the registration)
/// * `file_name` - Name of the raster file the table registers
pub fn render_tab(corners: &CornerPoints, size: RasterSize, file_name: &str) -> String {
    format!(
        "!table\r\n\
         !version 300\r\n\
         !Charset WindowsLatin1\r\n\
         \r\n\
         Definition Table\r\n\
         \x20\x20File \"{file}\"\r\n\
         \x20\x20Type \"RASTER\"\r\n\
         ({ulx},{uly}) (0,0) Label \"UpLeft\",\r\n\
         ({urx},{ury}) ({w},0) Label \"UpRight\",\r\n\
         ({lrx},{lry}) ({w},{h}) Label \"BottRight\",\r\n\
         ({llx},{lly}) (0,{h}) Label \"BottLeft\"\r\n\
         \x20CoordSys {coord_sys}",
        file = file_name,
        ulx = corners.upper_left.lon,
        uly = corners.upper_left.lat,
        urx = corners.upper_right.lon,
        ury = corners.upper_right.lat,
        lrx = corners.lower_right.lon,
        lry = corners.lower_right.lat,
        llx = corners.lower_left.lon,
        lly = corners.lower_left.lat,
        w = size.width,
        h = size.height,
        coord_sys = COORD_SYS,
    )
}
