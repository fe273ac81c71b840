//! KML GroundOverlay rendering.
//!
//! Drapes the raster over its geographic quad via `gx:LatLonQuad`. The quad
//! is listed counter-clockwise from the bottom-left corner (BL → BR → UR →
//! UL) — the reverse of the TAB winding, as required by this format. The
//! raster's own file name serves as both the overlay label and the icon
//! reference.

use crate::coord::CornerPoints;

/// Render the `.kml` body.
pub fn render_kml(corners: &CornerPoints, file_name: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\r\n\
         <kml xmlns=\"http://www.opengis.net/kml/2.2\" \
         xmlns:gx=\"http://www.google.com/kml/ext/2.2\" \
         xmlns:kml=\"http://www.opengis.net/kml/2.2\" \
         xmlns:atom=\"http://www.w3.org/2005/Atom\">\r\n\
         <GroundOverlay>\r\n\
         <name>{file}</name>\r\n\
         <Icon>\r\n\
         <href>{file}</href>\r\n\
         </Icon>\r\n\
         <gx:LatLonQuad>\r\n\
         \t<coordinates>\r\n\
         \t\t{llx},{lly},0 {lrx},{lry},0 {urx},{ury},0 {ulx},{uly},0 \r\n\
         \t</coordinates>\r\n\
         </gx:LatLonQuad>\r\n\
         </GroundOverlay>\r\n\
         </kml>",
        file = file_name,
        llx = corners.lower_left.lon,
        lly = corners.lower_left.lat,
        lrx = corners.lower_right.lon,
        lry = corners.lower_right.lat,
        urx = corners.upper_right.lon,
        ury = corners.upper_right.lat,
        ulx = corners.upper_left.lon,
        uly = corners.upper_left.lat,
    )
}
