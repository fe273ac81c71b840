//! PAM auxiliary metadata rendering.
//!
//! The `.aux.xml` sidecar carries the spatial reference system only. Every
//! scene in this pipeline is WGS-84 geographic (EPSG:4326), so the body is
//! a fixed literal; nothing varies per scene but the file's location.

/// The WGS-84 geographic coordinate system, as a GDAL PAM dataset.
const PAM_WGS84: &str = concat!(
    r#"<PAMDataset><SRS>GEOGCS["WGS 84",DATUM["WGS_1984",SPHEROID["WGS 84",6378137,298.257223563,"#,
    r#"AUTHORITY["EPSG","7030"]],TOWGS84[0,0,0,0,0,0,0],AUTHORITY["EPSG","6326"]],"#,
    r#"PRIMEM["Greenwich",0,AUTHORITY["EPSG","8901"]],"#,
    r#"UNIT["degree",0.0174532925199433,AUTHORITY["EPSG","9108"]],"#,
    r#"AUTHORITY["EPSG","4326"]]</SRS></PAMDataset>"#
);

/// Render the `.aux.xml` body.
pub fn render_aux_xml() -> &'static str {
    PAM_WGS84
}
