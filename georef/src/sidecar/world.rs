//! World file rendering.
//!
//! Six coefficients, one per line, in the world-file order `A, C, D, B, E,
//! F` (column scale, row shear, column shear, row scale, origin lon, origin
//! lat). Lines are CRLF-separated with no trailing newline, matching what
//! existing consumers of these files expect.

use crate::coord::AffineTransform;

/// Render the world-file body for a transform.
///
/// Coefficients use Rust's shortest round-trip `f64` formatting, which is
/// locale-independent (`.` separator, no grouping).
pub fn render_world(transform: &AffineTransform) -> String {
    format!(
        "{}\r\n{}\r\n{}\r\n{}\r\n{}\r\n{}",
        transform.a, transform.c, transform.d, transform.b, transform.e, transform.f
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_world_file() {
        let t = AffineTransform {
            a: 0.1,
            b: -0.2,
            c: 0.0,
            d: 0.0,
            e: 10.0,
            f: 50.0,
        };
        assert_eq!(render_world(&t), "0.1\r\n0\r\n0\r\n-0.2\r\n10\r\n50");
    }

    #[test]
    fn test_coefficient_order_is_acdbef() {
        let t = AffineTransform {
            a: 1.0,
            b: 4.0,
            c: 2.0,
            d: 3.0,
            e: 5.0,
            f: 6.0,
        };
        assert_eq!(render_world(&t), "1\r\n2\r\n3\r\n4\r\n5\r\n6");
    }

    #[test]
    fn test_no_trailing_newline() {
        let t = AffineTransform {
            a: 1.0,
            b: 1.0,
            c: 0.0,
            d: 0.0,
            e: 0.0,
            f: 0.0,
        };
        assert!(!render_world(&t).ends_with('\n'));
    }

    #[test]
    fn test_locale_independent_decimals() {
        let t = AffineTransform {
            a: 0.000125,
            b: -1234.5,
            c: 0.0,
            d: 0.0,
            e: 37.6173,
            f: 55.7558,
        };
        let body = render_world(&t);
        assert!(!body.contains(','));
        assert!(body.contains("0.000125"));
        assert!(body.contains("-1234.5"));
    }
}
