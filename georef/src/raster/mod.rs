//! Raster decoder abstraction.
//!
//! The pipeline only needs pixel dimensions out of a scene image — the
//! raster itself is never re-projected, resampled or converted. The decoder
//! is injected as a trait so the cache store can be tested without real
//! image payloads.

use std::io::Cursor;

use thiserror::Error;

use crate::coord::RasterSize;

/// Errors that can occur while decoding raster bytes.
#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    /// The bytes are not a recognizable raster image.
    #[error("Unrecognized image format")]
    UnknownFormat,

    /// The image header is recognized but malformed.
    #[error("Corrupted image data: {0}")]
    Corrupted(String),
}

/// Trait for probing raster dimensions out of encoded image bytes.
pub trait RasterDecoder: Send + Sync {
    /// Decode the image header and return its pixel dimensions.
    fn dimensions(&self, bytes: &[u8]) -> Result<RasterSize, DecodeError>;
}

/// Decoder backed by the `image` crate.
///
/// Guesses the format from magic bytes and reads only the header, so
/// probing is cheap even for large scenes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageDecoder;

impl RasterDecoder for ImageDecoder {
    fn dimensions(&self, bytes: &[u8]) -> Result<RasterSize, DecodeError> {
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

        if reader.format().is_none() {
            return Err(DecodeError::UnknownFormat);
        }

        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

        Ok(RasterSize::new(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    /// Encode a real JPEG in memory for decoder tests.
    fn sample_jpeg(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::new(width, height);
        let mut bytes = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut bytes, ImageFormat::Jpeg)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_decode_jpeg_dimensions() {
        let bytes = sample_jpeg(100, 50);
        let size = ImageDecoder.dimensions(&bytes).unwrap();
        assert_eq!(size, RasterSize::new(100, 50));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = ImageDecoder.dimensions(b"definitely not an image");
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_truncated_jpeg_fails() {
        let mut bytes = sample_jpeg(100, 50);
        // Keep the SOI marker but drop the rest of the header.
        bytes.truncate(4);
        let result = ImageDecoder.dimensions(&bytes);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_empty_fails() {
        assert!(matches!(
            ImageDecoder.dimensions(&[]),
            Err(DecodeError::UnknownFormat) | Err(DecodeError::Corrupted(_))
        ));
    }
}
