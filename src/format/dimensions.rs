//! Dimension probe dispatch.

use crate::error::MetadataError;
use crate::exif::ImageDimensions;

use super::detect::ImageFormat;
use super::jpeg::jpeg_dimensions;
use super::png::png_dimensions;
use super::webp::webp_dimensions;

/// Read the pixel dimensions of an already-classified buffer.
///
/// Only JPEG, PNG and WebP headers are probed; every other format reports
/// [`MetadataError::UnrecognizedFormat`].
pub fn dimensions_for_format(
    data: &[u8],
    format: ImageFormat,
) -> Result<ImageDimensions, MetadataError> {
    match format {
        ImageFormat::Jpeg => jpeg_dimensions(data),
        ImageFormat::Png => png_dimensions(data),
        ImageFormat::Webp => webp_dimensions(data),
        ImageFormat::Gif
        | ImageFormat::Bmp
        | ImageFormat::Tiff
        | ImageFormat::Heic
        | ImageFormat::Unknown => Err(MetadataError::UnrecognizedFormat),
    }
}
