//! # photo-meta
//!
//! Reads image dimensions and EXIF metadata straight from encoded bytes.
//!
//! Given the raw contents of a JPEG, PNG, WebP or TIFF file this library
//! reports the pixel size from the container header and, where the file
//! carries an EXIF block, the camera, lens, capture time, exposure settings
//! and GPS position. No pixels are decoded and no I/O happens inside the
//! library: callers hand in a byte slice and get a value back.
//!
//! ## Features
//!
//! - **Header probing**: JPEG frame headers, PNG IHDR and WebP VP8/VP8L/VP8X
//! - **EXIF decoding**: primary IFD chain plus the Exif and GPS sub-directories
//! - **Hostile input**: every offset is bounds-checked, directory walks are
//!   cycle-guarded and capped, and malformed files degrade to "absent"
//!
//! ## Architecture
//!
//! - [`io`] - Bounds-checked primitive readers and TIFF byte order
//! - [`mod@format`] - Format detection, container headers and the TIFF walker
//! - [`exif`] - Output records and tag decoding
//! - [`thumbnail`] - Thumbnail sizing helpers
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! let bytes = std::fs::read("IMG_0001.jpg").unwrap();
//!
//! if let Some(size) = photo_meta::probe_dimensions(&bytes) {
//!     println!("{}x{}", size.width, size.height);
//! }
//! if let Some(exif) = photo_meta::parse_metadata(&bytes) {
//!     println!("shot on {:?} at {:?}", exif.camera, exif.date_taken);
//! }
//! ```

use serde::Serialize;
use tracing::debug;

pub mod config;
pub mod error;
pub mod exif;
pub mod format;
pub mod io;
pub mod thumbnail;

// Re-export commonly used types
pub use config::{Cli, Command, InspectConfig, OutputFormat, ThumbnailConfig};
pub use error::MetadataError;
pub use exif::{CameraSettings, ExifRecord, GpsCoordinate, ImageDimensions};
pub use format::tiff::{walk_directories, DirectoryWalker, MAX_DIRECTORIES};
pub use format::{detect_format, dimensions_for_format, find_exif_blob, ImageFormat};
pub use io::ByteOrder;
pub use thumbnail::{calculate_thumbnail_size, is_supported_image_extension, Fit};

// =============================================================================
// Dimensions
// =============================================================================

/// Read the pixel dimensions from a JPEG, PNG or WebP header.
///
/// Returns `None` for unrecognized or malformed input.
pub fn probe_dimensions(data: &[u8]) -> Option<ImageDimensions> {
    absent_on_error("probe_dimensions", try_probe_dimensions(data))
}

/// Like [`probe_dimensions`], but reports why no dimensions were found.
pub fn try_probe_dimensions(data: &[u8]) -> Result<ImageDimensions, MetadataError> {
    let format = detect_format(data);
    if !format.is_known() {
        return Err(MetadataError::UnrecognizedFormat);
    }
    dimensions_for_format(data, format)
}

// =============================================================================
// EXIF
// =============================================================================

/// Decode the EXIF block of a JPEG (APP1 segment) or TIFF file.
///
/// Returns `None` when the file has no readable EXIF data. A record with
/// every field absent means the block was found but none of the recognized
/// tags could be decoded.
pub fn parse_metadata(data: &[u8]) -> Option<ExifRecord> {
    absent_on_error("parse_metadata", try_parse_metadata(data))
}

/// Like [`parse_metadata`], but reports why no record was produced.
pub fn try_parse_metadata(data: &[u8]) -> Result<ExifRecord, MetadataError> {
    match detect_format(data) {
        ImageFormat::Jpeg => walk_directories(find_exif_blob(data)?),
        ImageFormat::Tiff => walk_directories(data),
        ImageFormat::Unknown => Err(MetadataError::UnrecognizedFormat),
        ImageFormat::Png
        | ImageFormat::Webp
        | ImageFormat::Gif
        | ImageFormat::Bmp
        | ImageFormat::Heic => Err(MetadataError::SegmentNotFound("APP1/Exif")),
    }
}

// =============================================================================
// Combined inspection
// =============================================================================

/// Everything readable from one file.
///
/// `dimensions` comes from the container header and `exif.dimensions` from
/// the EXIF tags. They are kept apart because editors often rewrite one
/// without the other.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageInfo {
    pub format: ImageFormat,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<ImageDimensions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exif: Option<ExifRecord>,
}

/// Detect the format, probe the header and decode EXIF in one pass.
///
/// An EXIF block that yields no fields is reported as absent.
pub fn inspect(data: &[u8]) -> ImageInfo {
    let format = detect_format(data);
    let dimensions = if format.is_known() {
        absent_on_error("inspect", dimensions_for_format(data, format))
    } else {
        None
    };
    let exif = parse_metadata(data).filter(|record| !record.is_empty());

    ImageInfo {
        format,
        dimensions,
        exif,
    }
}

fn absent_on_error<T>(operation: &'static str, result: Result<T, MetadataError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(operation, error = %err, "no result");
            None
        }
    }
}
