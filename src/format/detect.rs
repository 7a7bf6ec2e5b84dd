//! Container detection from magic bytes.
//!
//! Classification looks only at a fixed prefix of the buffer:
//!
//! - **JPEG**: `FF D8`
//! - **PNG**: `89 50 4E 47`
//! - **WebP**: `RIFF` container with `WEBP` at bytes 8-11
//! - **GIF**: `47 49 46` ("GIF")
//! - **BMP**: `42 4D` ("BM")
//! - **TIFF**: `II` or `MM` at offset 0
//! - **HEIC**: `ftyp` box at offset 4 with brand heic/heix/hevc/hevx
//!
//! Buffers shorter than [`MIN_DETECT_BYTES`] are always [`ImageFormat::Unknown`].

use serde::Serialize;

// =============================================================================
// ImageFormat
// =============================================================================

/// Detected image container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Webp,
    Gif,
    Bmp,
    Tiff,
    Heic,
    Unknown,
}

impl ImageFormat {
    /// Lowercase short name, as used in file extensions and JSON output.
    pub const fn name(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
            ImageFormat::Webp => "webp",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Tiff => "tiff",
            ImageFormat::Heic => "heic",
            ImageFormat::Unknown => "unknown",
        }
    }

    /// Whether the buffer was classified at all.
    #[inline]
    pub const fn is_known(&self) -> bool {
        !matches!(self, ImageFormat::Unknown)
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Format Detection
// =============================================================================

/// Minimum bytes needed for reliable classification.
pub const MIN_DETECT_BYTES: usize = 12;

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8];
const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G'];
const WEBP_MARKER: &[u8] = b"WEBP";
const GIF_MAGIC: &[u8] = b"GIF";
const BMP_MAGIC: &[u8] = b"BM";
const TIFF_LE_MAGIC: &[u8] = b"II";
const TIFF_BE_MAGIC: &[u8] = b"MM";
const FTYP_MARKER: &[u8] = b"ftyp";

/// ISO-BMFF major brands that identify a HEIC/HEIF still image.
const HEIC_BRANDS: [&[u8]; 4] = [b"heic", b"heix", b"hevc", b"hevx"];

/// Classify a buffer by its magic bytes.
///
/// This is a pure function of the first [`MIN_DETECT_BYTES`] bytes and
/// never fails: anything unrecognized is [`ImageFormat::Unknown`].
///
/// Checks run in a fixed order so that overlapping signatures resolve
/// deterministically (a RIFF/WEBP file is never mistaken for anything else,
/// and "BM" is only tested after the more specific magics).
pub fn detect_format(data: &[u8]) -> ImageFormat {
    if data.len() < MIN_DETECT_BYTES {
        return ImageFormat::Unknown;
    }

    if data.starts_with(JPEG_MAGIC) {
        ImageFormat::Jpeg
    } else if data.starts_with(PNG_MAGIC) {
        ImageFormat::Png
    } else if &data[8..12] == WEBP_MARKER {
        ImageFormat::Webp
    } else if data.starts_with(GIF_MAGIC) {
        ImageFormat::Gif
    } else if data.starts_with(BMP_MAGIC) {
        ImageFormat::Bmp
    } else if data.starts_with(TIFF_LE_MAGIC) || data.starts_with(TIFF_BE_MAGIC) {
        ImageFormat::Tiff
    } else if is_heic(data) {
        ImageFormat::Heic
    } else {
        ImageFormat::Unknown
    }
}

fn is_heic(data: &[u8]) -> bool {
    &data[4..8] == FTYP_MARKER && HEIC_BRANDS.contains(&&data[8..12])
}

// =============================================================================
// Tests
// =============================================================================
