//! JPEG marker-segment scanning.
//!
//! A JPEG stream is SOI (`FF D8`) followed by marker segments. Each segment
//! is `FF <marker>` and, for most markers, a 2-byte big-endian length that
//! counts itself plus the payload:
//!
//! ```text
//! FF C0 | 00 11 | 08 | 02 58 | 03 20 | ...
//! marker  length  P    height  width
//! ```
//!
//! Two lookups share the same traversal ([`JpegSegments`]):
//!
//! - **Dimensions**: the first Start-Of-Frame segment carries the frame size.
//! - **EXIF**: the first APP1 segment whose payload starts with
//!   `Exif\0\0` carries a complete TIFF blob.
//!
//! Scanning stops at SOS (entropy-coded data follows) and at EOI.

use crate::error::MetadataError;
use crate::exif::ImageDimensions;
use crate::io::{read_bytes, read_u16_be};

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// End Of Image marker byte
pub const EOI: u8 = 0xD9;

/// Start Of Scan marker byte
pub const SOS: u8 = 0xDA;

/// Application segment 1 (EXIF, XMP) marker byte
pub const APP1: u8 = 0xE1;

/// Signature at the start of an EXIF APP1 payload
pub const EXIF_SIGNATURE: &[u8; 6] = b"Exif\0\0";

/// Check whether a marker byte starts a frame header.
///
/// Every SOFn shares the same layout; C4 (DHT), C8 (JPG) and CC (DAC) are
/// not frames.
#[inline]
pub const fn is_sof(marker: u8) -> bool {
    matches!(
        marker,
        0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF
    )
}

/// Markers that stand alone without a length field (TEM, RSTn, SOI).
#[inline]
const fn is_standalone(marker: u8) -> bool {
    matches!(marker, 0x01 | 0xD0..=0xD8)
}

// =============================================================================
// Segment iteration
// =============================================================================

/// A marker segment located inside a JPEG buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Marker byte (the byte after `FF`)
    pub marker: u8,

    /// Payload after the length field
    pub payload: &'a [u8],
}

/// Iterator over the marker segments of a JPEG buffer.
///
/// Starts right after SOI. Yields `Err` once and then stops if a segment
/// is malformed or runs past the end of the buffer. Ends quietly at SOS,
/// EOI, or when the bytes at the cursor are not a marker.
pub struct JpegSegments<'a> {
    data: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> JpegSegments<'a> {
    /// Create an iterator over `data`, which must start with SOI.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: SOI.len(),
            done: !data.starts_with(&SOI),
        }
    }

    fn next_segment(&mut self) -> Result<Option<Segment<'a>>, MetadataError> {
        loop {
            if self.data.get(self.pos) != Some(&0xFF) {
                return Ok(None);
            }

            // Skip fill bytes between markers
            let mut marker_pos = self.pos + 1;
            while self.data.get(marker_pos) == Some(&0xFF) {
                marker_pos += 1;
            }
            let Some(&marker) = self.data.get(marker_pos) else {
                return Ok(None);
            };
            if marker == EOI || marker == SOS {
                return Ok(None);
            }

            if is_standalone(marker) {
                self.pos = marker_pos + 1;
                continue;
            }

            let length = read_u16_be(self.data, marker_pos + 1)? as usize;
            if length < 2 {
                return Err(MetadataError::SegmentNotFound("valid segment length"));
            }
            let payload = read_bytes(self.data, marker_pos + 3, length - 2)?;
            self.pos = marker_pos + 1 + length;

            return Ok(Some(Segment { marker, payload }));
        }
    }
}

impl<'a> Iterator for JpegSegments<'a> {
    type Item = Result<Segment<'a>, MetadataError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_segment() {
            Ok(Some(segment)) => Some(Ok(segment)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

// =============================================================================
// Dimensions
// =============================================================================

/// Read the frame size from the first Start-Of-Frame segment.
///
/// SOF payload layout: precision (1), height (2), width (2), components...
pub fn jpeg_dimensions(data: &[u8]) -> Result<ImageDimensions, MetadataError> {
    for segment in JpegSegments::new(data) {
        let segment = segment?;
        if is_sof(segment.marker) {
            let height = read_u16_be(segment.payload, 1)?;
            let width = read_u16_be(segment.payload, 3)?;
            return Ok(ImageDimensions::new(width as u32, height as u32));
        }
    }
    Err(MetadataError::SegmentNotFound("SOF"))
}

// =============================================================================
// EXIF location
// =============================================================================

/// Locate the TIFF blob embedded in the first APP1/Exif segment.
///
/// APP1 segments carrying other payloads (XMP) are skipped. The returned
/// slice starts at the TIFF byte-order mark.
pub fn find_exif_blob(data: &[u8]) -> Result<&[u8], MetadataError> {
    for segment in JpegSegments::new(data) {
        let segment = segment?;
        if segment.marker == APP1 && segment.payload.starts_with(EXIF_SIGNATURE) {
            return Ok(&segment.payload[EXIF_SIGNATURE.len()..]);
        }
    }
    Err(MetadataError::SegmentNotFound("APP1/Exif"))
}

// =============================================================================
// Tests
// =============================================================================
