//! WebP header reading.
//!
//! A WebP file is a RIFF container; the first chunk header sits at byte 12
//! and its payload at byte 20. Three bitstream flavours store the frame size
//! differently:
//!
//! - **`VP8 `** (lossy): frame tag at 20..23, start code `9D 01 2A` at
//!   23..26, then 14-bit width and height fields at 26..28 and 28..30
//!   (little-endian, top two bits are scaling).
//! - **`VP8L`** (lossless): signature `0x2F` at byte 20, then width−1 in the
//!   low 14 bits and height−1 in the next 14 bits of a little-endian word
//!   starting at byte 21.
//! - **`VP8X`** (extended): 24-bit little-endian canvas width−1 at 24..27
//!   and height−1 at 27..30.
//!
//! Stored values in the `VP8 ` fields are taken as dimension−1, the same
//! convention as the other two flavours.

use crate::error::MetadataError;
use crate::exif::ImageDimensions;
use crate::io::{read_bytes, read_u16_le, read_u24_le, read_u32_le};

const CHUNK_TYPE_OFFSET: usize = 12;
const VP8_WIDTH_OFFSET: usize = 26;
const VP8_HEIGHT_OFFSET: usize = 28;
const VP8L_BITS_OFFSET: usize = 21;
const VP8X_WIDTH_OFFSET: usize = 24;
const VP8X_HEIGHT_OFFSET: usize = 27;

/// 14-bit field mask used by both VP8 and VP8L headers.
const DIMENSION_MASK: u32 = 0x3FFF;

/// Read the frame size of a WebP image.
pub fn webp_dimensions(data: &[u8]) -> Result<ImageDimensions, MetadataError> {
    let chunk = read_bytes(data, CHUNK_TYPE_OFFSET, 4)?;

    match chunk {
        b"VP8 " => {
            let width = read_u16_le(data, VP8_WIDTH_OFFSET)? as u32 & DIMENSION_MASK;
            let height = read_u16_le(data, VP8_HEIGHT_OFFSET)? as u32 & DIMENSION_MASK;
            Ok(ImageDimensions::new(width + 1, height + 1))
        }
        b"VP8L" => {
            let bits = read_u32_le(data, VP8L_BITS_OFFSET)?;
            let width = (bits & DIMENSION_MASK) + 1;
            let height = ((bits >> 14) & DIMENSION_MASK) + 1;
            Ok(ImageDimensions::new(width, height))
        }
        b"VP8X" => {
            let width = read_u24_le(data, VP8X_WIDTH_OFFSET)? + 1;
            let height = read_u24_le(data, VP8X_HEIGHT_OFFSET)? + 1;
            Ok(ImageDimensions::new(width, height))
        }
        _ => Err(MetadataError::SegmentNotFound("VP8/VP8L/VP8X chunk")),
    }
}
