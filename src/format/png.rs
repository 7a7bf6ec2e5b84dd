//! PNG header reading.
//!
//! The IHDR chunk must come first, so its fields sit at fixed offsets:
//!
//! ```text
//! Bytes 0-7:   signature 89 50 4E 47 0D 0A 1A 0A
//! Bytes 8-11:  chunk length (13)
//! Bytes 12-15: "IHDR"
//! Bytes 16-19: width  (u32 big-endian)
//! Bytes 20-23: height (u32 big-endian)
//! ```

use crate::error::MetadataError;
use crate::exif::ImageDimensions;
use crate::io::read_u32_be;

const WIDTH_OFFSET: usize = 16;
const HEIGHT_OFFSET: usize = 20;

/// Read width and height from the IHDR chunk.
pub fn png_dimensions(data: &[u8]) -> Result<ImageDimensions, MetadataError> {
    let width = read_u32_be(data, WIDTH_OFFSET)?;
    let height = read_u32_be(data, HEIGHT_OFFSET)?;
    Ok(ImageDimensions::new(width, height))
}
