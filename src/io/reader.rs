//! Bounds-checked primitive readers over an immutable byte slice.
//!
//! Every read takes an absolute offset and returns
//! [`MetadataError::TruncatedBuffer`] when the requested range does not fit,
//! so a crafted length or offset can never index past the buffer.

use crate::error::MetadataError;

// =============================================================================
// Raw slices
// =============================================================================

/// Borrow `len` bytes starting at `offset`.
#[inline]
pub fn read_bytes(data: &[u8], offset: usize, len: usize) -> Result<&[u8], MetadataError> {
    offset
        .checked_add(len)
        .and_then(|end| data.get(offset..end))
        .ok_or(MetadataError::TruncatedBuffer {
            offset,
            requested: len,
            size: data.len(),
        })
}

/// Read `N` bytes into a fixed-size array.
#[inline]
fn read_array<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N], MetadataError> {
    let mut out = [0u8; N];
    out.copy_from_slice(read_bytes(data, offset, N)?);
    Ok(out)
}

/// Read a single byte.
#[inline]
pub fn read_u8(data: &[u8], offset: usize) -> Result<u8, MetadataError> {
    data.get(offset).copied().ok_or(MetadataError::TruncatedBuffer {
        offset,
        requested: 1,
        size: data.len(),
    })
}

// =============================================================================
// Fixed-endian helpers
// =============================================================================
//
// Container headers have a fixed byte order (JPEG and PNG are big-endian,
// RIFF/WebP is little-endian). TIFF blobs declare theirs, see `ByteOrder`.

/// Read a big-endian u16.
#[inline]
pub fn read_u16_be(data: &[u8], offset: usize) -> Result<u16, MetadataError> {
    read_array(data, offset).map(u16::from_be_bytes)
}

/// Read a little-endian u16.
#[inline]
pub fn read_u16_le(data: &[u8], offset: usize) -> Result<u16, MetadataError> {
    read_array(data, offset).map(u16::from_le_bytes)
}

/// Read a big-endian u32.
#[inline]
pub fn read_u32_be(data: &[u8], offset: usize) -> Result<u32, MetadataError> {
    read_array(data, offset).map(u32::from_be_bytes)
}

/// Read a little-endian u32.
#[inline]
pub fn read_u32_le(data: &[u8], offset: usize) -> Result<u32, MetadataError> {
    read_array(data, offset).map(u32::from_le_bytes)
}

/// Read a little-endian 24-bit unsigned integer.
#[inline]
pub fn read_u24_le(data: &[u8], offset: usize) -> Result<u32, MetadataError> {
    let [b0, b1, b2] = read_array::<3>(data, offset)?;
    Ok(u32::from_le_bytes([b0, b1, b2, 0]))
}

// =============================================================================
// ByteOrder
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: [u8; 2] = *b"II";

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: [u8; 2] = *b"MM";

/// Byte order (endianness) of a TIFF blob.
///
/// Decided once from the first two bytes of the blob and then applied to
/// every read inside it, nested directories included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Determine the byte order from the first two bytes of a TIFF blob.
    pub fn detect(data: &[u8]) -> Result<Self, MetadataError> {
        let magic = read_array::<2>(data, 0)?;
        match magic {
            BYTE_ORDER_LITTLE_ENDIAN => Ok(ByteOrder::LittleEndian),
            BYTE_ORDER_BIG_ENDIAN => Ok(ByteOrder::BigEndian),
            _ => Err(MetadataError::InvalidByteOrder(u16::from_be_bytes(magic))),
        }
    }

    /// Read a u16 at `offset` using this byte order.
    #[inline]
    pub fn read_u16(self, data: &[u8], offset: usize) -> Result<u16, MetadataError> {
        match self {
            ByteOrder::LittleEndian => read_u16_le(data, offset),
            ByteOrder::BigEndian => read_u16_be(data, offset),
        }
    }

    /// Read a u32 at `offset` using this byte order.
    #[inline]
    pub fn read_u32(self, data: &[u8], offset: usize) -> Result<u32, MetadataError> {
        match self {
            ByteOrder::LittleEndian => read_u32_le(data, offset),
            ByteOrder::BigEndian => read_u32_be(data, offset),
        }
    }

    /// Read an unsigned RATIONAL (two u32: numerator, denominator).
    ///
    /// A zero denominator yields `0.0`.
    pub fn read_rational(self, data: &[u8], offset: usize) -> Result<f64, MetadataError> {
        let numerator = self.read_u32(data, offset)?;
        let denominator = self.read_u32(data, offset.saturating_add(4))?;
        Ok(ratio(numerator as f64, denominator as f64))
    }

    /// Read a signed SRATIONAL (two i32).
    ///
    /// A zero denominator yields `0.0`.
    pub fn read_srational(self, data: &[u8], offset: usize) -> Result<f64, MetadataError> {
        let numerator = self.read_u32(data, offset)? as i32;
        let denominator = self.read_u32(data, offset.saturating_add(4))? as i32;
        Ok(ratio(numerator as f64, denominator as f64))
    }
}

#[inline]
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

// =============================================================================
// Tests
// =============================================================================
