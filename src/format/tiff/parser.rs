//! TIFF header and directory parsing.
//!
//! All offsets are relative to the start of the TIFF blob (for EXIF, the
//! byte right after `Exif\0\0`).
//!
//! # Header (8 bytes)
//! ```text
//! Bytes 0-1: Byte order ("II" = little-endian, "MM" = big-endian)
//! Bytes 2-3: Version (42)
//! Bytes 4-7: Offset to first IFD
//! ```
//!
//! # IFD
//! ```text
//! 2 bytes:       entry count N
//! N × 12 bytes:  tag (2) | type (2) | count (4) | value or offset (4)
//! 4 bytes:       offset of next IFD (0 = end of chain)
//! ```

use tracing::trace;

use crate::error::MetadataError;
use crate::io::ByteOrder;

use super::tags::FieldType;

// =============================================================================
// Constants
// =============================================================================

/// Size of classic TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

/// Size of one IFD entry in bytes
pub const IFD_ENTRY_SIZE: usize = 12;

/// Size of the entry count field at the start of an IFD
const IFD_COUNT_SIZE: usize = 2;

/// Offset of the value/offset field within an entry
const VALUE_FIELD_OFFSET: usize = 8;

/// Version number for classic TIFF
const VERSION_TIFF: u16 = 42;

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for every multi-byte value in the blob
    pub byte_order: ByteOrder,

    /// Offset to the first IFD
    pub first_ifd_offset: u32,
}

impl TiffHeader {
    /// Parse the header at the start of a TIFF blob.
    ///
    /// # Errors
    /// - `InvalidByteOrder` if bytes 0-1 are not II or MM
    /// - `TruncatedBuffer` if the header or the first IFD offset lies
    ///   outside the blob
    pub fn parse(data: &[u8]) -> Result<Self, MetadataError> {
        let byte_order = ByteOrder::detect(data)?;

        let version = byte_order.read_u16(data, 2)?;
        if version != VERSION_TIFF {
            // Some writers use a different magic; the directory layout is the same
            trace!(version, "unexpected TIFF version");
        }

        let first_ifd_offset = byte_order.read_u32(data, 4)?;
        if first_ifd_offset as usize >= data.len() {
            return Err(MetadataError::TruncatedBuffer {
                offset: first_ifd_offset as usize,
                requested: IFD_COUNT_SIZE,
                size: data.len(),
            });
        }

        Ok(TiffHeader {
            byte_order,
            first_ifd_offset,
        })
    }
}

// =============================================================================
// IfdEntry
// =============================================================================

/// A single 12-byte directory entry.
///
/// The value field is kept as the raw u32; whether it is the value itself or
/// an offset depends on the field type and count (see
/// [`IfdEntry::is_inline`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfdEntry {
    /// Tag identifier
    pub tag: u16,

    /// Parsed field type, `None` if the raw value is unknown
    pub field_type: Option<FieldType>,

    /// Raw field type as stored
    pub field_type_raw: u16,

    /// Number of values
    pub count: u32,

    /// Value (if inline) or offset to the value
    pub value_offset: u32,

    /// Absolute position of the entry within the blob
    pub entry_offset: usize,
}

impl IfdEntry {
    /// Parse the entry starting at `offset`.
    pub fn parse(data: &[u8], offset: usize, byte_order: ByteOrder) -> Result<Self, MetadataError> {
        let tag = byte_order.read_u16(data, offset)?;
        let field_type_raw = byte_order.read_u16(data, offset + 2)?;
        let count = byte_order.read_u32(data, offset + 4)?;
        let value_offset = byte_order.read_u32(data, offset + VALUE_FIELD_OFFSET)?;

        Ok(IfdEntry {
            tag,
            field_type: FieldType::from_u16(field_type_raw),
            field_type_raw,
            count,
            value_offset,
            entry_offset: offset,
        })
    }

    /// Whether the value is stored in the entry's own 4-byte field.
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.field_type
            .map(|t| t.fits_inline(self.count))
            .unwrap_or(false)
    }

    /// Absolute position of the 4-byte value field of this entry.
    #[inline]
    pub fn value_field_position(&self) -> usize {
        self.entry_offset + VALUE_FIELD_OFFSET
    }
}

// =============================================================================
// Ifd
// =============================================================================

/// One parsed Image File Directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ifd {
    /// Offset this directory was read from
    pub offset: u32,

    /// Entries that could be read in full
    pub entries: Vec<IfdEntry>,

    /// Offset of the next IFD, `None` at the end of the chain or if the
    /// pointer itself could not be read
    pub next_ifd_offset: Option<u32>,

    /// Whether the buffer ended before all declared entries were read
    pub truncated: bool,
}

impl Ifd {
    /// Parse the directory at `offset`.
    ///
    /// Only a missing entry count is an error. A directory cut short keeps
    /// the entries that precede the cut and reports `truncated`.
    pub fn parse(data: &[u8], offset: u32, byte_order: ByteOrder) -> Result<Self, MetadataError> {
        let start = offset as usize;
        let entry_count = byte_order.read_u16(data, start)? as usize;

        let mut entries = Vec::with_capacity(entry_count.min(data.len() / IFD_ENTRY_SIZE));
        let mut truncated = false;

        for index in 0..entry_count {
            let entry_offset = start + IFD_COUNT_SIZE + index * IFD_ENTRY_SIZE;
            match IfdEntry::parse(data, entry_offset, byte_order) {
                Ok(entry) => entries.push(entry),
                Err(_) => {
                    truncated = true;
                    break;
                }
            }
        }

        let next_ifd_offset = if truncated {
            None
        } else {
            let next_pos = start + IFD_COUNT_SIZE + entry_count * IFD_ENTRY_SIZE;
            byte_order
                .read_u32(data, next_pos)
                .ok()
                .filter(|&next| next != 0)
        };

        trace!(
            offset,
            entries = entries.len(),
            declared = entry_count,
            truncated,
            "parsed IFD"
        );

        Ok(Ifd {
            offset,
            entries,
            next_ifd_offset,
            truncated,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
