//! TIFF tag value reading.
//!
//! Values are stored either inline in the entry (when `type size × count`
//! is at most 4 bytes) or at an offset into the blob. [`ValueReader`]
//! resolves that once in [`ValueReader::value_bytes`] and every typed read
//! goes through it, so each read is bounds-checked against the blob.

use crate::error::MetadataError;
use crate::io::{read_bytes, ByteOrder};

use super::parser::IfdEntry;
use super::tags::FieldType;

// =============================================================================
// ValueReader
// =============================================================================

/// Reads tag values out of a TIFF blob.
#[derive(Debug, Clone, Copy)]
pub struct ValueReader<'a> {
    data: &'a [u8],
    byte_order: ByteOrder,
}

impl<'a> ValueReader<'a> {
    /// Create a new ValueReader over a TIFF blob.
    pub fn new(data: &'a [u8], byte_order: ByteOrder) -> Self {
        Self { data, byte_order }
    }

    /// Borrow the raw bytes of an entry's value.
    ///
    /// For inline values this is the entry's own value field, for the rest
    /// it is `count × size` bytes at the stored offset.
    pub fn value_bytes(&self, entry: &IfdEntry) -> Result<&'a [u8], MetadataError> {
        let field_type = field_type(entry)?;

        let size = (field_type.size_in_bytes() as u64) * (entry.count as u64);
        let size = usize::try_from(size).map_err(|_| skip(entry, "value size overflows"))?;

        let start = if entry.is_inline() {
            entry.value_field_position()
        } else {
            entry.value_offset as usize
        };

        read_bytes(self.data, start, size)
    }

    /// Read a text value, dropping trailing NUL bytes.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn read_string(&self, entry: &IfdEntry) -> Result<String, MetadataError> {
        let field_type = field_type(entry)?;
        if !field_type.is_textual() {
            return Err(unexpected_type(entry, field_type, "ASCII"));
        }

        let bytes = self.value_bytes(entry)?;
        let text = String::from_utf8_lossy(bytes);
        Ok(text.trim_end_matches('\0').to_string())
    }

    /// Read the first value as u8.
    pub fn read_u8(&self, entry: &IfdEntry) -> Result<u8, MetadataError> {
        let field_type = field_type(entry)?;
        let bytes = self.first_value(entry)?;
        match field_type {
            FieldType::Byte | FieldType::Undefined => Ok(bytes[0]),
            FieldType::Short => u8::try_from(self.byte_order.read_u16(bytes, 0)?)
                .map_err(|_| skip(entry, "value does not fit in u8")),
            other => Err(unexpected_type(entry, other, "BYTE")),
        }
    }

    /// Read the first value as u16.
    ///
    /// Accepts BYTE, SHORT, and LONG values that fit.
    pub fn read_u16(&self, entry: &IfdEntry) -> Result<u16, MetadataError> {
        let field_type = field_type(entry)?;
        let bytes = self.first_value(entry)?;
        match field_type {
            FieldType::Byte => Ok(bytes[0] as u16),
            FieldType::Short => self.byte_order.read_u16(bytes, 0),
            FieldType::Long => u16::try_from(self.byte_order.read_u32(bytes, 0)?)
                .map_err(|_| skip(entry, "value does not fit in u16")),
            other => Err(unexpected_type(entry, other, "SHORT")),
        }
    }

    /// Read the first value as u32.
    ///
    /// Accepts BYTE, SHORT, LONG, and IFD values.
    pub fn read_u32(&self, entry: &IfdEntry) -> Result<u32, MetadataError> {
        let field_type = field_type(entry)?;
        let bytes = self.first_value(entry)?;
        match field_type {
            FieldType::Byte => Ok(bytes[0] as u32),
            FieldType::Short => self.byte_order.read_u16(bytes, 0).map(u32::from),
            FieldType::Long | FieldType::Ifd => self.byte_order.read_u32(bytes, 0),
            other => Err(unexpected_type(entry, other, "LONG")),
        }
    }

    /// Read the first value as a rational number.
    pub fn read_rational(&self, entry: &IfdEntry) -> Result<f64, MetadataError> {
        let [value] = self.read_rationals::<1>(entry)?;
        Ok(value)
    }

    /// Read the first `N` values of a RATIONAL or SRATIONAL entry.
    pub fn read_rationals<const N: usize>(
        &self,
        entry: &IfdEntry,
    ) -> Result<[f64; N], MetadataError> {
        let field_type = field_type(entry)?;
        if (entry.count as usize) < N {
            return Err(skip(entry, "too few values"));
        }

        let bytes = self.value_bytes(entry)?;
        let mut values = [0.0; N];
        for (index, value) in values.iter_mut().enumerate() {
            let offset = index * 8;
            *value = match field_type {
                FieldType::Rational => self.byte_order.read_rational(bytes, offset)?,
                FieldType::SRational => self.byte_order.read_srational(bytes, offset)?,
                other => return Err(unexpected_type(entry, other, "RATIONAL")),
            };
        }
        Ok(values)
    }

    /// Bytes of the first value, rejecting empty entries.
    fn first_value(&self, entry: &IfdEntry) -> Result<&'a [u8], MetadataError> {
        if entry.count == 0 {
            return Err(skip(entry, "entry has no values"));
        }
        let field_type = field_type(entry)?;
        let bytes = self.value_bytes(entry)?;
        read_bytes(bytes, 0, field_type.size_in_bytes())
    }
}

// =============================================================================
// Error helpers
// =============================================================================

fn field_type(entry: &IfdEntry) -> Result<FieldType, MetadataError> {
    entry.field_type.ok_or_else(|| MetadataError::TagDecodeSkipped {
        tag: entry.tag,
        reason: format!("unknown field type {}", entry.field_type_raw),
    })
}

fn skip(entry: &IfdEntry, reason: &str) -> MetadataError {
    MetadataError::TagDecodeSkipped {
        tag: entry.tag,
        reason: reason.to_string(),
    }
}

fn unexpected_type(entry: &IfdEntry, actual: FieldType, expected: &str) -> MetadataError {
    MetadataError::TagDecodeSkipped {
        tag: entry.tag,
        reason: format!("expected {expected}, got {actual:?}"),
    }
}

// =============================================================================
// Tests
// =============================================================================
