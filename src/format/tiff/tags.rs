//! TIFF field types and the tag tables understood by the EXIF reader.
//!
//! Each directory kind has its own closed tag enumeration. Decoders match on
//! these exhaustively, so adding a tag means adding a variant here and
//! handling it where the compiler points.

// =============================================================================
// TIFF Field Types
// =============================================================================

/// TIFF field types that determine how values are encoded.
///
/// The size of a type times the entry count decides whether the value fits
/// in the 4-byte value field of the entry or lives at an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 8-bit integer
    Byte = 1,

    /// 8-bit ASCII character, NUL terminated
    Ascii = 2,

    /// Unsigned 16-bit integer
    Short = 3,

    /// Unsigned 32-bit integer
    Long = 4,

    /// Two Longs: numerator, denominator
    Rational = 5,

    /// Signed 8-bit integer
    SByte = 6,

    /// Opaque byte
    Undefined = 7,

    /// Signed 16-bit integer
    SShort = 8,

    /// Signed 32-bit integer
    SLong = 9,

    /// Two SLongs: numerator, denominator
    SRational = 10,

    /// IEEE single precision
    Float = 11,

    /// IEEE double precision
    Double = 12,

    /// 32-bit offset to a sub-directory
    Ifd = 13,
}

impl FieldType {
    /// Size of a single value of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::SByte | FieldType::Undefined => 1,
            FieldType::Short | FieldType::SShort => 2,
            FieldType::Long | FieldType::SLong | FieldType::Float | FieldType::Ifd => 4,
            FieldType::Rational | FieldType::SRational | FieldType::Double => 8,
        }
    }

    /// Create a FieldType from its numeric value.
    ///
    /// Returns `None` for unknown type values; such entries are skipped.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FieldType::Byte),
            2 => Some(FieldType::Ascii),
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            6 => Some(FieldType::SByte),
            7 => Some(FieldType::Undefined),
            8 => Some(FieldType::SShort),
            9 => Some(FieldType::SLong),
            10 => Some(FieldType::SRational),
            11 => Some(FieldType::Float),
            12 => Some(FieldType::Double),
            13 => Some(FieldType::Ifd),
            _ => None,
        }
    }

    /// Maximum bytes stored inline in a classic TIFF entry.
    pub const INLINE_THRESHOLD: usize = 4;

    /// Check if `count` values of this type fit in the entry itself.
    #[inline]
    pub fn fits_inline(self, count: u32) -> bool {
        (self.size_in_bytes() as u64) * (count as u64) <= Self::INLINE_THRESHOLD as u64
    }

    /// Whether values of this type are one byte each and can be read as text.
    #[inline]
    pub const fn is_textual(self) -> bool {
        matches!(self, FieldType::Ascii | FieldType::Byte | FieldType::Undefined)
    }
}

// =============================================================================
// Primary IFD (IFD0 and chained IFDs)
// =============================================================================

/// Tags recognized in the primary directory chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum PrimaryTag {
    /// Image width in pixels
    ImageWidth = 0x0100,

    /// Image height (length) in pixels
    ImageHeight = 0x0101,

    /// Camera manufacturer
    Make = 0x010F,

    /// Camera model
    Model = 0x0110,

    /// "YYYY:MM:DD HH:MM:SS"
    DateTime = 0x0132,

    /// Offset of the Exif sub-directory
    ExifIfdPointer = 0x8769,

    /// Offset of the GPS sub-directory
    GpsIfdPointer = 0x8825,
}

impl PrimaryTag {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0100 => Some(PrimaryTag::ImageWidth),
            0x0101 => Some(PrimaryTag::ImageHeight),
            0x010F => Some(PrimaryTag::Make),
            0x0110 => Some(PrimaryTag::Model),
            0x0132 => Some(PrimaryTag::DateTime),
            0x8769 => Some(PrimaryTag::ExifIfdPointer),
            0x8825 => Some(PrimaryTag::GpsIfdPointer),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

// =============================================================================
// Exif sub-IFD
// =============================================================================

/// Tags recognized in the Exif sub-directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ExifTag {
    /// Exposure time in seconds (RATIONAL)
    ExposureTime = 0x829A,

    /// F-number (RATIONAL)
    FNumber = 0x829D,

    /// ISO speed rating (SHORT)
    IsoSpeed = 0x8827,

    /// Lens focal length in millimetres (RATIONAL)
    FocalLength = 0x920A,

    /// 35mm-equivalent focal length (SHORT), 0 if unknown
    FocalLengthIn35mmFilm = 0xA405,

    /// Lens model name (ASCII)
    LensModel = 0xA434,
}

impl ExifTag {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x829A => Some(ExifTag::ExposureTime),
            0x829D => Some(ExifTag::FNumber),
            0x8827 => Some(ExifTag::IsoSpeed),
            0x920A => Some(ExifTag::FocalLength),
            0xA405 => Some(ExifTag::FocalLengthIn35mmFilm),
            0xA434 => Some(ExifTag::LensModel),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

// =============================================================================
// GPS sub-IFD
// =============================================================================

/// Tags recognized in the GPS sub-directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum GpsTag {
    /// "N" or "S"
    LatitudeRef = 0x0001,

    /// Degrees, minutes, seconds (3 × RATIONAL)
    Latitude = 0x0002,

    /// "E" or "W"
    LongitudeRef = 0x0003,

    /// Degrees, minutes, seconds (3 × RATIONAL)
    Longitude = 0x0004,

    /// 0 = above sea level, 1 = below (BYTE)
    AltitudeRef = 0x0005,

    /// Metres (RATIONAL)
    Altitude = 0x0006,
}

impl GpsTag {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0001 => Some(GpsTag::LatitudeRef),
            0x0002 => Some(GpsTag::Latitude),
            0x0003 => Some(GpsTag::LongitudeRef),
            0x0004 => Some(GpsTag::Longitude),
            0x0005 => Some(GpsTag::AltitudeRef),
            0x0006 => Some(GpsTag::Altitude),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

// =============================================================================
// Tests
// =============================================================================
