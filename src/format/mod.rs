//! Container-level parsers.
//!
//! Everything here works on the raw encoded bytes of a file:
//!
//! - [`detect`] classifies the container from its magic bytes
//! - [`jpeg`], [`png`] and [`webp`] read frame dimensions from headers
//! - [`jpeg`] also locates the APP1/Exif segment
//! - [`tiff`] walks the TIFF directory structure carried inside EXIF

pub mod detect;
pub mod dimensions;
pub mod jpeg;
pub mod png;
pub mod tiff;
pub mod webp;

pub use detect::{detect_format, ImageFormat, MIN_DETECT_BYTES};
pub use dimensions::dimensions_for_format;
pub use jpeg::{find_exif_blob, JpegSegments, Segment};
