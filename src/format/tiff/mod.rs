//! TIFF structure reader for EXIF blobs.
//!
//! EXIF data is a small TIFF file: a header, then a chain of Image File
//! Directories (IFDs) whose entries point at values and at further
//! directories.
//!
//! # Key Concepts
//!
//! - **Byte order**: the blob declares its endianness (II = little-endian,
//!   MM = big-endian) in the first two bytes. Every later read, including
//!   those in sub-directories, uses it.
//!
//! - **Offsets**: every offset is relative to the start of the blob, never
//!   to the start of the enclosing file.
//!
//! - **Inline vs offset values**: values of at most 4 bytes live in the
//!   entry itself, larger ones at an offset the entry points to.
//!
//! - **Untrusted input**: counts and offsets come straight from the file.
//!   All reads are bounds-checked and the directory walk is cycle-guarded
//!   and capped.

mod parser;
mod tags;
mod values;
mod walker;

pub use parser::{Ifd, IfdEntry, TiffHeader, IFD_ENTRY_SIZE, TIFF_HEADER_SIZE};
pub use tags::{ExifTag, FieldType, GpsTag, PrimaryTag};
pub use values::ValueReader;
pub use walker::{walk_directories, DirectoryKind, DirectoryWalker, MAX_DIRECTORIES};
