//! Directory traversal.
//!
//! The primary IFD chain is followed through its next pointers, and the
//! Exif and GPS sub-directories are queued when a primary directory points
//! at them. Sub-directories never chain. Traversal uses an explicit
//! work-list with a visited set, capped at [`MAX_DIRECTORIES`].

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::error::MetadataError;
use crate::exif::decode::{
    decode_directory, ExifFragment, GpsFragment, PrimaryFragment, RecordBuilder,
};
use crate::exif::ExifRecord;

use super::parser::{Ifd, TiffHeader};
use super::values::ValueReader;

/// Upper bound on directories parsed from one blob.
pub const MAX_DIRECTORIES: usize = 32;

/// Which tag table applies to a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryKind {
    /// IFD0 and everything chained from it
    Primary,
    /// Sub-directory behind tag 0x8769
    Exif,
    /// Sub-directory behind tag 0x8825
    Gps,
}

/// Walks all directories of a TIFF blob and decodes them into a record.
#[derive(Debug)]
pub struct DirectoryWalker<'a> {
    data: &'a [u8],
    header: TiffHeader,
}

impl<'a> DirectoryWalker<'a> {
    /// Read the header of `data`.
    ///
    /// # Errors
    /// Fails when the blob has no valid TIFF header.
    pub fn new(data: &'a [u8]) -> Result<Self, MetadataError> {
        let header = TiffHeader::parse(data)?;
        Ok(Self { data, header })
    }

    pub fn header(&self) -> &TiffHeader {
        &self.header
    }

    /// Visit every reachable directory and build the record.
    ///
    /// Directories that cannot be read are skipped. The walk fails only when
    /// not a single directory could be parsed, in which case the first error
    /// is returned.
    pub fn walk(&self) -> Result<ExifRecord, MetadataError> {
        let byte_order = self.header.byte_order;
        let reader = ValueReader::new(self.data, byte_order);

        let mut pending = VecDeque::from([(DirectoryKind::Primary, self.header.first_ifd_offset)]);
        let mut visited = HashSet::new();
        let mut builder = RecordBuilder::default();
        let mut parsed = 0usize;
        let mut first_error = None;

        while let Some((kind, offset)) = pending.pop_front() {
            if visited.len() >= MAX_DIRECTORIES {
                debug!(limit = MAX_DIRECTORIES, "directory limit reached");
                break;
            }
            if !visited.insert(offset) {
                debug!(offset, ?kind, "directory already visited, skipping");
                continue;
            }

            let ifd = match Ifd::parse(self.data, offset, byte_order) {
                Ok(ifd) => ifd,
                Err(err) => {
                    debug!(offset, ?kind, error = %err, "unreadable directory");
                    first_error.get_or_insert(err);
                    continue;
                }
            };
            parsed += 1;
            if ifd.truncated {
                debug!(
                    offset,
                    ?kind,
                    entries = ifd.entries.len(),
                    "directory cut short, keeping leading entries"
                );
            }

            match kind {
                DirectoryKind::Primary => {
                    let fragment: PrimaryFragment = decode_directory(&ifd, &reader);
                    if let Some(exif) = fragment.exif_pointer {
                        pending.push_back((DirectoryKind::Exif, exif));
                    }
                    if let Some(gps) = fragment.gps_pointer {
                        pending.push_back((DirectoryKind::Gps, gps));
                    }
                    if let Some(next) = ifd.next_ifd_offset {
                        pending.push_back((DirectoryKind::Primary, next));
                    }
                    builder.add_primary(fragment);
                }
                DirectoryKind::Exif => {
                    builder.add_exif(decode_directory::<ExifFragment>(&ifd, &reader))
                }
                DirectoryKind::Gps => {
                    builder.add_gps(decode_directory::<GpsFragment>(&ifd, &reader))
                }
            }
        }

        if parsed == 0 {
            return Err(first_error.unwrap_or(MetadataError::SegmentNotFound("IFD")));
        }
        Ok(builder.finish())
    }
}

/// Decode the EXIF record carried by a TIFF blob.
pub fn walk_directories(data: &[u8]) -> Result<ExifRecord, MetadataError> {
    DirectoryWalker::new(data)?.walk()
}

// =============================================================================
// Tests
// =============================================================================
