use thiserror::Error;

/// Errors that can occur while reading image headers and EXIF metadata.
///
/// None of these are fatal to the caller: the `Option`-returning entry points
/// in the crate root turn every variant into an absent result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetadataError {
    /// Magic bytes did not match any supported container
    #[error("Unrecognized image format")]
    UnrecognizedFormat,

    /// A required structure (SOF, APP1/Exif, IHDR, VP8 chunk) was not found
    #[error("Segment not found: {0}")]
    SegmentNotFound(&'static str),

    /// An offset or length points past the end of the buffer
    #[error("Buffer truncated: requested {requested} bytes at offset {offset}, size is {size}")]
    TruncatedBuffer {
        offset: usize,
        requested: usize,
        size: usize,
    },

    /// TIFF blob does not start with II or MM
    #[error("Invalid TIFF byte order: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidByteOrder(u16),

    /// A single tag could not be decoded; the walk continues without it
    #[error("Skipped tag 0x{tag:04X}: {reason}")]
    TagDecodeSkipped { tag: u16, reason: String },
}

impl MetadataError {
    /// Wrap any error raised while decoding one tag's value.
    pub(crate) fn skipped(tag: u16, source: MetadataError) -> Self {
        match source {
            MetadataError::TagDecodeSkipped { .. } => source,
            other => MetadataError::TagDecodeSkipped {
                tag,
                reason: other.to_string(),
            },
        }
    }
}
