//! EXIF metadata: output records and tag decoding.
//!
//! The directory walk itself lives in [`crate::format::tiff`]; this module
//! decides what each recognized tag means and how decoded fields turn into
//! an [`ExifRecord`].

pub(crate) mod decode;
mod record;
pub mod units;

pub use record::{CameraSettings, ExifRecord, GpsCoordinate, ImageDimensions};
