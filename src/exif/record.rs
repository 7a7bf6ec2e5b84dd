//! Output records.
//!
//! These are the values handed back to callers. Optional fields are left out
//! of the serialized form entirely rather than written as `null`.

use serde::Serialize;

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Exposure settings, already formatted for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso: Option<u16>,

    /// `"f/2.8"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aperture: Option<String>,

    /// `"1/250"` or `"2s"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shutter_speed: Option<String>,

    /// `"50mm"`, the 35mm equivalent when the camera records one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focal_length: Option<String>,
}

impl CameraSettings {
    /// True when no field was decoded.
    pub fn is_empty(&self) -> bool {
        self.iso.is_none()
            && self.aperture.is_none()
            && self.shutter_speed.is_none()
            && self.focal_length.is_none()
    }
}

/// Signed decimal-degree position. South and west are negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GpsCoordinate {
    pub latitude: f64,
    pub longitude: f64,

    /// Metres, negative below sea level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}

/// Metadata decoded from an EXIF block.
///
/// `dimensions` here comes from the ImageWidth/ImageHeight tags and can
/// disagree with what the container header says. The two are reported
/// separately (see [`crate::ImageInfo`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExifRecord {
    /// `"<Make> <Model>"`, or whichever of the two is present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lens: Option<String>,

    /// DateTime tag verbatim, usually `"YYYY:MM:DD HH:MM:SS"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_taken: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<CameraSettings>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps: Option<GpsCoordinate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<ImageDimensions>,
}

impl ExifRecord {
    /// True when no field was decoded.
    pub fn is_empty(&self) -> bool {
        self == &ExifRecord::default()
    }
}
