//! Tag decoding.
//!
//! Each directory kind decodes into its own fragment type. A directory walk
//! step returns a fresh fragment and the walker merges it into a
//! [`RecordBuilder`]; nothing is shared between steps. Merging is
//! first-wins, so IFD0 takes precedence over the thumbnail directory that
//! usually follows it in the chain.

use tracing::debug;

use crate::error::MetadataError;
use crate::format::tiff::{ExifTag, GpsTag, Ifd, IfdEntry, PrimaryTag, ValueReader};

use super::record::{CameraSettings, ExifRecord, GpsCoordinate, ImageDimensions};
use super::units::{dms_to_decimal, format_aperture, format_focal_length, format_shutter_speed};

// =============================================================================
// Fragment trait
// =============================================================================

/// Partial result of decoding one directory.
pub(crate) trait Fragment: Default {
    /// Closed set of tags this directory kind understands.
    type Tag: Copy;

    fn recognize(raw: u16) -> Option<Self::Tag>;

    /// Whether the field behind `tag` already holds a value.
    fn is_set(&self, tag: Self::Tag) -> bool;

    /// Decode one entry into `self`.
    fn decode(
        &mut self,
        tag: Self::Tag,
        entry: &IfdEntry,
        reader: &ValueReader<'_>,
    ) -> Result<(), MetadataError>;

    /// Fill fields still missing in `self` from `later`.
    fn merge(&mut self, later: Self);
}

/// Decode every recognized entry of a directory.
///
/// Unknown tags are ignored and a failing tag is logged and skipped; neither
/// stops the remaining entries from being decoded. A repeated tag whose
/// field is already filled is passed over without reading its value.
pub(crate) fn decode_directory<F: Fragment>(ifd: &Ifd, reader: &ValueReader<'_>) -> F {
    let mut fragment = F::default();
    for entry in &ifd.entries {
        let Some(tag) = F::recognize(entry.tag) else {
            continue;
        };
        if fragment.is_set(tag) {
            continue;
        }
        if let Err(err) = fragment.decode(tag, entry, reader) {
            let err = MetadataError::skipped(entry.tag, err);
            debug!(ifd = ifd.offset, error = %err, "tag skipped");
        }
    }
    fragment
}

/// Keep the first value seen for a field.
fn set_once<T>(slot: &mut Option<T>, value: T) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

fn merge_field<T>(slot: &mut Option<T>, later: Option<T>) {
    if slot.is_none() {
        *slot = later;
    }
}

/// Read a string tag, treating an empty value as absent.
fn read_text(entry: &IfdEntry, reader: &ValueReader<'_>) -> Result<Option<String>, MetadataError> {
    let text = reader.read_string(entry)?;
    Ok(if text.is_empty() { None } else { Some(text) })
}

// =============================================================================
// Primary directory
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PrimaryFragment {
    pub make: Option<String>,
    pub model: Option<String>,
    pub date_time: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub exif_pointer: Option<u32>,
    pub gps_pointer: Option<u32>,
}

impl Fragment for PrimaryFragment {
    type Tag = PrimaryTag;

    fn recognize(raw: u16) -> Option<PrimaryTag> {
        PrimaryTag::from_u16(raw)
    }

    fn is_set(&self, tag: PrimaryTag) -> bool {
        match tag {
            PrimaryTag::Make => self.make.is_some(),
            PrimaryTag::Model => self.model.is_some(),
            PrimaryTag::DateTime => self.date_time.is_some(),
            PrimaryTag::ImageWidth => self.width.is_some(),
            PrimaryTag::ImageHeight => self.height.is_some(),
            PrimaryTag::ExifIfdPointer => self.exif_pointer.is_some(),
            PrimaryTag::GpsIfdPointer => self.gps_pointer.is_some(),
        }
    }

    fn decode(
        &mut self,
        tag: PrimaryTag,
        entry: &IfdEntry,
        reader: &ValueReader<'_>,
    ) -> Result<(), MetadataError> {
        match tag {
            PrimaryTag::Make => {
                if let Some(make) = read_text(entry, reader)? {
                    set_once(&mut self.make, make);
                }
            }
            PrimaryTag::Model => {
                if let Some(model) = read_text(entry, reader)? {
                    set_once(&mut self.model, model);
                }
            }
            PrimaryTag::DateTime => {
                if let Some(date) = read_text(entry, reader)? {
                    set_once(&mut self.date_time, date);
                }
            }
            PrimaryTag::ImageWidth => set_once(&mut self.width, reader.read_u32(entry)?),
            PrimaryTag::ImageHeight => set_once(&mut self.height, reader.read_u32(entry)?),
            PrimaryTag::ExifIfdPointer => set_once(&mut self.exif_pointer, reader.read_u32(entry)?),
            PrimaryTag::GpsIfdPointer => set_once(&mut self.gps_pointer, reader.read_u32(entry)?),
        }
        Ok(())
    }

    fn merge(&mut self, later: Self) {
        merge_field(&mut self.make, later.make);
        merge_field(&mut self.model, later.model);
        merge_field(&mut self.date_time, later.date_time);
        merge_field(&mut self.width, later.width);
        merge_field(&mut self.height, later.height);
        merge_field(&mut self.exif_pointer, later.exif_pointer);
        merge_field(&mut self.gps_pointer, later.gps_pointer);
    }
}

impl PrimaryFragment {
    fn camera(&self) -> Option<String> {
        match (&self.make, &self.model) {
            (Some(make), Some(model)) => Some(format!("{make} {model}")),
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        }
    }

    fn dimensions(&self) -> Option<ImageDimensions> {
        Some(ImageDimensions::new(self.width?, self.height?))
    }
}

// =============================================================================
// Exif sub-directory
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ExifFragment {
    pub iso: Option<u16>,
    pub f_number: Option<f64>,
    pub exposure_time: Option<f64>,
    pub focal_length: Option<f64>,
    pub focal_length_35mm: Option<u16>,
    pub lens: Option<String>,
}

impl Fragment for ExifFragment {
    type Tag = ExifTag;

    fn recognize(raw: u16) -> Option<ExifTag> {
        ExifTag::from_u16(raw)
    }

    fn is_set(&self, tag: ExifTag) -> bool {
        match tag {
            ExifTag::IsoSpeed => self.iso.is_some(),
            ExifTag::FNumber => self.f_number.is_some(),
            ExifTag::ExposureTime => self.exposure_time.is_some(),
            ExifTag::FocalLength => self.focal_length.is_some(),
            ExifTag::FocalLengthIn35mmFilm => self.focal_length_35mm.is_some(),
            ExifTag::LensModel => self.lens.is_some(),
        }
    }

    fn decode(
        &mut self,
        tag: ExifTag,
        entry: &IfdEntry,
        reader: &ValueReader<'_>,
    ) -> Result<(), MetadataError> {
        match tag {
            ExifTag::IsoSpeed => set_once(&mut self.iso, reader.read_u16(entry)?),
            ExifTag::FNumber => set_once(&mut self.f_number, reader.read_rational(entry)?),
            ExifTag::ExposureTime => {
                set_once(&mut self.exposure_time, reader.read_rational(entry)?)
            }
            ExifTag::FocalLength => set_once(&mut self.focal_length, reader.read_rational(entry)?),
            ExifTag::FocalLengthIn35mmFilm => {
                set_once(&mut self.focal_length_35mm, reader.read_u16(entry)?)
            }
            ExifTag::LensModel => {
                if let Some(lens) = read_text(entry, reader)? {
                    set_once(&mut self.lens, lens);
                }
            }
        }
        Ok(())
    }

    fn merge(&mut self, later: Self) {
        merge_field(&mut self.iso, later.iso);
        merge_field(&mut self.f_number, later.f_number);
        merge_field(&mut self.exposure_time, later.exposure_time);
        merge_field(&mut self.focal_length, later.focal_length);
        merge_field(&mut self.focal_length_35mm, later.focal_length_35mm);
        merge_field(&mut self.lens, later.lens);
    }
}

impl ExifFragment {
    fn settings(&self) -> Option<CameraSettings> {
        // A 35mm value of 0 means "unknown"
        let focal_length = match self.focal_length_35mm.filter(|&mm| mm != 0) {
            Some(equivalent) => Some(format!("{equivalent}mm")),
            None => self.focal_length.map(format_focal_length),
        };

        let settings = CameraSettings {
            iso: self.iso,
            aperture: self.f_number.map(format_aperture),
            shutter_speed: self.exposure_time.and_then(format_shutter_speed),
            focal_length,
        };
        (!settings.is_empty()).then_some(settings)
    }
}

// =============================================================================
// GPS sub-directory
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct GpsFragment {
    pub latitude_ref: Option<String>,
    pub latitude: Option<[f64; 3]>,
    pub longitude_ref: Option<String>,
    pub longitude: Option<[f64; 3]>,
    pub altitude_ref: Option<u8>,
    pub altitude: Option<f64>,
}

impl Fragment for GpsFragment {
    type Tag = GpsTag;

    fn recognize(raw: u16) -> Option<GpsTag> {
        GpsTag::from_u16(raw)
    }

    fn is_set(&self, tag: GpsTag) -> bool {
        match tag {
            GpsTag::LatitudeRef => self.latitude_ref.is_some(),
            GpsTag::LongitudeRef => self.longitude_ref.is_some(),
            GpsTag::Latitude => self.latitude.is_some(),
            GpsTag::Longitude => self.longitude.is_some(),
            GpsTag::AltitudeRef => self.altitude_ref.is_some(),
            GpsTag::Altitude => self.altitude.is_some(),
        }
    }

    fn decode(
        &mut self,
        tag: GpsTag,
        entry: &IfdEntry,
        reader: &ValueReader<'_>,
    ) -> Result<(), MetadataError> {
        match tag {
            GpsTag::LatitudeRef => {
                if let Some(hemisphere) = read_text(entry, reader)? {
                    set_once(&mut self.latitude_ref, hemisphere);
                }
            }
            GpsTag::LongitudeRef => {
                if let Some(hemisphere) = read_text(entry, reader)? {
                    set_once(&mut self.longitude_ref, hemisphere);
                }
            }
            GpsTag::Latitude => set_once(&mut self.latitude, reader.read_rationals::<3>(entry)?),
            GpsTag::Longitude => set_once(&mut self.longitude, reader.read_rationals::<3>(entry)?),
            GpsTag::AltitudeRef => set_once(&mut self.altitude_ref, reader.read_u8(entry)?),
            GpsTag::Altitude => set_once(&mut self.altitude, reader.read_rational(entry)?),
        }
        Ok(())
    }

    fn merge(&mut self, later: Self) {
        merge_field(&mut self.latitude_ref, later.latitude_ref);
        merge_field(&mut self.latitude, later.latitude);
        merge_field(&mut self.longitude_ref, later.longitude_ref);
        merge_field(&mut self.longitude, later.longitude);
        merge_field(&mut self.altitude_ref, later.altitude_ref);
        merge_field(&mut self.altitude, later.altitude);
    }
}

impl GpsFragment {
    fn coordinate(&self) -> Option<GpsCoordinate> {
        let latitude = signed(dms_to_decimal(self.latitude?), self.latitude_ref.as_deref(), "S");
        let longitude = signed(dms_to_decimal(self.longitude?), self.longitude_ref.as_deref(), "W");
        let altitude = self.altitude.map(|metres| {
            if self.altitude_ref == Some(1) {
                -metres
            } else {
                metres
            }
        });

        Some(GpsCoordinate {
            latitude,
            longitude,
            altitude,
        })
    }
}

fn signed(value: f64, hemisphere: Option<&str>, negative: &str) -> f64 {
    match hemisphere {
        Some(h) if h.trim().eq_ignore_ascii_case(negative) => -value,
        _ => value,
    }
}

// =============================================================================
// RecordBuilder
// =============================================================================

/// Accumulates fragments from every directory of one blob.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordBuilder {
    primary: PrimaryFragment,
    exif: ExifFragment,
    gps: GpsFragment,
}

impl RecordBuilder {
    pub fn add_primary(&mut self, fragment: PrimaryFragment) {
        self.primary.merge(fragment);
    }

    pub fn add_exif(&mut self, fragment: ExifFragment) {
        self.exif.merge(fragment);
    }

    pub fn add_gps(&mut self, fragment: GpsFragment) {
        self.gps.merge(fragment);
    }

    pub fn finish(self) -> ExifRecord {
        ExifRecord {
            camera: self.primary.camera(),
            lens: self.exif.lens.clone(),
            date_taken: self.primary.date_time.clone(),
            settings: self.exif.settings(),
            gps: self.gps.coordinate(),
            dimensions: self.primary.dimensions(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
