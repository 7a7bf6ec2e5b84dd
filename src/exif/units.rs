//! Display formatting for exposure values and GPS conversion.

/// `2.8` → `"f/2.8"`.
pub fn format_aperture(f_number: f64) -> String {
    format!("f/{:.1}", f_number)
}

/// Exposure time in seconds to the usual photographic notation.
///
/// Sub-second exposures become a reciprocal (`0.004` → `"1/250"`), longer
/// ones keep their value (`2.0` → `"2s"`). Non-positive values have no
/// meaningful rendering and return `None`.
pub fn format_shutter_speed(seconds: f64) -> Option<String> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return None;
    }
    if seconds < 1.0 {
        Some(format!("1/{}", (1.0 / seconds).round()))
    } else {
        Some(format!("{}s", seconds))
    }
}

/// Focal length rounded to whole millimetres.
pub fn format_focal_length(millimetres: f64) -> String {
    format!("{:.0}mm", millimetres)
}

/// Degrees, minutes, seconds to decimal degrees (unsigned).
pub fn dms_to_decimal([degrees, minutes, seconds]: [f64; 3]) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}
