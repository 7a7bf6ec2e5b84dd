//! Thumbnail sizing helpers.
//!
//! Nothing here touches pixels. These compute the target size a gallery asks
//! its resizer for, and decide which uploads are worth probing at all.

use clap::ValueEnum;

use crate::exif::ImageDimensions;

/// How a source image is fitted into the requested box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Fit {
    /// Fill the box, overflowing one side
    #[default]
    Cover,
    /// Fit entirely inside the box
    Contain,
    /// Stretch to the box, ignoring aspect ratio
    Fill,
}

/// Compute the output size for a resize request.
///
/// A target of `None` (or 0) leaves that side to be derived from the aspect
/// ratio. With neither side given the original size is returned.
pub fn calculate_thumbnail_size(
    original: ImageDimensions,
    target_width: Option<u32>,
    target_height: Option<u32>,
    fit: Fit,
) -> ImageDimensions {
    let target_width = target_width.filter(|&w| w != 0);
    let target_height = target_height.filter(|&h| h != 0);

    if target_width.is_none() && target_height.is_none() {
        return original;
    }

    if fit == Fit::Fill || original.width == 0 || original.height == 0 {
        return ImageDimensions::new(
            target_width.unwrap_or(original.width),
            target_height.unwrap_or(original.height),
        );
    }

    let aspect = original.width as f64 / original.height as f64;
    let width_for = |height: u32| (height as f64 * aspect).round() as u32;
    let height_for = |width: u32| (width as f64 / aspect).round() as u32;

    let (width, height) = match (target_width, target_height) {
        (Some(width), None) => return ImageDimensions::new(width, height_for(width)),
        (None, Some(height)) => return ImageDimensions::new(width_for(height), height),
        (Some(width), Some(height)) => (width, height),
        (None, None) => return original,
    };

    let wider_than_box = aspect > width as f64 / height as f64;
    match (fit, wider_than_box) {
        (Fit::Contain, true) | (Fit::Cover, false) => ImageDimensions::new(width, height_for(width)),
        (Fit::Contain, false) | (Fit::Cover, true) => {
            ImageDimensions::new(width_for(height), height)
        }
        (Fit::Fill, _) => ImageDimensions::new(width, height),
    }
}

/// File extensions a gallery accepts as images.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "heic", "heif", "tiff", "tif",
];

/// Whether a file name carries a supported image extension (case-insensitive).
///
/// A name without a dot has no extension and is never supported.
pub fn is_supported_image_extension(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}
