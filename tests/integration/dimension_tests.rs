//! Dimension probe integration tests.
//!
//! Tests verify:
//! - Synthetic JPEG, PNG and WebP headers report the encoded size
//! - Files produced by a real encoder report their true size
//! - Container size and EXIF size are reported separately

use photo_meta::{
    detect_format, inspect, probe_dimensions, try_probe_dimensions, ImageDimensions, ImageFormat,
    MetadataError,
};

use super::test_utils::{
    create_test_jpeg, create_test_png, create_test_webp, jpeg_with_exif, minimal_jpeg,
    minimal_png, webp_vp8, webp_vp8l, webp_vp8x, ByteOrderType, Dir, ExifBuilder,
};

// =============================================================================
// Synthetic Headers
// =============================================================================

#[test]
fn test_minimal_jpeg_sof0() {
    let data = minimal_jpeg(800, 600);
    assert_eq!(detect_format(&data), ImageFormat::Jpeg);
    assert_eq!(probe_dimensions(&data), Some(ImageDimensions::new(800, 600)));
}

#[test]
fn test_jpeg_progressive_sof2() {
    let mut data = minimal_jpeg(1024, 768);
    data[3] = 0xC2;
    assert_eq!(probe_dimensions(&data), Some(ImageDimensions::new(1024, 768)));
}

#[test]
fn test_jpeg_without_sof() {
    let data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x04, 0x00, 0x00, 0xFF, 0xD9, 0x00, 0x00];
    assert_eq!(
        try_probe_dimensions(&data),
        Err(MetadataError::SegmentNotFound("SOF"))
    );
}

#[test]
fn test_png_ihdr() {
    let data = minimal_png(1920, 1080);
    assert_eq!(detect_format(&data), ImageFormat::Png);
    assert_eq!(probe_dimensions(&data), Some(ImageDimensions::new(1920, 1080)));
}

#[test]
fn test_webp_vp8_stored_minus_one() {
    let data = webp_vp8(639, 479);
    assert_eq!(detect_format(&data), ImageFormat::Webp);
    assert_eq!(probe_dimensions(&data), Some(ImageDimensions::new(640, 480)));
}

#[test]
fn test_webp_vp8l() {
    let data = webp_vp8l(300, 2000);
    assert_eq!(probe_dimensions(&data), Some(ImageDimensions::new(300, 2000)));
}

#[test]
fn test_webp_vp8x() {
    let data = webp_vp8x(6000, 4000);
    assert_eq!(probe_dimensions(&data), Some(ImageDimensions::new(6000, 4000)));
}

// =============================================================================
// Real Encoded Files
// =============================================================================

#[test]
fn test_encoded_jpeg() {
    let data = create_test_jpeg(123, 45);
    assert_eq!(probe_dimensions(&data), Some(ImageDimensions::new(123, 45)));
}

#[test]
fn test_encoded_png() {
    let data = create_test_png(64, 200);
    assert_eq!(probe_dimensions(&data), Some(ImageDimensions::new(64, 200)));
}

#[test]
fn test_encoded_webp() {
    let data = create_test_webp(97, 31);
    assert_eq!(detect_format(&data), ImageFormat::Webp);
    assert_eq!(probe_dimensions(&data), Some(ImageDimensions::new(97, 31)));
}

#[test]
fn test_encoded_jpeg_has_no_exif() {
    let info = inspect(&create_test_jpeg(16, 16));
    assert_eq!(info.format, ImageFormat::Jpeg);
    assert_eq!(info.dimensions, Some(ImageDimensions::new(16, 16)));
    assert_eq!(info.exif, None);
}

// =============================================================================
// Container vs EXIF Size
// =============================================================================

#[test]
fn test_container_and_exif_sizes_are_separate() {
    // Resized file whose EXIF still carries the original size
    let tiff = ExifBuilder::new(ByteOrderType::LittleEndian)
        .primary(Dir::new().long(0x0100, 6000).long(0x0101, 4000))
        .build();
    let data = jpeg_with_exif(&tiff, 1500, 1000);

    let info = inspect(&data);
    assert_eq!(info.dimensions, Some(ImageDimensions::new(1500, 1000)));
    assert_eq!(
        info.exif.unwrap().dimensions,
        Some(ImageDimensions::new(6000, 4000))
    );
}
