//! EXIF decoding integration tests.
//!
//! Tests verify:
//! - Camera, lens, date, settings and GPS decode from a full fixture
//! - Both byte orders produce identical records
//! - Raw TIFF input and EXIF spliced into a real encoded JPEG
//! - Chained directories, merge precedence and JSON output shape

use photo_meta::{
    parse_metadata, try_parse_metadata, ExifRecord, ImageDimensions, MetadataError,
};

use super::test_utils::{
    canon_exif, create_test_jpeg, jpeg_with_exif, splice_exif, ByteOrderType, Dir, ExifBuilder,
    CANON_LATITUDE, CANON_LONGITUDE,
};

fn parse_jpeg(tiff: &[u8]) -> ExifRecord {
    parse_metadata(&jpeg_with_exif(tiff, 640, 480)).expect("record")
}

// =============================================================================
// Full Fixture
// =============================================================================

#[test]
fn test_canon_fixture_little_endian() {
    let record = parse_jpeg(&canon_exif(ByteOrderType::LittleEndian));

    assert_eq!(record.camera.as_deref(), Some("Canon EOS R5"));
    assert_eq!(record.lens.as_deref(), Some("RF50mm F1.8 STM"));
    assert_eq!(record.date_taken.as_deref(), Some("2023:06:01 12:34:56"));
    assert_eq!(record.dimensions, Some(ImageDimensions::new(8192, 5464)));

    let settings = record.settings.expect("settings");
    assert_eq!(settings.shutter_speed.as_deref(), Some("1/250"));
    assert_eq!(settings.aperture.as_deref(), Some("f/2.8"));
    assert_eq!(settings.iso, Some(400));
    assert_eq!(settings.focal_length.as_deref(), Some("50mm"));

    let gps = record.gps.expect("gps");
    assert!(gps.latitude < 0.0);
    assert!((gps.latitude - CANON_LATITUDE).abs() < 1e-6);
    assert!((gps.longitude - CANON_LONGITUDE).abs() < 1e-6);
    assert_eq!(gps.altitude, Some(58.5));
}

#[test]
fn test_byte_orders_agree() {
    let le = parse_jpeg(&canon_exif(ByteOrderType::LittleEndian));
    let be = parse_jpeg(&canon_exif(ByteOrderType::BigEndian));
    assert_eq!(le, be);
}

#[test]
fn test_raw_tiff_input() {
    let tiff = canon_exif(ByteOrderType::BigEndian);
    let record = parse_metadata(&tiff).expect("record");
    assert_eq!(record.camera.as_deref(), Some("Canon EOS R5"));
}

#[test]
fn test_exif_in_encoded_jpeg() {
    let data = splice_exif(&create_test_jpeg(32, 24), &canon_exif(ByteOrderType::LittleEndian));
    let info = photo_meta::inspect(&data);
    assert_eq!(info.dimensions, Some(ImageDimensions::new(32, 24)));
    assert_eq!(
        info.exif.and_then(|e| e.camera).as_deref(),
        Some("Canon EOS R5")
    );
}

// =============================================================================
// Individual Properties
// =============================================================================

#[test]
fn test_make_and_model() {
    let tiff = ExifBuilder::new(ByteOrderType::LittleEndian)
        .primary(Dir::new().ascii(0x010F, "Canon").ascii(0x0110, "EOS R5"))
        .build();
    assert_eq!(parse_jpeg(&tiff).camera.as_deref(), Some("Canon EOS R5"));
}

#[test]
fn test_exposure_one_over_250() {
    let tiff = ExifBuilder::new(ByteOrderType::BigEndian)
        .exif(Dir::new().rational(0x829A, 1, 250))
        .build();
    let settings = parse_jpeg(&tiff).settings.expect("settings");
    assert_eq!(settings.shutter_speed.as_deref(), Some("1/250"));
}

#[test]
fn test_long_exposure() {
    let tiff = ExifBuilder::new(ByteOrderType::LittleEndian)
        .exif(Dir::new().rational(0x829A, 30, 1))
        .build();
    let settings = parse_jpeg(&tiff).settings.expect("settings");
    assert_eq!(settings.shutter_speed.as_deref(), Some("30s"));
}

#[test]
fn test_35mm_equivalent_takes_precedence() {
    let tiff = ExifBuilder::new(ByteOrderType::LittleEndian)
        .exif(
            Dir::new()
                .rational(0x920A, 5_700, 1_000)
                .short(0xA405, 26),
        )
        .build();
    let settings = parse_jpeg(&tiff).settings.expect("settings");
    assert_eq!(settings.focal_length.as_deref(), Some("26mm"));
}

#[test]
fn test_western_longitude_below_sea_level() {
    let tiff = ExifBuilder::new(ByteOrderType::BigEndian)
        .gps(
            Dir::new()
                .ascii(0x0001, "N")
                .rationals(0x0002, &[(36, 1), (0, 1), (0, 1)])
                .ascii(0x0003, "W")
                .rationals(0x0004, &[(116, 1), (52, 1), (0, 1)])
                .byte(0x0005, 1)
                .rational(0x0006, 86, 1),
        )
        .build();
    let gps = parse_jpeg(&tiff).gps.expect("gps");
    assert!((gps.latitude - 36.0).abs() < 1e-9);
    assert!((gps.longitude + (116.0 + 52.0 / 60.0)).abs() < 1e-9);
    assert_eq!(gps.altitude, Some(-86.0));
}

#[test]
fn test_zero_denominator_does_not_fault() {
    let tiff = ExifBuilder::new(ByteOrderType::LittleEndian)
        .exif(Dir::new().rational(0x829D, 28, 0).short(0x8827, 100))
        .build();
    let settings = parse_jpeg(&tiff).settings.expect("settings");
    assert_eq!(settings.aperture.as_deref(), Some("f/0.0"));
    assert_eq!(settings.iso, Some(100));
}

#[test]
fn test_thumbnail_directory_does_not_override_ifd0() {
    let tiff = ExifBuilder::new(ByteOrderType::LittleEndian)
        .primary(Dir::new().long(0x0100, 4000).long(0x0101, 3000))
        .primary(Dir::new().ascii(0x010F, "NIKON CORPORATION").long(0x0100, 160))
        .build();
    let record = parse_jpeg(&tiff);
    assert_eq!(record.dimensions, Some(ImageDimensions::new(4000, 3000)));
    // Fields missing from IFD0 are still taken from later directories
    assert_eq!(record.camera.as_deref(), Some("NIKON CORPORATION"));
}

#[test]
fn test_unknown_tags_are_ignored() {
    let tiff = ExifBuilder::new(ByteOrderType::LittleEndian)
        .primary(
            Dir::new()
                .short(0x0112, 6) // Orientation
                .ascii(0x0131, "Adobe Lightroom") // Software
                .ascii(0x0110, "X-T5"),
        )
        .build();
    assert_eq!(parse_jpeg(&tiff).camera.as_deref(), Some("X-T5"));
}

// =============================================================================
// Absent Results
// =============================================================================

#[test]
fn test_jpeg_without_app1() {
    let data = super::test_utils::minimal_jpeg(10, 10);
    assert_eq!(
        try_parse_metadata(&data),
        Err(MetadataError::SegmentNotFound("APP1/Exif"))
    );
}

#[test]
fn test_app1_xmp_is_skipped() {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE1];
    let xmp = b"http://ns.adobe.com/xap/1.0/\0<x:xmpmeta/>";
    data.extend_from_slice(&((xmp.len() + 2) as u16).to_be_bytes());
    data.extend_from_slice(xmp);
    data.extend(super::test_utils::app1_exif_segment(&canon_exif(
        ByteOrderType::LittleEndian,
    )));
    data.extend_from_slice(&[0xFF, 0xD9]);

    let record = parse_metadata(&data).expect("record");
    assert_eq!(record.camera.as_deref(), Some("Canon EOS R5"));
}

#[test]
fn test_bad_byte_order_is_absent() {
    let mut tiff = canon_exif(ByteOrderType::LittleEndian);
    tiff[0] = b'X';
    tiff[1] = b'X';
    let data = jpeg_with_exif(&tiff, 8, 8);
    assert_eq!(parse_metadata(&data), None);
    assert!(matches!(
        try_parse_metadata(&data),
        Err(MetadataError::InvalidByteOrder(_))
    ));
}

// =============================================================================
// Serialization
// =============================================================================

#[test]
fn test_json_shape() {
    let record = parse_jpeg(&canon_exif(ByteOrderType::LittleEndian));
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["camera"], "Canon EOS R5");
    assert_eq!(json["dateTaken"], "2023:06:01 12:34:56");
    assert_eq!(json["settings"]["shutterSpeed"], "1/250");
    assert_eq!(json["settings"]["focalLength"], "50mm");
    assert_eq!(json["dimensions"]["width"], 8192);
    assert!(json["gps"]["latitude"].as_f64().unwrap() < 0.0);
}
