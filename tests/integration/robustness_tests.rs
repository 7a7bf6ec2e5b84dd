//! Malformed-input integration tests.
//!
//! Tests verify:
//! - Truncating a valid file at any offset returns cleanly
//! - Truncated TIFF data keeps the fields read before the cut
//! - Cyclic and self-referencing directory chains terminate
//! - Repeated string tags cost one value read, not one per entry
//! - Random and corrupted bytes never panic
//! - Parsing is idempotent

use std::time::{Duration, Instant};

use photo_meta::{inspect, parse_metadata, probe_dimensions, try_parse_metadata, MetadataError};

use super::test_utils::{
    canon_exif, create_test_png, jpeg_with_exif, minimal_png, webp_vp8, ByteOrderType, Dir,
    ExifBuilder, XorShift,
};

// =============================================================================
// Truncation
// =============================================================================

#[test]
fn test_truncated_jpeg_at_every_offset() {
    let data = jpeg_with_exif(&canon_exif(ByteOrderType::LittleEndian), 800, 600);
    for cut in 0..data.len() {
        let prefix = &data[..cut];
        let _ = probe_dimensions(prefix);
        let _ = parse_metadata(prefix);
        let _ = inspect(prefix);
    }
}

#[test]
fn test_truncated_tiff_at_every_offset() {
    for order in [ByteOrderType::LittleEndian, ByteOrderType::BigEndian] {
        let tiff = canon_exif(order);
        let full = parse_metadata(&tiff).expect("record");

        for cut in 0..tiff.len() {
            if let Some(partial) = parse_metadata(&tiff[..cut]) {
                // Make and Model are read separately, so a cut can keep only Make
                if let Some(ref camera) = partial.camera {
                    assert!(full.camera.as_deref().unwrap().starts_with(camera.as_str()));
                }
                if let Some(ref lens) = partial.lens {
                    assert_eq!(Some(lens), full.lens.as_ref());
                }
                if let Some(gps) = partial.gps {
                    assert_eq!(gps.latitude, full.gps.unwrap().latitude);
                }
            }
        }
    }
}

#[test]
fn test_truncation_after_primary_keeps_camera() {
    let tiff = ExifBuilder::new(ByteOrderType::LittleEndian)
        .primary(Dir::new().ascii(0x010F, "Canon").ascii(0x0110, "EOS R5"))
        .exif(Dir::new().rational(0x829A, 1, 250))
        .build();

    // Drop the last bytes of the Exif directory's value data
    let cut = tiff.len() - 4;
    let record = parse_metadata(&tiff[..cut]).expect("partial record");
    assert_eq!(record.camera.as_deref(), Some("Canon EOS R5"));
    assert_eq!(record.settings, None);
}

#[test]
fn test_truncated_small_headers() {
    let png = minimal_png(100, 100);
    assert_eq!(probe_dimensions(&png[..20]), None);
    let webp = webp_vp8(99, 99);
    assert_eq!(probe_dimensions(&webp[..27]), None);
}

// =============================================================================
// Hostile Structures
// =============================================================================

#[test]
fn test_cyclic_chain_terminates() {
    let tiff = ExifBuilder::new(ByteOrderType::BigEndian)
        .primary(Dir::new().ascii(0x010F, "Canon"))
        .primary(Dir::new().ascii(0x0110, "EOS R5"))
        .cyclic()
        .build();
    let record = parse_metadata(&tiff).expect("record");
    assert_eq!(record.camera.as_deref(), Some("Canon EOS R5"));
}

#[test]
fn test_sub_directory_pointing_at_header() {
    let tiff = ExifBuilder::new(ByteOrderType::LittleEndian)
        .primary(Dir::new().long(0x8769, 0).long(0x8825, 8))
        .build();
    assert!(parse_metadata(&tiff).is_some());
}

#[test]
fn test_huge_counts_and_offsets() {
    let tiff = ExifBuilder::new(ByteOrderType::LittleEndian)
        .primary(
            Dir::new()
                .raw(0x010F, 2, u32::MAX, 8)
                .raw(0x0110, 2, 64, u32::MAX)
                .raw(0x8769, 4, 1, u32::MAX)
                .raw(0x0132, 99, 4, 0)
                .ascii(0x0132, "2020:01:01 00:00:00"),
        )
        .build();
    let record = parse_metadata(&tiff).expect("record");
    assert_eq!(record.camera, None);
    assert_eq!(record.date_taken.as_deref(), Some("2020:01:01 00:00:00"));
}

#[test]
fn test_zero_length_jpeg_segment() {
    let data = [
        0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x00, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00,
    ];
    assert_eq!(probe_dimensions(&data), None);
    assert!(matches!(
        try_parse_metadata(&data),
        Err(MetadataError::SegmentNotFound(_))
    ));
}

/// Little-endian TIFF with one IFD of `entries` Make tags. The first points
/// at "Canon", the rest share one `value_len`-byte run of 'A'.
fn repeated_make_tiff(entries: u16, value_len: u32) -> Vec<u8> {
    let data_start = 8 + 2 + entries as u32 * 12 + 4;
    let run_start = data_start + 6;

    let mut tiff = b"II*\0".to_vec();
    tiff.extend_from_slice(&8u32.to_le_bytes());
    tiff.extend_from_slice(&entries.to_le_bytes());
    for index in 0..entries {
        let (count, offset) = if index == 0 {
            (6, data_start)
        } else {
            (value_len, run_start)
        };
        tiff.extend_from_slice(&0x010Fu16.to_le_bytes());
        tiff.extend_from_slice(&2u16.to_le_bytes());
        tiff.extend_from_slice(&count.to_le_bytes());
        tiff.extend_from_slice(&offset.to_le_bytes());
    }
    tiff.extend_from_slice(&0u32.to_le_bytes());
    tiff.extend_from_slice(b"Canon\0");
    tiff.resize(tiff.len() + value_len as usize, b'A');
    tiff
}

#[test]
fn test_repeated_string_tags_are_read_once() {
    // Decoding every duplicate would copy 4000 x 1 MB
    let tiff = repeated_make_tiff(4_000, 1_000_000);

    let started = Instant::now();
    let record = parse_metadata(&tiff).expect("record");
    let elapsed = started.elapsed();

    assert_eq!(record.camera.as_deref(), Some("Canon"));
    assert!(
        elapsed < Duration::from_secs(2),
        "decoding took {elapsed:?}"
    );
}

#[test]
fn test_random_bytes_never_panic() {
    let mut rng = XorShift::new(0x5EED);
    for _ in 0..500 {
        let len = rng.below(256);
        let mut data: Vec<u8> = (0..len).map(|_| rng.next_u64() as u8).collect();
        // Steer some inputs into each parser
        match rng.below(4) {
            0 if data.len() >= 2 => data[..2].copy_from_slice(&[0xFF, 0xD8]),
            1 if data.len() >= 4 => data[..4].copy_from_slice(b"II*\0"),
            2 if data.len() >= 4 => data[..4].copy_from_slice(b"MM\0*"),
            _ => {}
        }
        let _ = inspect(&data);
    }
}

#[test]
fn test_corrupted_fixture_never_panics() {
    let tiff = canon_exif(ByteOrderType::LittleEndian);
    let mut rng = XorShift::new(42);
    for _ in 0..300 {
        let mut corrupted = tiff.clone();
        for _ in 0..4 {
            let pos = rng.below(corrupted.len());
            corrupted[pos] = rng.next_u64() as u8;
        }
        let _ = parse_metadata(&corrupted);
        let _ = parse_metadata(&jpeg_with_exif(&corrupted, 1, 1));
    }
}

// =============================================================================
// Idempotence
// =============================================================================

#[test]
fn test_parsing_is_idempotent() {
    let data = jpeg_with_exif(&canon_exif(ByteOrderType::BigEndian), 640, 480);
    let first = inspect(&data);
    let second = inspect(&data);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );

    let png = create_test_png(8, 8);
    assert_eq!(probe_dimensions(&png), probe_dimensions(&png));
}
