// Unit tests for the file-level decompression driver.
//
// Public API under test:
//   `zpipe::io::decompress::{decompress_filename, decompress_multiple_filenames, decompress_stream}`

use std::fs;
use std::io;

use tempfile::TempDir;
use zpipe::io::prefs::{set_notification_level, Prefs};
use zpipe::io::{decompress_filename, decompress_multiple_filenames};
use zpipe::{compress_stream, decompress_stream, DecompressError};

// Silence progress output in all tests.
fn silent_prefs() -> Prefs {
    set_notification_level(0);
    Prefs::default()
}

/// Compress `data` into a zlib stream held in memory.
fn make_stream(data: &[u8], level: i32) -> Vec<u8> {
    let mut compressed = Vec::new();
    compress_stream(&mut &data[..], &mut compressed, level).unwrap();
    compressed
}

#[test]
fn filename_round_trip() {
    let dir = TempDir::new().unwrap();
    let zz = dir.path().join("payload.zz");
    let out = dir.path().join("payload.txt");
    let original: Vec<u8> = b"round trip through real files "
        .iter()
        .cycle()
        .copied()
        .take(200 * 1024)
        .collect();
    fs::write(&zz, make_stream(&original, 6)).unwrap();

    let prefs = silent_prefs();
    let stats =
        decompress_filename(zz.to_str().unwrap(), out.to_str().unwrap(), &prefs).unwrap();

    assert_eq!(fs::read(&out).unwrap(), original);
    assert_eq!(stats.decompressed_bytes, original.len() as u64);
}

#[test]
fn filename_rejects_plain_file() {
    let dir = TempDir::new().unwrap();
    let not_zz = dir.path().join("plain.zz");
    let out = dir.path().join("plain.out");
    fs::write(&not_zz, b"this was never compressed").unwrap();

    let prefs = silent_prefs();
    let result = decompress_filename(not_zz.to_str().unwrap(), out.to_str().unwrap(), &prefs);
    assert!(result.is_err());
}

#[test]
fn filename_remove_src_file_on_success() {
    let dir = TempDir::new().unwrap();
    let zz = dir.path().join("data.zz");
    let out = dir.path().join("data");
    fs::write(&zz, make_stream(b"remove the archive", 6)).unwrap();

    let mut prefs = silent_prefs();
    prefs.set_remove_src_file(true);
    decompress_filename(zz.to_str().unwrap(), out.to_str().unwrap(), &prefs).unwrap();

    assert!(!zz.exists(), "archive must be removed on success");
    assert_eq!(fs::read(&out).unwrap(), b"remove the archive");
}

#[test]
fn filename_keeps_src_file_on_failure() {
    let dir = TempDir::new().unwrap();
    let zz = dir.path().join("corrupt.zz");
    let out = dir.path().join("corrupt.out");
    let mut stream = make_stream(b"about to be mangled", 6);
    let mid = stream.len() / 2;
    stream[mid] ^= 0x55;
    fs::write(&zz, &stream).unwrap();

    let mut prefs = silent_prefs();
    prefs.set_remove_src_file(true);
    let result = decompress_filename(zz.to_str().unwrap(), out.to_str().unwrap(), &prefs);

    assert!(result.is_err());
    assert!(zz.exists(), "failed decompression must not remove the source");
}

#[test]
fn multiple_filenames_batch_with_bad_entry() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.zz");
    let bad = dir.path().join("bad.zz");
    fs::write(&good, make_stream(b"good stream", 6)).unwrap();
    fs::write(&bad, b"garbage bytes, not a stream").unwrap();

    let prefs = silent_prefs();
    let missed = decompress_multiple_filenames(
        &[good.to_str().unwrap(), bad.to_str().unwrap()],
        ".zz",
        &prefs,
    )
    .unwrap();

    assert_eq!(missed, 1);
    assert_eq!(fs::read(dir.path().join("good")).unwrap(), b"good stream");
}

// ─────────────────────────────────────────────────────────────────────────────
// Stream-level failure taxonomy
// ─────────────────────────────────────────────────────────────────────────────

fn stream_error(stream: &[u8]) -> io::Error {
    let mut sink = Vec::new();
    decompress_stream(&mut &stream[..], &mut sink).expect_err("stream must be rejected")
}

#[test]
fn checksum_corruption_maps_to_adler_mismatch_status() {
    let mut stream = make_stream(b"trailing checksum", 6);
    let last = stream.len() - 1;
    stream[last] = stream[last].wrapping_add(1);

    let err = stream_error(&stream);
    let payload = err
        .get_ref()
        .and_then(|r| r.downcast_ref::<DecompressError>())
        .expect("typed payload");
    assert_eq!(payload.status, -2, "adler32 mismatch status");
}

#[test]
fn every_corrupted_trailer_byte_is_caught() {
    let reference = make_stream(b"all four trailer bytes matter", 6);
    for back in 1..=4 {
        let mut stream = reference.clone();
        let idx = stream.len() - back;
        stream[idx] ^= 0xFF;
        let mut sink = Vec::new();
        assert!(
            decompress_stream(&mut stream.as_slice(), &mut sink).is_err(),
            "flip at {back} bytes from the end must be detected"
        );
    }
}

#[test]
fn truncation_maps_to_cannot_make_progress_status() {
    let stream = make_stream(&vec![7u8; 50_000], 6);
    let truncated = &stream[..stream.len() - 5];

    let err = stream_error(truncated);
    let payload = err
        .get_ref()
        .and_then(|r| r.downcast_ref::<DecompressError>())
        .expect("typed payload");
    assert!(payload.status < 0);
}

#[test]
fn bad_header_is_rejected_before_any_output() {
    // 0x00 0x00 is not a valid zlib header (method nibble must be 8).
    let err = stream_error(&[0x00, 0x00, 0x01, 0x02]);
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}
