// Unit tests for the file-level compression driver.
//
// Public API under test:
//   `zpipe::io::compress::{compress_filename, compress_multiple_filenames, compress_stream}`

use std::fs;

use tempfile::TempDir;
use zpipe::io::prefs::{set_notification_level, Prefs};
use zpipe::io::{compress_filename, compress_multiple_filenames, NUL_MARK};
use zpipe::{compress_stream, decompress_stream};

// Silence progress output in all tests.
fn silent_prefs() -> Prefs {
    set_notification_level(0);
    Prefs::default()
}

/// Decompress a file produced by the driver and return the plaintext.
fn decompress_file(path: &std::path::Path) -> Vec<u8> {
    let compressed = fs::read(path).unwrap();
    let mut restored = Vec::new();
    decompress_stream(&mut compressed.as_slice(), &mut restored).unwrap();
    restored
}

#[test]
fn filename_round_trip_various_levels() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("input.bin");
    let original: Vec<u8> = (0u8..=255).cycle().take(100 * 1024).collect();
    fs::write(&src, &original).unwrap();

    let prefs = silent_prefs();
    for level in [0, 1, 6, 10] {
        let dst = dir.path().join(format!("out-{level}.zz"));
        let stats = compress_filename(
            src.to_str().unwrap(),
            dst.to_str().unwrap(),
            level,
            &prefs,
        )
        .expect("compress_filename should succeed");
        assert_eq!(stats.bytes_in, original.len() as u64);
        assert_eq!(decompress_file(&dst), original, "level {level}");
    }
}

#[test]
fn filename_compresses_repetitive_data() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("repetitive.bin");
    let dst = dir.path().join("repetitive.zz");
    let original = vec![b'A'; 256 * 1024];
    fs::write(&src, &original).unwrap();

    let prefs = silent_prefs();
    let stats = compress_filename(src.to_str().unwrap(), dst.to_str().unwrap(), 6, &prefs)
        .unwrap();
    assert!(
        stats.bytes_out < stats.bytes_in / 10,
        "repetitive data must shrink drastically ({} -> {})",
        stats.bytes_in,
        stats.bytes_out
    );
}

#[test]
fn filename_to_discard_sink() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("input.txt");
    fs::write(&src, b"straight to the bit bucket").unwrap();

    let prefs = silent_prefs();
    let stats = compress_filename(src.to_str().unwrap(), NUL_MARK, 6, &prefs).unwrap();
    assert!(stats.bytes_out > 0);
}

#[test]
fn filename_refuses_existing_destination_without_force() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("input.txt");
    let dst = dir.path().join("input.txt.zz");
    fs::write(&src, b"payload").unwrap();
    fs::write(&dst, b"already here").unwrap();

    let mut prefs = silent_prefs();
    prefs.set_overwrite(false);
    let result = compress_filename(src.to_str().unwrap(), dst.to_str().unwrap(), 6, &prefs);
    assert!(result.is_err());
    assert_eq!(fs::read(&dst).unwrap(), b"already here");
}

#[test]
fn filename_propagates_source_mtime() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("input.txt");
    let dst = dir.path().join("input.txt.zz");
    fs::write(&src, b"mtime carrier").unwrap();

    let old = filetime::FileTime::from_unix_time(1_500_000_000, 0);
    filetime::set_file_mtime(&src, old).unwrap();

    let prefs = silent_prefs();
    compress_filename(src.to_str().unwrap(), dst.to_str().unwrap(), 6, &prefs).unwrap();

    let dst_mtime =
        filetime::FileTime::from_last_modification_time(&fs::metadata(&dst).unwrap());
    assert_eq!(dst_mtime.unix_seconds(), old.unix_seconds());
}

#[test]
fn multiple_filenames_mixed_success_and_failure() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.txt");
    fs::write(&good, b"fine").unwrap();

    let prefs = silent_prefs();
    let missed = compress_multiple_filenames(
        &[good.to_str().unwrap(), "/nonexistent/absent.txt"],
        ".zz",
        6,
        &prefs,
    )
    .unwrap();

    assert_eq!(missed, 1);
    assert!(dir.path().join("good.txt.zz").exists());
}

#[test]
fn stream_driver_accepts_any_reader_writer_pair() {
    // The stream driver is generic over Read/Write; a slice in, Vec out pair
    // must behave identically to the file path.
    let original = b"generic reader/writer pair";
    let mut compressed = Vec::new();
    compress_stream(&mut &original[..], &mut compressed, 6).unwrap();
    let mut restored = Vec::new();
    decompress_stream(&mut compressed.as_slice(), &mut restored).unwrap();
    assert_eq!(restored, original);
}
