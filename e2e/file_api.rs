//! E2E Test Suite 02: File API
//!
//! Validates the file-level compress and decompress drivers using real temp
//! files: round-trips, batch mode, test mode, overwrite policy, and
//! metadata propagation.

use std::fs;

use tempfile::TempDir;
use zpipe::io::prefs::{set_notification_level, Prefs};
use zpipe::io::{
    compress_filename, compress_multiple_filenames, decompress_filename,
    decompress_multiple_filenames, NUL_MARK,
};

// Silence progress output in all tests.
fn silent_prefs() -> Prefs {
    set_notification_level(0);
    Prefs::default()
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: Compress / decompress round-trip (64 KB ASCII data)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_compress_decompress_roundtrip() {
    let dir = TempDir::new().unwrap();
    let src_path = dir.path().join("input.txt");
    let zz_path = dir.path().join("input.txt.zz");
    let out_path = dir.path().join("output.txt");

    // 64 KB of ASCII data.
    let original: Vec<u8> = b"abcdefghijklmnopqrstuvwxyz0123456789"
        .iter()
        .cycle()
        .take(64 * 1024)
        .cloned()
        .collect();
    fs::write(&src_path, &original).unwrap();

    let prefs = silent_prefs();

    // Compress.
    let c_stats = compress_filename(
        src_path.to_str().unwrap(),
        zz_path.to_str().unwrap(),
        6,
        &prefs,
    )
    .expect("compress_filename should succeed");

    assert!(zz_path.exists(), ".zz output file must exist");
    let compressed_size = fs::metadata(&zz_path).unwrap().len();
    assert!(
        compressed_size < original.len() as u64,
        "compressed size ({compressed_size}) should be smaller than original ({})",
        original.len()
    );
    assert_eq!(c_stats.bytes_in, original.len() as u64);
    assert_eq!(c_stats.bytes_out, compressed_size);

    // Decompress.
    let d_stats = decompress_filename(
        zz_path.to_str().unwrap(),
        out_path.to_str().unwrap(),
        &prefs,
    )
    .expect("decompress_filename should succeed");

    let recovered = fs::read(&out_path).unwrap();
    assert_eq!(recovered, original, "roundtrip content must match");
    assert_eq!(
        d_stats.decompressed_bytes,
        original.len() as u64,
        "decompressed_bytes stat must match original length"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: Empty file round-trip
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("empty");
    let zz = dir.path().join("empty.zz");
    let out = dir.path().join("empty.out");
    fs::write(&src, b"").unwrap();

    let prefs = silent_prefs();
    compress_filename(src.to_str().unwrap(), zz.to_str().unwrap(), 6, &prefs).unwrap();
    assert!(
        fs::metadata(&zz).unwrap().len() > 0,
        "even an empty stream carries framing"
    );
    decompress_filename(zz.to_str().unwrap(), out.to_str().unwrap(), &prefs).unwrap();
    assert_eq!(fs::metadata(&out).unwrap().len(), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: Batch compress then batch decompress
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_batch_roundtrip() {
    let dir = TempDir::new().unwrap();
    let names = ["one.txt", "two.txt", "three.txt"];
    for (i, name) in names.iter().enumerate() {
        fs::write(dir.path().join(name), format!("content #{i}").repeat(100)).unwrap();
    }

    let prefs = silent_prefs();

    let srcs: Vec<String> = names
        .iter()
        .map(|n| dir.path().join(n).to_str().unwrap().to_owned())
        .collect();
    let src_refs: Vec<&str> = srcs.iter().map(|s| s.as_str()).collect();
    let missed = compress_multiple_filenames(&src_refs, ".zz", 6, &prefs).unwrap();
    assert_eq!(missed, 0);

    // Remove originals so decompression recreates them.
    for name in &names {
        fs::remove_file(dir.path().join(name)).unwrap();
    }

    let zzs: Vec<String> = names
        .iter()
        .map(|n| format!("{}.zz", dir.path().join(n).to_str().unwrap()))
        .collect();
    let zz_refs: Vec<&str> = zzs.iter().map(|s| s.as_str()).collect();
    let missed = decompress_multiple_filenames(&zz_refs, ".zz", &prefs).unwrap();
    assert_eq!(missed, 0);

    for (i, name) in names.iter().enumerate() {
        assert_eq!(
            fs::read_to_string(dir.path().join(name)).unwrap(),
            format!("content #{i}").repeat(100)
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: Test mode validates without writing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_test_mode_accepts_good_rejects_bad() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.zz");
    let bad = dir.path().join("bad.zz");

    let mut stream = Vec::new();
    zpipe::compress_stream(&mut &b"validated"[..], &mut stream, 6).unwrap();
    fs::write(&good, &stream).unwrap();

    let mid = stream.len() / 2;
    stream[mid] ^= 0xA5;
    fs::write(&bad, &stream).unwrap();

    let mut prefs = silent_prefs();
    prefs.set_test_mode(true);

    assert!(decompress_filename(good.to_str().unwrap(), NUL_MARK, &prefs).is_ok());
    assert!(decompress_filename(bad.to_str().unwrap(), NUL_MARK, &prefs).is_err());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: Overwrite policy on decompression
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_decompress_refuses_existing_output_without_force() {
    let dir = TempDir::new().unwrap();
    let zz = dir.path().join("data.zz");
    let out = dir.path().join("data");

    let mut stream = Vec::new();
    zpipe::compress_stream(&mut &b"new content"[..], &mut stream, 6).unwrap();
    fs::write(&zz, &stream).unwrap();
    fs::write(&out, b"precious existing data").unwrap();

    let mut prefs = silent_prefs();
    prefs.set_overwrite(false);

    let result = decompress_filename(zz.to_str().unwrap(), out.to_str().unwrap(), &prefs);
    assert!(result.is_err());
    assert_eq!(fs::read(&out).unwrap(), b"precious existing data");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: --rm chain: compress removes source, decompress removes archive
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_remove_source_chain() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("chain.txt");
    let zz = dir.path().join("chain.txt.zz");
    let back = dir.path().join("chain.back");
    fs::write(&src, b"travels through the chain").unwrap();

    let mut prefs = silent_prefs();
    prefs.set_remove_src_file(true);

    compress_filename(src.to_str().unwrap(), zz.to_str().unwrap(), 6, &prefs).unwrap();
    assert!(!src.exists());
    assert!(zz.exists());

    decompress_filename(zz.to_str().unwrap(), back.to_str().unwrap(), &prefs).unwrap();
    assert!(!zz.exists());
    assert_eq!(fs::read(&back).unwrap(), b"travels through the chain");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: Large binary file (crosses both working buffers several times)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_large_binary_roundtrip() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("large.bin");
    let zz = dir.path().join("large.bin.zz");
    let out = dir.path().join("large.out");

    // ~3 MiB of varied binary data.
    let original: Vec<u8> = (0..3 * 1024 * 1024u32)
        .map(|i| (i.wrapping_mul(2654435761) >> 24) as u8)
        .collect();
    fs::write(&src, &original).unwrap();

    let prefs = silent_prefs();
    compress_filename(src.to_str().unwrap(), zz.to_str().unwrap(), 3, &prefs).unwrap();
    decompress_filename(zz.to_str().unwrap(), out.to_str().unwrap(), &prefs).unwrap();

    assert_eq!(fs::read(&out).unwrap(), original);
}
