// Unit tests for source/sink resolution.
//
// Public API under test:
//   `zpipe::io::file_io::{open_src_file, open_dst_file, DstFile}`
//   sentinels: STDIN_MARK, STDOUT_MARK, NUL_MARK, NULL_OUTPUT

use std::io::{Read, Write};

use tempfile::TempDir;
use zpipe::io::file_io::{open_dst_file, open_src_file};
use zpipe::io::prefs::{set_notification_level, Prefs};
use zpipe::io::{NULL_OUTPUT, NUL_MARK, STDIN_MARK, STDOUT_MARK};

#[test]
fn src_file_reads_back_contents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("payload.bin");
    std::fs::write(&path, b"buffered read").unwrap();

    let mut reader = open_src_file(path.to_str().unwrap()).unwrap();
    let mut contents = Vec::new();
    reader.read_to_end(&mut contents).unwrap();
    assert_eq!(contents, b"buffered read");
}

#[test]
fn src_file_missing_path_fails() {
    set_notification_level(0);
    assert!(open_src_file("/nonexistent/__zpipe_missing__").is_err());
}

#[test]
fn src_file_directory_fails() {
    set_notification_level(0);
    let dir = TempDir::new().unwrap();
    assert!(open_src_file(dir.path().to_str().unwrap()).is_err());
}

#[test]
fn dst_file_writes_to_regular_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.zz");
    let prefs = Prefs::default();

    let mut dst = open_dst_file(path.to_str().unwrap(), &prefs).unwrap();
    dst.write_all(b"written through DstFile").unwrap();
    dst.flush().unwrap();
    drop(dst);

    assert_eq!(std::fs::read(&path).unwrap(), b"written through DstFile");
}

#[test]
fn dst_file_truncates_existing_file_when_overwriting() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.zz");
    std::fs::write(&path, b"a much longer previous content").unwrap();

    let prefs = Prefs::default(); // overwrite = true
    let mut dst = open_dst_file(path.to_str().unwrap(), &prefs).unwrap();
    dst.write_all(b"short").unwrap();
    drop(dst);

    assert_eq!(std::fs::read(&path).unwrap(), b"short");
}

#[test]
fn dst_stdout_sentinel_is_flagged() {
    let prefs = Prefs::default();
    let dst = open_dst_file(STDOUT_MARK, &prefs).unwrap();
    assert!(dst.is_stdout);
}

#[test]
fn dst_discard_sentinel_accepts_writes() {
    let prefs = Prefs::default();
    let mut dst = open_dst_file(NUL_MARK, &prefs).unwrap();
    assert!(!dst.is_stdout);
    dst.write_all(&[0u8; 4096]).unwrap();
}

#[test]
fn null_output_is_an_ordinary_path_at_this_layer() {
    // Only the CLI translates the user-visible "null" spelling into NUL_MARK;
    // file_io treats it as a plain relative path.
    assert_ne!(NULL_OUTPUT, NUL_MARK);
}

#[test]
fn sentinel_spellings() {
    assert_eq!(STDIN_MARK, "stdin");
    assert_eq!(STDOUT_MARK, "stdout");
}
