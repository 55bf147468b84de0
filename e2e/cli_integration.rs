//! E2E Test Suite 03: CLI integration
//!
//! Tests the `zpipe` binary as a black-box CLI tool using
//! std::process::Command. Covers argument parsing, compress/decompress
//! dispatch, exit codes, test mode, and stdin/stdout piping.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Locate the `zpipe` binary produced by Cargo.
fn zpipe_bin() -> PathBuf {
    // CARGO_BIN_EXE_zpipe is set by Cargo when running integration tests.
    // Fall back to walking up from the test binary location.
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_zpipe") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop(); // remove test binary filename
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("zpipe");
    p
}

/// Create a TempDir containing a text file with ~4 KB of content.
fn make_temp_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.txt");
    let content = "Hello, zpipe!\n".repeat(300); // ~4 KB
    fs::write(&input_path, content).unwrap();
    (dir, input_path)
}

// ── 1. Compress / decompress roundtrip ───────────────────────────────────────

#[test]
fn test_cli_compress_decompress_roundtrip() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let compressed = dir.path().join("output.zz");
    let roundtrip = dir.path().join("roundtrip.txt");

    // Compress
    let status = Command::new(zpipe_bin())
        .args(["-f", input.to_str().unwrap(), compressed.to_str().unwrap()])
        .current_dir(dir.path())
        .status()
        .expect("failed to run zpipe compress");
    assert!(status.success(), "compress step should exit 0");
    assert!(compressed.exists(), "compressed file should exist");

    // Decompress
    let status = Command::new(zpipe_bin())
        .args([
            "-d",
            "-f",
            compressed.to_str().unwrap(),
            roundtrip.to_str().unwrap(),
        ])
        .current_dir(dir.path())
        .status()
        .expect("failed to run zpipe decompress");
    assert!(status.success(), "decompress step should exit 0");

    assert_eq!(fs::read(&roundtrip).unwrap(), original);
}

// ── 2. Automatic output naming from the extension ────────────────────────────

#[test]
fn test_cli_auto_output_names() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    // `zpipe input.txt` → input.txt.zz
    let status = Command::new(zpipe_bin())
        .args(["-q", input.to_str().unwrap()])
        .current_dir(dir.path())
        .status()
        .unwrap();
    assert!(status.success());
    let zz = dir.path().join("input.txt.zz");
    assert!(zz.exists(), "auto-named .zz output must exist");

    // Remove the original, then `zpipe input.txt.zz` → input.txt
    fs::remove_file(&input).unwrap();
    let status = Command::new(zpipe_bin())
        .args(["-q", zz.to_str().unwrap()])
        .current_dir(dir.path())
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(fs::read(&input).unwrap(), original);
}

// ── 3. stdin → stdout piping ─────────────────────────────────────────────────

#[test]
fn test_cli_pipe_stdin_to_stdout() {
    let original = b"piped through stdin and stdout".repeat(64);

    // Compress via pipe.
    let mut child = Command::new(zpipe_bin())
        .args(["-z", "-c", "-q"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(&original)
        .unwrap();
    let compressed = child.wait_with_output().unwrap();
    assert!(compressed.status.success());
    assert!(!compressed.stdout.is_empty());

    // Decompress via pipe.
    let mut child = Command::new(zpipe_bin())
        .args(["-d", "-c", "-q"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(&compressed.stdout)
        .unwrap();
    let restored = child.wait_with_output().unwrap();
    assert!(restored.status.success());
    assert_eq!(restored.stdout, original);
}

// ── 4. Test mode exit codes ──────────────────────────────────────────────────

#[test]
fn test_cli_test_mode_exit_codes() {
    let (dir, input) = make_temp_input();
    let zz = dir.path().join("input.txt.zz");

    let status = Command::new(zpipe_bin())
        .args(["-q", "-f", input.to_str().unwrap(), zz.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());

    // Valid archive: -t exits 0.
    let status = Command::new(zpipe_bin())
        .args(["-t", "-q", zz.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success(), "-t on a valid archive must exit 0");

    // Corrupted archive: -t exits non-zero.
    let mut bytes = fs::read(&zz).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    fs::write(&zz, &bytes).unwrap();

    let status = Command::new(zpipe_bin())
        .args(["-t", "-q", zz.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(!status.success(), "-t on a corrupt archive must exit non-zero");
}

// ── 5. Version / help / bad usage exit codes ─────────────────────────────────

#[test]
fn test_cli_version_and_help_exit_zero() {
    for flag in ["-V", "--version", "-h", "--help"] {
        let status = Command::new(zpipe_bin()).arg(flag).status().unwrap();
        assert!(status.success(), "{flag} must exit 0");
    }
}

#[test]
fn test_cli_unknown_option_exits_nonzero() {
    let status = Command::new(zpipe_bin())
        .args(["--no-such-option"])
        .stdin(Stdio::null())
        .status()
        .unwrap();
    assert!(!status.success());
}

// ── 6. Overwrite refusal without -f ──────────────────────────────────────────

#[test]
fn test_cli_refuses_overwrite_without_force() {
    let (dir, input) = make_temp_input();
    let zz = dir.path().join("input.txt.zz");
    fs::write(&zz, b"already present").unwrap();

    // -q drops the level below the interactive-prompt threshold, so the
    // overwrite guard refuses outright.
    let status = Command::new(zpipe_bin())
        .args(["-q", "-q", input.to_str().unwrap(), zz.to_str().unwrap()])
        .stdin(Stdio::null())
        .status()
        .unwrap();
    assert!(!status.success(), "existing output without -f must fail");
    assert_eq!(fs::read(&zz).unwrap(), b"already present");
}

// ── 7. Multiple-input mode ───────────────────────────────────────────────────

#[test]
fn test_cli_multiple_inputs() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, b"first file").unwrap();
    fs::write(&b, b"second file").unwrap();

    let status = Command::new(zpipe_bin())
        .args(["-m", "-q", a.to_str().unwrap(), b.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());
    assert!(dir.path().join("a.txt.zz").exists());
    assert!(dir.path().join("b.txt.zz").exists());
}

// ── 8. Level flags parse end-to-end ──────────────────────────────────────────

#[test]
fn test_cli_level_zero_grows_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("repeats.bin");
    fs::write(&input, vec![b'Z'; 100 * 1024]).unwrap();

    let stored = dir.path().join("stored.zz");
    let packed = dir.path().join("packed.zz");

    for (level, out) in [("-0", &stored), ("-9", &packed)] {
        let status = Command::new(zpipe_bin())
            .args(["-f", "-q", level, input.to_str().unwrap(), out.to_str().unwrap()])
            .status()
            .unwrap();
        assert!(status.success());
    }

    let stored_len = fs::metadata(&stored).unwrap().len();
    let packed_len = fs::metadata(&packed).unwrap().len();
    assert!(stored_len >= 100 * 1024, "level 0 must not compress");
    assert!(packed_len < 1024, "level 9 must collapse repeated bytes");
}
