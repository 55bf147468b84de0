//! E2E Test Suite 01: Stream Driver Round-Trips
//!
//! Validates the core pump loops (`compress_stream` / `decompress_stream`)
//! end-to-end: round-trips across the full level range, buffer-boundary
//! inputs, clamping equivalence, and corruption/truncation detection.

use std::io::Cursor;

use zpipe::io::compress::IN_BUF_SIZE;
use zpipe::io::prefs::set_notification_level;
use zpipe::{compress_stream, decompress_stream};

fn compress_vec(data: &[u8], level: i32) -> Vec<u8> {
    set_notification_level(0);
    let mut out = Vec::new();
    compress_stream(&mut &data[..], &mut out, level).expect("compress");
    out
}

fn decompress_vec(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    decompress_stream(&mut &data[..], &mut out).expect("decompress");
    out
}

/// Mixed-content payload that is neither constant nor incompressible.
fn payload(len: usize) -> Vec<u8> {
    b"streaming round trip payload -- "
        .iter()
        .cycle()
        .enumerate()
        .map(|(i, &b)| b.wrapping_add((i / 251) as u8))
        .take(len)
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: Round-trip at every level for boundary-shaped inputs
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_round_trip_every_level_small_inputs() {
    let cases: [&[u8]; 4] = [b"", b"x", b"abc", b"a slightly longer sentence."];
    for level in 0..=10 {
        for &case in &cases {
            let restored = decompress_vec(&compress_vec(case, level));
            assert_eq!(restored, case, "level {level}, len {}", case.len());
        }
    }
}

#[test]
fn test_round_trip_multi_buffer_input() {
    // Larger than the working buffers: forces several fill/drain cycles.
    let original = payload(2 * IN_BUF_SIZE + 4321);
    for level in [0, 1, 6, 10] {
        let restored = decompress_vec(&compress_vec(&original, level));
        assert_eq!(restored, original, "level {level}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: Clamping equivalence (-5 ≡ 0, 99 ≡ 10)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_level_clamping_produces_identical_streams() {
    let original = payload(64 * 1024);
    assert_eq!(compress_vec(&original, -5), compress_vec(&original, 0));
    assert_eq!(compress_vec(&original, 99), compress_vec(&original, 10));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: Input exactly one buffer capacity — EOF must still be detected
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_exact_buffer_capacity_terminates() {
    let original = payload(IN_BUF_SIZE);
    let compressed = compress_vec(&original, 6);
    assert_eq!(decompress_vec(&compressed), original);
}

#[test]
fn test_one_past_buffer_capacity_terminates() {
    let original = payload(IN_BUF_SIZE + 1);
    let compressed = compress_vec(&original, 6);
    assert_eq!(decompress_vec(&compressed), original);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: Corruption detection — any flipped trailer byte must fail
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_corrupt_trailer_detected() {
    let compressed = compress_vec(b"checksum protected", 6);
    for back in 1..=4 {
        let mut bad = compressed.clone();
        let idx = bad.len() - back;
        bad[idx] ^= 0x01;
        let mut out = Vec::new();
        assert!(
            decompress_stream(&mut bad.as_slice(), &mut out).is_err(),
            "corrupted trailer byte {back} from the end must be detected"
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: Truncation detection — prefixes of a valid stream must fail
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_truncated_stream_detected() {
    let compressed = compress_vec(&payload(100_000), 6);
    for keep in [compressed.len() / 4, compressed.len() / 2, compressed.len() - 1] {
        let mut out = Vec::new();
        assert!(
            decompress_stream(&mut &compressed[..keep], &mut out).is_err(),
            "prefix of {keep} bytes must be rejected"
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: Concrete scenarios — "abc" at level 6; 2 MiB of 0x41 at level 0
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_abc_level_six() {
    let compressed = compress_vec(b"abc", 6);
    assert_eq!(decompress_vec(&compressed), b"abc");
}

#[test]
fn test_level_zero_near_passthrough_two_mebibytes() {
    let original = vec![0x41u8; 2 * 1024 * 1024];
    let compressed = compress_vec(&original, 0);
    // Stored blocks: input size plus per-block framing and the zlib
    // header/trailer only.
    assert!(
        compressed.len() <= original.len() + 8 * 1024,
        "level 0 output {} exceeds passthrough bound",
        compressed.len()
    );
    assert_eq!(decompress_vec(&compressed), original);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: Driver restarts cleanly — no state leaks across invocations
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_back_to_back_invocations_are_independent() {
    let first = payload(10_000);
    let second = payload(20_000);

    let c1 = compress_vec(&first, 6);
    let c2 = compress_vec(&second, 6);

    // Decompress in the opposite order to prove nothing is shared.
    assert_eq!(decompress_vec(&c2), second);
    assert_eq!(decompress_vec(&c1), first);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 8: Cursor-backed readers behave like slices
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_cursor_sources_and_sinks() {
    let original = payload(77_777);
    let mut src = Cursor::new(original.clone());
    let mut compressed = Cursor::new(Vec::new());
    compress_stream(&mut src, &mut compressed, 4).unwrap();

    let mut back = Cursor::new(compressed.into_inner());
    let mut restored = Vec::new();
    decompress_stream(&mut back, &mut restored).unwrap();
    assert_eq!(restored, original);
}
