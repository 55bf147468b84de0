//! Compression-level to engine-configuration mapping.
//!
//! The deflate engine is tuned through a single flag word combining the
//! dictionary-probe count (search effort) with behaviour bits. The level
//! scale runs 0–10: level 0 emits stored blocks only (framing without
//! compression), levels 1–3 use greedy parsing, levels 4–10 use the slower
//! optimal parser with progressively deeper match searches.

use miniz_oxide::deflate::core::deflate_flags::{
    TDEFL_FORCE_ALL_RAW_BLOCKS, TDEFL_GREEDY_PARSING_FLAG, TDEFL_WRITE_ZLIB_HEADER,
};
use miniz_oxide::inflate::core::inflate_flags::{
    TINFL_FLAG_COMPUTE_ADLER32, TINFL_FLAG_HAS_MORE_INPUT, TINFL_FLAG_PARSE_ZLIB_HEADER,
};

use crate::config::{CLEVEL_MAX, CLEVEL_MIN};

// ---------------------------------------------------------------------------
// Probe table
// ---------------------------------------------------------------------------

/// Number of dictionary probes per compression level (0–10).
/// 0 implies fastest/minimal possible probing.
pub const NUM_PROBES: [u32; 11] = [0, 1, 6, 32, 16, 32, 128, 256, 512, 768, 1500];

/// Highest level at which the greedy parser is selected; above it the
/// engine uses optimal parsing.
const GREEDY_PARSING_MAX_LEVEL: i32 = 3;

// ---------------------------------------------------------------------------
// Level mapping
// ---------------------------------------------------------------------------

/// Clamps `level` into the supported [0, 10] range.
///
/// Out-of-range requests are usable, not errors: anything below 0 behaves
/// as level 0, anything above 10 as level 10.
#[inline]
pub fn clamp_level(level: i32) -> i32 {
    level.clamp(CLEVEL_MIN, CLEVEL_MAX)
}

/// Builds the deflate engine's flag word for `level` (clamped to [0, 10]).
///
/// The zlib-header bit is always set, so the emitted stream carries the
/// standard 2-byte header and Adler-32 trailer. Level 0 additionally forces
/// stored (uncompressed) blocks, making compression a near-passthrough.
///
/// Pure function of `level`; no side effects.
pub fn compression_flags(level: i32) -> u32 {
    let level = clamp_level(level);
    let mut flags = TDEFL_WRITE_ZLIB_HEADER | NUM_PROBES[level as usize];
    if level <= GREEDY_PARSING_MAX_LEVEL {
        flags |= TDEFL_GREEDY_PARSING_FLAG;
    }
    if level == 0 {
        flags |= TDEFL_FORCE_ALL_RAW_BLOCKS;
    }
    flags
}

/// Builds the inflate engine's per-step flag word.
///
/// Header parsing and checksum verification are always requested;
/// `has_more_input` must be `true` on every step except the final one, where
/// clearing it tells the engine that a demand for further input is a
/// truncated-stream failure rather than a reason to pause.
pub fn decompression_flags(has_more_input: bool) -> u32 {
    let mut flags = TINFL_FLAG_PARSE_ZLIB_HEADER | TINFL_FLAG_COMPUTE_ADLER32;
    if has_more_input {
        flags |= TINFL_FLAG_HAS_MORE_INPUT;
    }
    flags
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
