// zpipe — bounded-memory streaming zlib compression tools

pub mod cli;
pub mod config;
pub mod io;
pub mod timefn;
pub mod util;
pub mod zlib;

// ── Version constants ─────────────────────────────────────────────────────────
pub const ZPIPE_VERSION_MAJOR: u32 = 0;
pub const ZPIPE_VERSION_MINOR: u32 = 4;
pub const ZPIPE_VERSION_RELEASE: u32 = 0;
pub const ZPIPE_VERSION_NUMBER: u32 =
    ZPIPE_VERSION_MAJOR * 100 * 100 + ZPIPE_VERSION_MINOR * 100 + ZPIPE_VERSION_RELEASE;
pub const ZPIPE_VERSION_STRING: &str = "0.4.0";

/// Returns the runtime version number.
pub fn version_number() -> u32 {
    ZPIPE_VERSION_NUMBER
}

/// Returns the runtime version string.
pub fn version_string() -> &'static str {
    ZPIPE_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use io::compress::{compress_stream, CompressStats};
pub use io::decompress::{decompress_stream, DecompressStats};
pub use zlib::error::{CompressError, DecompressError};
