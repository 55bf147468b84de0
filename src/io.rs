//! Public API surface for zpipe stream and file I/O operations.
//!
//! This module assembles the I/O sub-modules and re-exports the symbols
//! consumed by the CLI and library users.

pub mod compress;
pub mod decompress;
pub mod file_io;
pub mod prefs;

// ── Core type re-exports ─────────────────────────────────────────────────────
pub use prefs::Prefs;

// ── Special I/O sentinels ────────────────────────────────────────────────────
pub use file_io::{NULL_OUTPUT, NUL_MARK, STDIN_MARK, STDOUT_MARK};

// ── Notification level (global) ──────────────────────────────────────────────
/// Set the global display/notification level for the I/O layer.
pub use prefs::set_notification_level;

// ── Stream drivers ───────────────────────────────────────────────────────────
/// Compress one byte stream end-to-end with bounded buffers.
pub use compress::compress_stream;

/// Decompress one byte stream end-to-end with bounded buffers.
pub use decompress::decompress_stream;

// ── File-level compression API ───────────────────────────────────────────────
/// Compress a single file.
pub use compress::compress_filename;

/// Compress multiple files with a given suffix.
pub use compress::compress_multiple_filenames;

// ── File-level decompression API ─────────────────────────────────────────────
/// Decompress a single file.
pub use decompress::decompress_filename;

/// Decompress multiple files.
pub use decompress::decompress_multiple_filenames;
