//! Typed failure values for the streaming drivers.
//!
//! Engine failures are surfaced to callers as `io::Error` values whose
//! payload is one of the structs below, so the failing routine's name and
//! the engine's numeric status survive the trip and can be recovered with
//! `io::Error::get_ref` + downcast.

use std::fmt;
use std::io;

// ---------------------------------------------------------------------------
// Status naming
// ---------------------------------------------------------------------------

/// Human-readable name for a deflate engine status code.
pub fn deflate_status_name(status: i32) -> &'static str {
    match status {
        -2 => "bad-param",
        -1 => "put-buf-failed",
        0 => "okay",
        1 => "done",
        _ => "unknown",
    }
}

/// Human-readable name for an inflate engine status code.
pub fn inflate_status_name(status: i32) -> &'static str {
    match status {
        -4 => "cannot-make-progress",
        -3 => "bad-param",
        -2 => "adler32-mismatch",
        -1 => "failed",
        0 => "done",
        1 => "needs-more-input",
        2 => "has-more-output",
        _ => "unknown",
    }
}

// ---------------------------------------------------------------------------
// CompressError
// ---------------------------------------------------------------------------

/// Fatal compression failure: the named engine routine returned `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressError {
    /// Identifier of the failing routine (e.g. `"deflate_step"`).
    pub op: &'static str,
    /// The engine's numeric status code.
    pub status: i32,
}

impl CompressError {
    pub fn new(op: &'static str, status: i32) -> Self {
        CompressError { op, status }
    }

    /// Wraps this failure into an `io::Error`, preserving it as the payload.
    pub fn into_io(self) -> io::Error {
        io::Error::other(self)
    }
}

impl fmt::Display for CompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "compression routine {} failed with status {} ({})",
            self.op,
            self.status,
            deflate_status_name(self.status)
        )
    }
}

impl std::error::Error for CompressError {}

// ---------------------------------------------------------------------------
// DecompressError
// ---------------------------------------------------------------------------

/// Fatal decompression failure: the named engine routine returned `status`.
///
/// Malformed headers, corrupt block data, checksum mismatches and truncated
/// streams each carry a distinct status code but are all surfaced through
/// this one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecompressError {
    /// Identifier of the failing routine (e.g. `"inflate_step"`).
    pub op: &'static str,
    /// The engine's numeric status code.
    pub status: i32,
}

impl DecompressError {
    pub fn new(op: &'static str, status: i32) -> Self {
        DecompressError { op, status }
    }

    /// Wraps this failure into an `io::Error`, preserving it as the payload.
    pub fn into_io(self) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidData, self)
    }
}

impl fmt::Display for DecompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "decompression routine {} failed with status {} ({})",
            self.op,
            self.status,
            inflate_status_name(self.status)
        )
    }
}

impl std::error::Error for DecompressError {}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
