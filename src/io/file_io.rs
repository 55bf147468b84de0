//! File I/O primitives for the streaming pipeline.
//!
//! Two entry points are used by the higher-level drivers:
//!
//! - [`open_src_file`] — resolves a path string to a `Box<dyn Read>`,
//!   handling the `"stdin"` sentinel and rejecting directories.
//! - [`open_dst_file`] — resolves a path string to a [`DstFile`],
//!   handling the `"stdout"` and discard sentinels and enforcing the
//!   overwrite policy from [`Prefs`].
//!
//! Sentinel string constants ([`STDIN_MARK`], [`STDOUT_MARK`], [`NUL_MARK`],
//! [`NULL_OUTPUT`]) are re-exported so callers can compare against them
//! without embedding magic strings.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Read, Write};
use std::path::Path;
use std::sync::atomic::Ordering;

use crate::io::prefs::{Prefs, DISPLAY_LEVEL};
use crate::util::is_directory;

// ---------------------------------------------------------------------------
// Sentinel strings
// ---------------------------------------------------------------------------

/// Sentinel: read from standard input.
pub const STDIN_MARK: &str = "stdin";

/// Sentinel: write to standard output.
pub const STDOUT_MARK: &str = "stdout";

/// Sentinel: discard output (write to /dev/null or equivalent).
#[cfg(windows)]
pub const NUL_MARK: &str = "nul";
#[cfg(not(windows))]
pub const NUL_MARK: &str = "/dev/null";

/// Alternate sentinel accepted for discard output.
pub const NULL_OUTPUT: &str = "null";

// ---------------------------------------------------------------------------
// Private sentinel checks
// ---------------------------------------------------------------------------

#[inline]
fn is_dev_null(s: &str) -> bool {
    s == NUL_MARK
}

#[inline]
fn is_stdin(s: &str) -> bool {
    s == STDIN_MARK
}

#[inline]
fn is_stdout(s: &str) -> bool {
    s == STDOUT_MARK
}

// ---------------------------------------------------------------------------
// Source file
// ---------------------------------------------------------------------------

/// Opens a source file for reading, returning a boxed [`Read`].
///
/// - If `path` is the sentinel `"stdin"`, returns standard input.
/// - If `path` is a directory, returns an [`io::ErrorKind::InvalidInput`] error.
/// - Otherwise opens the file and wraps it in a [`BufReader`] for efficient
///   sequential reads.
pub fn open_src_file(path: &str) -> io::Result<Box<dyn Read>> {
    if is_stdin(path) {
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 4 {
            eprintln!("Using stdin for input");
        }
        #[cfg(windows)]
        // SAFETY: calling _setmode on stdin (fd=0) is always valid.
        unsafe {
            libc::_setmode(0, libc::O_BINARY);
        }
        return Ok(Box::new(io::stdin()));
    }

    if is_directory(Path::new(path)) {
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 1 {
            eprintln!("zpipe: {} is a directory -- ignored", path);
        }
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}: is a directory", path),
        ));
    }

    let f = File::open(path).map_err(|e| {
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 1 {
            eprintln!("{}: {}", path, e);
        }
        e
    })?;
    Ok(Box::new(BufReader::new(f)))
}

// ---------------------------------------------------------------------------
// Destination file
// ---------------------------------------------------------------------------

/// A write-capable destination produced by [`open_dst_file`].
///
/// Wraps either a regular [`File`], stdout, or a discard sink ([`io::sink`]).
/// Callers inspect `is_stdout` to suppress terminal-unfriendly output and to
/// skip file-stat propagation.
pub struct DstFile {
    inner: Box<dyn Write>,
    pub is_stdout: bool,
}

impl Write for DstFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Opens a destination for writing, returning a [`DstFile`].
///
/// Resolves special sentinels before touching the filesystem:
/// - `"stdout"` → stdout (`is_stdout = true`).
/// - [`NUL_MARK`] → [`io::sink`] (all bytes discarded, no file created).
///
/// For regular paths, enforces the overwrite policy from `prefs`:
/// - When `prefs.overwrite == false` and the file already exists, the
///   behaviour depends on the notification level: at level ≤ 1 the call
///   returns an [`io::ErrorKind::AlreadyExists`] error without prompting;
///   at higher levels an interactive yes/no prompt is shown on stderr.
pub fn open_dst_file(path: &str, prefs: &Prefs) -> io::Result<DstFile> {
    if is_stdout(path) {
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 4 {
            eprintln!("Using stdout for output");
        }
        #[cfg(windows)]
        // SAFETY: calling _setmode on stdout (fd=1) is always valid.
        unsafe {
            libc::_setmode(1, libc::O_BINARY);
        }
        return Ok(DstFile {
            inner: Box::new(io::stdout()),
            is_stdout: true,
        });
    }

    if is_dev_null(path) {
        return Ok(DstFile {
            inner: Box::new(io::sink()),
            is_stdout: false,
        });
    }

    // Overwrite guard: refuse or prompt before clobbering an existing file.
    if !prefs.overwrite && Path::new(path).exists() {
        let display_level = DISPLAY_LEVEL.load(Ordering::Relaxed);
        if display_level <= 1 {
            // No interaction possible — refuse silently.
            eprintln!("{} already exists; not overwritten  ", path);
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{}: already exists; not overwritten", path),
            ));
        }
        // Interactive prompt.
        eprint!("{} already exists; do you want to overwrite (y/N) ? ", path);
        let _ = io::stderr().flush();
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        let first = line.trim_start().chars().next().unwrap_or('\0');
        if first != 'y' && first != 'Y' {
            eprintln!("    not overwritten  ");
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{}: not overwritten", path),
            ));
        }
    }

    let f = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| {
            if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 1 {
                eprintln!("{}: {}", path, e);
            }
            e
        })?;

    Ok(DstFile {
        inner: Box::new(f),
        is_stdout: false,
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
