//! Streaming zlib decompression.
//!
//! Mirror image of [`crate::io::compress`]: [`decompress_stream`] pumps a
//! compressed source through the inflate engine into a sink with two fixed
//! buffers, and [`decompress_filename`] / [`decompress_multiple_filenames`]
//! add the file handling around it.
//!
//! # The output buffer doubles as the history window
//!
//! The inflate engine reads back-references out of the bytes it has already
//! produced, so the output buffer is handed to every step in full together
//! with the current write position, and its capacity must be a power of two
//! at least as large as the 32 KiB window the format permits. The buffer is
//! only ever drained when completely full (or at termination), which keeps
//! the engine's wrap-around arithmetic aligned with the flushes.

use std::io::{self, Read, Write};

use miniz_oxide::inflate::core as inflate;
use miniz_oxide::inflate::TINFLStatus;

use crate::io::file_io::{open_dst_file, open_src_file, NUL_MARK, STDIN_MARK, STDOUT_MARK};
use crate::io::prefs::{display_level, final_time_display, Prefs, KB};
use crate::timefn::get_time;
use crate::util::copy_file_stat;
use crate::zlib::config::decompression_flags;
use crate::zlib::error::DecompressError;

extern "C" {
    fn clock() -> libc::clock_t;
}

// ---------------------------------------------------------------------------
// Buffer sizes
// ---------------------------------------------------------------------------

/// Size of the compressed input read buffer. Must be >= 1.
pub const IN_BUF_SIZE: usize = 512 * KB;

/// Size of the decompressed output buffer. Must be a power of two >= 32 KiB,
/// because the engine not only writes but reads back from this buffer as it
/// decompresses.
pub const OUT_BUF_SIZE: usize = 512 * KB;

const _: () = assert!(OUT_BUF_SIZE.is_power_of_two());
const _: () = assert!(OUT_BUF_SIZE >= 32 * KB);

// ---------------------------------------------------------------------------
// Public result type
// ---------------------------------------------------------------------------

/// Statistics returned from a successful decompression run.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecompressStats {
    /// Total compressed source bytes consumed.
    pub bytes_in: u64,
    /// Total decompressed bytes written to the destination.
    pub decompressed_bytes: u64,
}

// ---------------------------------------------------------------------------
// read_to_capacity: fill buf[..capacity] from reader (equivalent to fread)
// ---------------------------------------------------------------------------

/// Fills `buf` from `reader` until it is full or the source is exhausted,
/// retrying interrupted reads. A return value smaller than `buf.len()`
/// therefore means genuine end-of-stream, even for pipe-like sources whose
/// individual reads may return short.
fn read_to_capacity(reader: &mut (impl Read + ?Sized), buf: &mut [u8]) -> io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break, // EOF
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}

// ---------------------------------------------------------------------------
// Stream driver
// ---------------------------------------------------------------------------

/// Decompresses one zlib stream readable from `src` into `dst`, parsing the
/// stream header and verifying the trailing Adler-32 checksum.
///
/// The engine state starts from its zeroed ready condition
/// (`DecompressorOxide::default()`) and is never reused across calls. Both
/// working buffers live on this call's frame; concurrent calls on separate
/// threads need no coordination.
///
/// # Errors
///
/// Returns `Err` on any read or write failure, on malformed or truncated
/// compressed data, and on checksum mismatch (surfaced as a
/// [`DecompressError`] payload). Output already produced before a failure
/// has been flushed to `dst`.
pub fn decompress_stream(
    src: &mut (impl Read + ?Sized),
    dst: &mut impl Write,
) -> io::Result<DecompressStats> {
    let mut inflator = inflate::DecompressorOxide::default();

    let mut in_buf = vec![0u8; IN_BUF_SIZE];
    let mut out_buf = vec![0u8; OUT_BUF_SIZE];

    let mut in_pos = 0usize; // next unconsumed input byte
    let mut in_len = 0usize; // valid bytes in in_buf
    let mut out_pos = 0usize; // produced-and-unflushed output bytes
    let mut total_in: u64 = 0;
    let mut total_out: u64 = 0;
    let mut eof = false;

    loop {
        if in_pos == in_len && !eof {
            // Input buffer is empty: read more compressed bytes. A short
            // fill marks end-of-input; from then on the engine is told no
            // further input exists, so an unsatisfied demand for more bytes
            // becomes a truncated-stream failure instead of a stall.
            in_len = read_to_capacity(src, &mut in_buf)?;
            in_pos = 0;
            eof = in_len < IN_BUF_SIZE;
        }

        // The whole output buffer is passed every step: the engine resolves
        // back-references against the bytes before `out_pos`.
        let (status, consumed, produced) = inflate::decompress(
            &mut inflator,
            &in_buf[in_pos..in_len],
            &mut out_buf,
            out_pos,
            decompression_flags(!eof),
        );
        debug_assert!(consumed <= in_len - in_pos, "engine overran input span");
        debug_assert!(produced <= OUT_BUF_SIZE - out_pos, "engine overran output span");

        in_pos += consumed;
        total_in += consumed as u64;
        out_pos += produced;
        total_out += produced as u64;

        // "Done or lower" is terminal: Done itself is success, anything
        // below is a failure code.
        let terminal = (status as i8) <= (TINFLStatus::Done as i8);

        if terminal || out_pos == OUT_BUF_SIZE {
            // Output buffer is full, or decompression finished or failed:
            // write the produced bytes out and reset the buffer. On failure
            // this is the best-effort flush of legitimate partial output.
            dst.write_all(&out_buf[..out_pos]).map_err(|e| {
                io::Error::new(e.kind(), format!("Write error: {e}"))
            })?;
            out_pos = 0;

            display_level(2, &format!("\rDecompressed : {} MiB  ", total_out >> 20));
        }

        if terminal {
            if status == TINFLStatus::Done {
                break;
            }
            return Err(DecompressError::new("inflate_step", status as i8 as i32).into_io());
        }
    }

    Ok(DecompressStats {
        bytes_in: total_in,
        decompressed_bytes: total_out,
    })
}

// ---------------------------------------------------------------------------
// Single-file driver
// ---------------------------------------------------------------------------

/// Inner single-file path: opens both ends, runs the stream driver, then
/// applies the post-transfer file policies.
fn decompress_filename_internal(
    stats: &mut DecompressStats,
    src_filename: &str,
    dst_filename: &str,
    prefs: &Prefs,
) -> io::Result<()> {
    // Test mode checks integrity only: route everything to the discard sink.
    let dst_target = if prefs.test_mode { NUL_MARK } else { dst_filename };

    let mut src_reader = open_src_file(src_filename)?;
    let dst_file = open_dst_file(dst_target, prefs)?;
    let dst_is_stdout = dst_file.is_stdout;
    let mut dst_writer: Box<dyn Write> = Box::new(dst_file);

    *stats = decompress_stream(&mut *src_reader, &mut dst_writer)?;
    dst_writer.flush()?;

    drop(dst_writer);

    if src_filename != STDIN_MARK && !dst_is_stdout && dst_target != NUL_MARK {
        let _ = copy_file_stat(src_filename, dst_target);
    }

    if prefs.remove_src_file && !prefs.test_mode && src_filename != STDIN_MARK {
        fs_remove(src_filename)?;
    }

    display_level(2, &format!("\r{:79}\r", ""));
    display_level(
        2,
        &format!(
            "Successfully decoded {} bytes \n",
            stats.decompressed_bytes
        ),
    );

    Ok(())
}

fn fs_remove(path: &str) -> io::Result<()> {
    std::fs::remove_file(path)
        .map_err(|e| io::Error::new(e.kind(), format!("Remove error: {}: {}", path, e)))
}

/// Decompress a single zlib stream from a file.
///
/// `src` may be `"stdin"` to read from standard input; `dst` may be
/// `"stdout"` to write to standard output or the platform null device to
/// verify integrity without writing (test mode).
pub fn decompress_filename(src: &str, dst: &str, prefs: &Prefs) -> io::Result<DecompressStats> {
    let time_start = get_time();
    let cpu_start = unsafe { clock() };
    let mut stats = DecompressStats::default();

    let result = decompress_filename_internal(&mut stats, src, dst, prefs);

    final_time_display(time_start, cpu_start, stats.decompressed_bytes);

    result?;
    Ok(stats)
}

// ---------------------------------------------------------------------------
// Batch driver
// ---------------------------------------------------------------------------

/// Decompress multiple files, deriving each output name by stripping
/// `suffix` from the source name. If `suffix` is `"stdout"` or the discard
/// sentinel, all streams go to that destination instead.
///
/// Sources that do not carry the suffix are skipped and counted. Returns
/// the number of files that could not be decompressed.
pub fn decompress_multiple_filenames(
    srcs: &[&str],
    suffix: &str,
    prefs: &Prefs,
) -> io::Result<usize> {
    let time_start = get_time();
    let cpu_start = unsafe { clock() };
    let mut total_processed: u64 = 0;
    let mut missed_files: usize = 0;

    for &src_name in srcs {
        let dst_name: String = if suffix == STDOUT_MARK || suffix == NUL_MARK {
            suffix.to_owned()
        } else if let Some(base) = src_name.strip_suffix(suffix) {
            base.to_owned()
        } else {
            display_level(
                1,
                &format!("{}: unknown suffix -- ignored \n", src_name),
            );
            missed_files += 1;
            continue;
        };

        let mut stats = DecompressStats::default();
        if decompress_filename_internal(&mut stats, src_name, &dst_name, prefs).is_err() {
            missed_files += 1;
        }
        total_processed += stats.decompressed_bytes;
    }

    final_time_display(time_start, cpu_start, total_processed);

    Ok(missed_files)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
