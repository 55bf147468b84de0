//! Streaming zlib compression.
//!
//! This module implements the compression half of the zpipe pipeline.
//! It exposes:
//!
//! - [`compress_stream`] — the core pump: reads a source in 512 KiB chunks,
//!   feeds them to the deflate engine, and drains compressed output to a
//!   sink, keeping memory bounded regardless of stream length.
//! - [`compress_filename`] — end-to-end single-file compression.
//! - [`compress_multiple_filenames`] — batch compression with a shared suffix.
//!
//! # Flow control
//!
//! One engine step consumes as much of the current input span as it likes
//! and produces as much output as fits in the free output span; the pump
//! advances both cursors by exactly the reported counts. The input buffer
//! is refilled only once fully consumed, and a short fill marks
//! end-of-input, turning the next steps into finish steps. The output
//! buffer is flushed whenever it fills up and always before the loop
//! terminates — including on failure, so output produced before an error
//! still reaches the sink.

use std::fs;
use std::io::{self, Read, Write};

use miniz_oxide::deflate::core as deflate;

use crate::io::file_io::{open_dst_file, open_src_file, NUL_MARK, STDIN_MARK, STDOUT_MARK};
use crate::io::prefs::{display_level, final_time_display, Prefs, KB};
use crate::timefn::get_time;
use crate::util::copy_file_stat;
use crate::zlib::config::compression_flags;
use crate::zlib::error::CompressError;

extern "C" {
    fn clock() -> libc::clock_t;
}

// ---------------------------------------------------------------------------
// Buffer sizes
// ---------------------------------------------------------------------------

/// Size of the input read buffer. Must be >= 1.
pub const IN_BUF_SIZE: usize = 512 * KB;

/// Size of the compressed output buffer. Must be >= 1.
pub const OUT_BUF_SIZE: usize = 512 * KB;

// ---------------------------------------------------------------------------
// Public result type
// ---------------------------------------------------------------------------

/// Statistics returned from a successful compression run.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompressStats {
    /// Total uncompressed source bytes consumed.
    pub bytes_in: u64,
    /// Total compressed bytes written to the destination.
    pub bytes_out: u64,
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

/// Compresses everything readable from `src` into a single zlib stream
/// written to `dst`.
///
/// `level` selects the effort/ratio trade-off and is clamped to [0, 10];
/// level 0 emits stored blocks (framing only). Both working buffers live on
/// this call's frame and the engine state is created fresh per call, so
/// concurrent calls on separate threads need no coordination.
///
/// # Errors
///
/// Returns `Err` on any read or write failure, or when the engine reports a
/// failing status (surfaced as a [`CompressError`] payload). Output already
/// produced before a failure has been flushed to `dst`; the stream is
/// nevertheless unusable past that point.
pub fn compress_stream(
    src: &mut (impl Read + ?Sized),
    dst: &mut impl Write,
    level: i32,
) -> io::Result<CompressStats> {
    // Initialize the low-level compressor.
    let mut deflator = deflate::CompressorOxide::new(compression_flags(level));

    let mut in_buf = vec![0u8; IN_BUF_SIZE];
    let mut out_buf = vec![0u8; OUT_BUF_SIZE];

    let mut in_pos = 0usize; // next unconsumed input byte
    let mut in_len = 0usize; // valid bytes in in_buf
    let mut out_pos = 0usize; // produced-and-unflushed output bytes
    let mut total_in: u64 = 0;
    let mut total_out: u64 = 0;
    let mut finish = false;

    loop {
        if in_pos == in_len && !finish {
            // Input buffer fully consumed: read the next chunk. A short
            // fill detects EOF; the final chunk is compressed with the
            // finish directive so the engine emits all buffered output.
            in_len = read_to_capacity(src, &mut in_buf)?;
            in_pos = 0;
            finish = in_len < IN_BUF_SIZE;
        }

        let flush = if finish {
            deflate::TDEFLFlush::Finish
        } else {
            deflate::TDEFLFlush::None
        };

        // Compress as much of the input as possible (or all of it) into the
        // free span of the output buffer.
        let (status, consumed, produced) = deflate::compress(
            &mut deflator,
            &in_buf[in_pos..in_len],
            &mut out_buf[out_pos..],
            flush,
        );
        debug_assert!(consumed <= in_len - in_pos, "engine overran input span");
        debug_assert!(produced <= OUT_BUF_SIZE - out_pos, "engine overran output span");

        in_pos += consumed;
        total_in += consumed as u64;
        out_pos += produced;
        total_out += produced as u64;

        if status != deflate::TDEFLStatus::Okay || out_pos == OUT_BUF_SIZE {
            // Output buffer is full, or compression is done or failed:
            // write the produced bytes out and reset the buffer. On failure
            // this is the best-effort flush of legitimate partial output.
            dst.write_all(&out_buf[..out_pos]).map_err(|e| {
                io::Error::new(e.kind(), format!("Write error: {e}"))
            })?;
            out_pos = 0;

            display_level(
                2,
                &format!(
                    "\rRead : {} MiB   ==> {:.2}%   ",
                    total_in >> 20,
                    total_out as f64 / total_in.max(1) as f64 * 100.0,
                ),
            );
        }

        match status {
            deflate::TDEFLStatus::Done => break,
            deflate::TDEFLStatus::Okay => {}
            failed => {
                return Err(CompressError::new("deflate_step", failed as i32).into_io());
            }
        }
    }

    Ok(CompressStats {
        bytes_in: total_in,
        bytes_out: total_out,
    })
}

// ---------------------------------------------------------------------------
// Single-file driver
// ---------------------------------------------------------------------------

/// Inner single-file path: opens both ends, runs the stream driver, then
/// applies the post-transfer file policies (stat propagation, source
/// removal, summary display).
fn compress_filename_internal(
    stats: &mut CompressStats,
    src_filename: &str,
    dst_filename: &str,
    compression_level: i32,
    prefs: &Prefs,
) -> io::Result<()> {
    let mut src_reader = open_src_file(src_filename)?;
    let dst_file = open_dst_file(dst_filename, prefs)?;
    let dst_is_stdout = dst_file.is_stdout;
    let mut dst_writer: Box<dyn Write> = Box::new(dst_file);

    *stats = compress_stream(&mut *src_reader, &mut dst_writer, compression_level)?;
    dst_writer.flush()?;

    // Release the destination handle before touching its metadata.
    drop(dst_writer);

    // Copy owner/permissions/mtime from src to dst.
    if src_filename != STDIN_MARK && !dst_is_stdout && dst_filename != NUL_MARK {
        let _ = copy_file_stat(src_filename, dst_filename);
    }

    // Remove source file if requested.
    if prefs.remove_src_file && src_filename != STDIN_MARK {
        fs::remove_file(src_filename).map_err(|e| {
            io::Error::new(e.kind(), format!("Remove error: {}: {}", src_filename, e))
        })?;
    }

    display_level(2, &format!("\r{:79}\r", ""));
    display_level(
        2,
        &format!(
            "Compressed {} bytes into {} bytes ==> {:.2}%\n",
            stats.bytes_in,
            stats.bytes_out,
            stats.bytes_out as f64 / stats.bytes_in.max(1) as f64 * 100.0,
        ),
    );

    Ok(())
}

/// Compress a single file into a zlib stream.
///
/// `src` may be `"stdin"` to read from standard input;
/// `dst` may be `"stdout"` to write to standard output.
pub fn compress_filename(
    src: &str,
    dst: &str,
    compression_level: i32,
    prefs: &Prefs,
) -> io::Result<CompressStats> {
    let time_start = get_time();
    let cpu_start = unsafe { clock() };
    let mut stats = CompressStats::default();

    let result = compress_filename_internal(&mut stats, src, dst, compression_level, prefs);

    final_time_display(time_start, cpu_start, stats.bytes_in);

    result?;
    Ok(stats)
}

// ---------------------------------------------------------------------------
// Batch driver
// ---------------------------------------------------------------------------

/// Compress multiple files, appending `suffix` to each output filename.
/// If `suffix` is `"stdout"`, all streams are written to stdout.
///
/// Returns the number of files that could not be compressed.
pub fn compress_multiple_filenames(
    srcs: &[&str],
    suffix: &str,
    compression_level: i32,
    prefs: &Prefs,
) -> io::Result<usize> {
    let time_start = get_time();
    let cpu_start = unsafe { clock() };
    let mut total_processed: u64 = 0;
    let mut missed_files: usize = 0;

    for &src_name in srcs {
        let mut stats = CompressStats::default();

        let dst_name: String = if suffix == STDOUT_MARK {
            STDOUT_MARK.to_owned()
        } else {
            format!("{}{}", src_name, suffix)
        };

        if compress_filename_internal(&mut stats, src_name, &dst_name, compression_level, prefs)
            .is_err()
        {
            missed_files += 1;
        }

        total_processed += stats.bytes_in;
    }

    final_time_display(time_start, cpu_start, total_processed);

    Ok(missed_files)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
