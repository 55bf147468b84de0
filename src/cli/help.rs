// cli/help.rs — usage text printers and the fatal-error exit helper.

use crate::cli::constants::{COMPRESSOR_NAME, ZZ_EXTENSION};
use crate::config::{CLEVEL_DEFAULT, CLEVEL_MAX};

/// Standard-input mark accepted in place of a filename.
const STDINMARK: &str = "stdin";

// ── usage ─────────────────────────────────────────────────────────────────────
/// Print brief usage to stderr.
pub fn print_usage(program: &str) {
    eprintln!("Usage : ");
    eprintln!("      {} [arg] [input] [output] ", program);
    eprintln!();
    eprintln!("input   : a filename ");
    eprintln!(
        "          with no FILE, or when FILE is - or {}, read standard input",
        STDINMARK
    );
    eprintln!("Arguments : ");
    eprintln!(" -{}     : default compression level ", CLEVEL_DEFAULT);
    eprintln!(" -0     : no compression, framing only ");
    eprintln!(" -{}    : slowest compression level ", CLEVEL_MAX);
    eprintln!(
        " -d     : decompression (default for {} extension)",
        ZZ_EXTENSION
    );
    eprintln!(" -f     : overwrite output without prompting ");
    eprintln!(" -k     : preserve source files(s)  (default) ");
    eprintln!("--rm    : remove source file(s) after successful de/compression ");
    eprintln!(" -h/-H  : display help/long help and exit ");
}

// ── usage_advanced ────────────────────────────────────────────────────────────
/// Print the welcome banner followed by brief usage and advanced options to stderr.
pub fn print_usage_advanced(program: &str) {
    print_welcome_message();
    print_usage(program);

    eprintln!();
    eprintln!("Advanced arguments :");
    eprintln!(" -V     : display Version number and exit ");
    eprintln!(" -v     : verbose mode ");
    eprintln!(" -q     : suppress warnings; specify twice to suppress errors too");
    eprintln!(" -c     : force write to standard output, even if it is the console");
    eprintln!(" -t     : test compressed file integrity");
    eprintln!(" -m     : multiple input files (implies automatic output filenames)");
    eprintln!(" -z     : force compression ");
    eprintln!("--[no-]force : force/refuse overwrite of destination files");
    eprintln!();
    eprintln!("Aliases :");
    eprintln!(
        "  as `zzcat`   : decompress every input to stdout (implies -d -c -m)"
    );
    eprintln!("  as `unzpipe` : decompress (implies -d)");
}

// ── welcome banner ────────────────────────────────────────────────────────────
/// Print the version banner to stderr.
pub fn print_welcome_message() {
    let bits = (std::mem::size_of::<*const ()>() * 8) as u32;
    eprintln!(
        "*** {} v{} {}-bit, streaming zlib codec ***",
        COMPRESSOR_NAME,
        crate::ZPIPE_VERSION_STRING,
        bits,
    );
}
