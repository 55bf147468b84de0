//! Binary entry point for the `zpipe` command-line tool.
//!
//! Handles post-parse validation, automatic output filename resolution, and
//! operation dispatch (compress, decompress, test).
//!
//! # Control flow
//!
//! 1. [`detect_alias`] inspects `argv[0]` to infer an initial mode
//!    (e.g. `unzpipe` implies decompress).
//! 2. [`parse_args`] processes all flags and builds a [`ParsedArgs`] value.
//! 3. [`run`] dispatches to the appropriate I/O operation and returns an
//!    exit code.

use std::io::IsTerminal;

use zpipe::cli::args::{parse_args, ParsedArgs};
use zpipe::cli::constants::{display_level, set_display_level, ZZ_EXTENSION};
use zpipe::cli::help::print_usage;
use zpipe::cli::init::detect_alias;
use zpipe::cli::op_mode::{determine_op_mode, OpMode};
use zpipe::io::{
    compress_filename, compress_multiple_filenames, decompress_filename,
    decompress_multiple_filenames, set_notification_level, NUL_MARK, STDIN_MARK, STDOUT_MARK,
};

// ── Post-parse dispatch ───────────────────────────────────────────────────────

/// Execute the operation selected by argument parsing.
///
/// Returns the process exit code (0 = success, non-zero = error).
fn run(args: ParsedArgs) -> i32 {
    let prefs = {
        let mut p = args.prefs;
        // Test mode decompresses to the discard device.
        if args.op_mode == OpMode::Test {
            p.set_test_mode(true);
        }
        p
    };
    let mut op_mode = args.op_mode;
    let c_level = args.c_level;
    let force_stdout = args.force_stdout;
    let mut multiple_inputs = args.multiple_inputs;
    let input_filename = args.input_filename;
    let mut output_filename = args.output_filename;
    let in_file_names = args.in_file_names;
    let exe_name = args.exe_name;

    // Keeps an auto-generated output filename alive until end of function.
    let mut _output_filename_storage: Option<String> = None;

    // ── Verbosity banner ──────────────────────────────────────────────────
    zpipe::displaylevel!(
        3,
        "*** {} v{} {}-bit, streaming zlib codec ***\n",
        zpipe::cli::constants::COMPRESSOR_NAME,
        zpipe::ZPIPE_VERSION_STRING,
        (std::mem::size_of::<*const ()>() * 8)
    );

    // ── Test mode routes to the discard device ────────────────────────────
    if op_mode == OpMode::Test {
        output_filename = Some(NUL_MARK.to_owned());
        op_mode = OpMode::Decompress;
    }

    // ── Default input filename to stdin ───────────────────────────────────
    let input_filename: String = if multiple_inputs {
        in_file_names
            .first()
            .cloned()
            .unwrap_or_else(|| STDIN_MARK.to_owned())
    } else {
        input_filename.unwrap_or_else(|| STDIN_MARK.to_owned())
    };

    // ── Refuse stdin from console ─────────────────────────────────────────
    if input_filename == STDIN_MARK && std::io::stdin().is_terminal() {
        zpipe::displaylevel!(1, "refusing to read from a console\n");
        return 1;
    }

    // ── Auto stdout when reading stdin ────────────────────────────────────
    if input_filename == STDIN_MARK && output_filename.is_none() {
        output_filename = Some(STDOUT_MARK.to_owned());
    }

    // ── Auto output filename determination ────────────────────────────────
    if output_filename.is_none() && !multiple_inputs {
        if op_mode == OpMode::Auto {
            op_mode = determine_op_mode(&input_filename);
        }
        if op_mode == OpMode::Compress {
            let out = format!("{}{}", input_filename, ZZ_EXTENSION);
            zpipe::displaylevel!(2, "Compressed filename will be : {} \n", out);
            _output_filename_storage = Some(out.clone());
            output_filename = Some(out);
        } else if op_mode == OpMode::Decompress {
            // Strip the .zz suffix to recover the original name.
            if let Some(base) = input_filename.strip_suffix(ZZ_EXTENSION) {
                zpipe::displaylevel!(2, "Decoding file {} \n", base);
                _output_filename_storage = Some(base.to_owned());
                output_filename = Some(base.to_owned());
            } else {
                zpipe::displaylevel!(1, "Cannot determine an output filename \n");
                print_usage(&exe_name);
                return 1;
            }
        }
    }

    // Multiple-input mode derives each output name from the suffix instead.
    let output_filename: String = output_filename.unwrap_or_default();

    // ── Refuse console output ─────────────────────────────────────────────
    if output_filename == STDOUT_MARK
        && std::io::stdout().is_terminal()
        && !force_stdout
    {
        zpipe::displaylevel!(1, "refusing to write to console without -c \n");
        return 1;
    }

    // ── Display level downgrade for pipelines and batches ─────────────────
    if output_filename == STDOUT_MARK && display_level() == 2 {
        set_display_level(1);
    }
    if multiple_inputs && display_level() == 2 {
        set_display_level(1);
    }

    // ── Auto-determine mode from extension ────────────────────────────────
    if op_mode == OpMode::Auto {
        op_mode = determine_op_mode(&input_filename);
    }

    // ── Sync the I/O layer's notification level ───────────────────────────
    set_notification_level(display_level() as i32);
    if in_file_names.is_empty() {
        multiple_inputs = false;
    }

    // ── Operation dispatch ────────────────────────────────────────────────
    if op_mode == OpMode::Decompress {
        if multiple_inputs {
            let dec_suffix: &str = if output_filename == STDOUT_MARK {
                STDOUT_MARK
            } else if output_filename == NUL_MARK {
                NUL_MARK
            } else {
                ZZ_EXTENSION
            };
            let srcs: Vec<&str> = in_file_names.iter().map(|s| s.as_str()).collect();
            match decompress_multiple_filenames(&srcs, dec_suffix, &prefs) {
                Ok(missed) => missed as i32,
                Err(_) => 1,
            }
        } else {
            match decompress_filename(&input_filename, &output_filename, &prefs) {
                Ok(_) => 0,
                Err(_) => 1,
            }
        }
    } else {
        // Compress (default).
        if multiple_inputs {
            let comp_suffix: &str = if output_filename == STDOUT_MARK {
                STDOUT_MARK
            } else {
                ZZ_EXTENSION
            };
            let srcs: Vec<&str> = in_file_names.iter().map(|s| s.as_str()).collect();
            match compress_multiple_filenames(&srcs, comp_suffix, c_level, &prefs) {
                Ok(missed) => missed as i32,
                Err(_) => 1,
            }
        } else {
            match compress_filename(&input_filename, &output_filename, c_level, &prefs) {
                Ok(_) => 0,
                Err(_) => 1,
            }
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // argv[0] → alias detection.
    let argv0 = std::env::args().next().unwrap_or_else(|| "zpipe".to_owned());
    let init = detect_alias(&argv0);

    // Argument parsing loop.
    let args = match parse_args(init) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("zpipe: {}", e);
            std::process::exit(1);
        }
    };

    // Help / version flags set exit_early; the caller should exit 0.
    if args.exit_early {
        std::process::exit(0);
    }

    let exit_code = run(args);
    std::process::exit(exit_code);
}
