//! Command-line argument parsing for the `zpipe` / `zzcat` / `unzpipe` family.
//!
//! The entry points are [`parse_args`] (reads `std::env::args()`) and
//! [`parse_args_from`] (takes an explicit slice, suitable for unit-testing).
//! Both return a [`ParsedArgs`] value that captures every option and
//! filename discovered during the parse.
//!
//! Short options may be aggregated (e.g. `-9fv`). Long options use the
//! `--option` syntax. A bare `--` marks the end of options; all subsequent
//! arguments are treated as file paths regardless of whether they start
//! with `-`.
//!
//! Bad or unrecognised options return an `Err` with a human-readable
//! message that begins with `"bad usage: "`.

use anyhow::anyhow;

use crate::cli::arg_utils::read_u32_from_str;
use crate::cli::constants::{display_level, set_display_level};
use crate::cli::help::{print_usage_advanced, print_welcome_message};
use crate::cli::init::CliInit;
use crate::cli::op_mode::OpMode;
use crate::io::file_io::{NULL_OUTPUT, NUL_MARK, STDIN_MARK, STDOUT_MARK};
use crate::io::prefs::Prefs;

// ── Public output type ────────────────────────────────────────────────────────

/// Complete set of options and filenames produced by the argument parsing loop.
///
/// Fields are populated by [`parse_args_from`] and consumed by the dispatch
/// phase that selects compress / decompress behaviour.
#[derive(Debug)]
pub struct ParsedArgs {
    /// I/O preferences.
    pub prefs: Prefs,
    /// Resolved operation mode.
    pub op_mode: OpMode,
    /// Compression level (clamped downstream to [0, 10]).
    pub c_level: i32,
    /// Force output to stdout even if it is a terminal.
    pub force_stdout: bool,
    /// Treat all non-option arguments as input files (multiple-input mode).
    pub multiple_inputs: bool,
    /// Single input filename (non-multiple-input mode).
    pub input_filename: Option<String>,
    /// Single output filename (non-multiple-input mode).
    pub output_filename: Option<String>,
    /// Input filenames collected in multiple-input mode.
    pub in_file_names: Vec<String>,
    /// When `true`, a --version / --help flag was processed; the caller
    /// should exit 0 without performing any I/O operation.
    pub exit_early: bool,
    /// Program name (argv[0] basename), used by help functions.
    pub exe_name: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` (skipping argv[0]) using `init` as the starting state.
///
/// Delegates to [`parse_args_from`] after collecting `argv` into a `Vec<String>`.
pub fn parse_args(init: CliInit) -> anyhow::Result<ParsedArgs> {
    let exe_name = std::env::args().next().unwrap_or_default();
    let argv: Vec<String> = std::env::args().skip(1).collect();
    parse_args_from(init, &exe_name, &argv)
}

/// Parse an explicit argument list using `init` as the starting state.
///
/// `exe_name` is argv[0] (used for help text). `argv` is argv[1..].
/// This variant is callable from tests without touching `std::env`.
pub fn parse_args_from(
    init: CliInit,
    exe_name: &str,
    argv: &[String],
) -> anyhow::Result<ParsedArgs> {
    // Unpack initial state produced by alias detection in CliInit.
    let CliInit {
        mut prefs,
        op_mode: init_op_mode,
        multiple_inputs: init_multiple_inputs,
        c_level: init_c_level,
        force_stdout: init_force_stdout,
        output_filename: init_output_filename,
    } = init;

    // --- Mutable parsing state ---
    let mut op_mode = init_op_mode;
    let mut c_level: i32 = init_c_level;
    let mut force_stdout = init_force_stdout;
    let mut force_overwrite = false;
    let mut multiple_inputs = init_multiple_inputs;
    let mut input_filename: Option<String> = None;
    let mut output_filename: Option<String> = init_output_filename;
    let mut in_file_names: Vec<String> = Vec::new();
    let mut exit_early = false;
    let mut all_arguments_are_files = false;

    let mut arg_idx = 0usize;
    while arg_idx < argv.len() {
        let argument = &argv[arg_idx];
        if argument.is_empty() {
            arg_idx += 1;
            continue;
        }

        let bytes = argument.as_bytes();

        // ── Non-option path (or end-of-options forced by `--`) ────────────────
        if all_arguments_are_files || bytes[0] != b'-' {
            if multiple_inputs {
                in_file_names.push(argument.clone());
            } else if input_filename.is_none() {
                input_filename = Some(argument.clone());
            } else if output_filename.is_none() {
                // The special filename "null" is normalised to a sentinel so
                // downstream code recognises it as the discard device.
                let s = if argument == NULL_OUTPUT {
                    NUL_MARK.to_owned()
                } else {
                    argument.clone()
                };
                output_filename = Some(s);
            } else {
                // 3rd or later non-option argument with neither -m nor -f:
                if force_overwrite {
                    crate::displaylevel!(
                        1,
                        "Warning: {} won't be used ! Do you want multiple input files (-m) ? \n",
                        argument
                    );
                } else {
                    return Err(anyhow!(
                        "Error: {} won't be used ! Do you want multiple input files (-m) ?",
                        argument
                    ));
                }
            }
            arg_idx += 1;
            continue;
        }

        // ── Single `-` means stdin (as input) or stdout (as output) ──────────
        if bytes.len() == 1 {
            if input_filename.is_none() {
                input_filename = Some(STDIN_MARK.to_owned());
            } else {
                output_filename = Some(STDOUT_MARK.to_owned());
            }
            arg_idx += 1;
            continue;
        }

        // ── Long options (`--...`) ────────────────────────────────────────────
        if bytes[1] == b'-' {
            // `--` end-of-options sentinel
            if argument == "--" {
                all_arguments_are_files = true;
                arg_idx += 1;
                continue;
            }

            if argument == "--compress" {
                op_mode = OpMode::Compress;
            } else if argument == "--decompress" || argument == "--uncompress" {
                op_mode = OpMode::Decompress;
            } else if argument == "--multiple" {
                multiple_inputs = true;
            } else if argument == "--test" {
                op_mode = OpMode::Test;
            } else if argument == "--force" {
                force_overwrite = true;
                prefs.set_overwrite(true);
            } else if argument == "--no-force" {
                prefs.set_overwrite(false);
            } else if argument == "--stdout" || argument == "--to-stdout" {
                force_stdout = true;
                output_filename = Some(STDOUT_MARK.to_owned());
            } else if argument == "--verbose" {
                let lvl = display_level().saturating_add(1);
                set_display_level(lvl);
            } else if argument == "--quiet" {
                let lvl = display_level();
                if lvl > 0 {
                    set_display_level(lvl - 1);
                }
            } else if argument == "--version" {
                print_welcome_message();
                exit_early = true;
                break;
            } else if argument == "--help" {
                print_usage_advanced(exe_name);
                exit_early = true;
                break;
            } else if argument == "--keep" {
                prefs.set_remove_src_file(false);
            } else if argument == "--rm" {
                prefs.set_remove_src_file(true);
            } else if argument == "--best" {
                c_level = crate::config::CLEVEL_MAX;
            } else if argument == "--fast" {
                c_level = crate::config::CLEVEL_MIN;
            } else {
                return Err(anyhow!("bad usage: unknown option: {}", argument));
            }

            arg_idx += 1;
            continue;
        }

        // ── Short options (possibly aggregated, e.g. `-9fv`) ─────────────────
        //
        // `char_pos` starts at 1 (the first flag character after `-`).
        // Each iteration handles one flag character and increments `char_pos`.

        let mut char_pos: usize = 1; // skip the leading '-'
        while char_pos < bytes.len() {
            // ── Numeric compression level (`-0` … `-10`) ─────────────────────
            // A run of ASCII digits sets the compression level directly.
            if bytes[char_pos].is_ascii_digit() {
                let (val, remainder) = read_u32_from_str(&argument[char_pos..])
                    .expect("is_ascii_digit guarantees at least one digit");
                c_level = val as i32;
                // Skip every consumed digit before the next flag character.
                let consumed = argument[char_pos..].len() - remainder.len();
                char_pos += consumed;
                continue;
            }

            // ── Main switch ───────────────────────────────────────────────────
            match bytes[char_pos] {
                b'V' => {
                    print_welcome_message();
                    exit_early = true;
                    break;
                }
                b'h' | b'H' => {
                    print_usage_advanced(exe_name);
                    exit_early = true;
                    break;
                }
                b'z' => {
                    // Force compress mode.
                    op_mode = OpMode::Compress;
                }
                b'd' => {
                    // Switch to decompress mode.
                    op_mode = OpMode::Decompress;
                }
                b'c' => {
                    // Force output to stdout.
                    force_stdout = true;
                    output_filename = Some(STDOUT_MARK.to_owned());
                }
                b't' => {
                    // Verify integrity of compressed input; no output is written.
                    op_mode = OpMode::Test;
                }
                b'f' => {
                    // Overwrite existing destination files without prompting.
                    force_overwrite = true;
                    prefs.set_overwrite(true);
                }
                b'k' => {
                    // Keep source files (default behaviour).
                    prefs.set_remove_src_file(false);
                }
                b'm' => {
                    // Multiple input files; output names derived automatically.
                    multiple_inputs = true;
                }
                b'v' => {
                    let lvl = display_level().saturating_add(1);
                    set_display_level(lvl);
                }
                b'q' => {
                    let lvl = display_level();
                    if lvl > 0 {
                        set_display_level(lvl - 1);
                    }
                }
                unknown => {
                    return Err(anyhow!(
                        "bad usage: unknown option -{}",
                        unknown as char
                    ));
                }
            }
            char_pos += 1;
        }

        if exit_early {
            break;
        }
        arg_idx += 1;
    }

    Ok(ParsedArgs {
        prefs,
        op_mode,
        c_level,
        force_stdout,
        multiple_inputs,
        input_filename,
        output_filename,
        in_file_names,
        exit_early,
        exe_name: exe_name.to_owned(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
