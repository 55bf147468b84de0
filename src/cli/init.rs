//! CLI initialization and binary-alias detection.
//!
//! When zpipe is installed under multiple names (`zzcat`, `unzpipe`) via
//! hard or symbolic links, the program detects which operation mode to
//! enter from `argv[0]` before any flag parsing takes place.
//!
//! [`detect_alias`] encapsulates that detection and returns a [`CliInit`]
//! carrying the pre-parsed defaults. The argument parser in
//! [`crate::cli::args`] then layers explicit flags on top of these values.

use crate::cli::arg_utils::{exe_name_match, last_name_from_path};
use crate::cli::constants::{set_display_level, UNZPIPE, ZZCAT};
use crate::cli::op_mode::{init_c_level, OpMode};
use crate::io::file_io::STDOUT_MARK;
use crate::io::prefs::Prefs;

/// Initial CLI state derived from the binary name and environment.
///
/// Built by [`detect_alias`] before argument parsing begins; the argument
/// parser layers explicit flags on top of these defaults.
#[derive(Debug, Clone)]
pub struct CliInit {
    /// I/O preferences initialised to library defaults.
    pub prefs: Prefs,
    /// Initial operation mode — overridden by alias detection before argument parsing.
    pub op_mode: OpMode,
    /// Whether multiple input files should be processed (set by the `zzcat` alias).
    pub multiple_inputs: bool,
    /// Initial compression level from `ZPIPE_CLEVEL` env var (or default).
    pub c_level: i32,
    /// When `true`, output is forced to stdout regardless of the file argument.
    pub force_stdout: bool,
    /// Explicit output filename — set to `Some(STDOUT_MARK)` by the `zzcat` alias.
    pub output_filename: Option<String>,
}

/// Detect the operation mode and initial settings from `argv[0]`.
///
/// | Binary name | Effect                                                 |
/// |-------------|--------------------------------------------------------|
/// | `zzcat`     | Decompress + force stdout + multiple inputs + quiet    |
/// | `unzpipe`   | Decompress only                                        |
///
/// `argv0` may be a full path; the basename is extracted internally.
pub fn detect_alias(argv0: &str) -> CliInit {
    let exe_name = last_name_from_path(argv0);

    let mut prefs = Prefs::default();
    // The normal invocation path starts with overwrite disabled; `-f` or the
    // zzcat alias re-enable it explicitly.
    prefs.overwrite = false;

    let mut op_mode = OpMode::Auto;
    let mut multiple_inputs = false;
    let mut force_stdout = false;
    let mut output_filename: Option<String> = None;

    // zzcat: decompress to stdout, accept multiple inputs, quiet verbosity.
    if exe_name_match(exe_name, ZZCAT) {
        op_mode = OpMode::Decompress;
        prefs.set_overwrite(true);
        prefs.set_remove_src_file(false);
        force_stdout = true;
        output_filename = Some(STDOUT_MARK.to_owned());
        multiple_inputs = true;
        set_display_level(1);
    }

    // unzpipe: decompress only; all other settings remain at their defaults.
    if exe_name_match(exe_name, UNZPIPE) {
        op_mode = OpMode::Decompress;
    }

    CliInit {
        prefs,
        op_mode,
        multiple_inputs,
        c_level: init_c_level(),
        force_stdout,
        output_filename,
    }
}
