//! Operation mode selection and startup defaults for the CLI.
//!
//! - [`OpMode`] — what the CLI should do (compress, decompress, test).
//! - [`determine_op_mode`] — infers the intended mode from a filename's extension.
//! - [`init_c_level`] — reads the per-process default level from the environment.

use crate::cli::arg_utils::read_u32_from_str;
use crate::cli::constants::{display_level, ZZ_EXTENSION};
use crate::config::CLEVEL_DEFAULT;

/// What the CLI should do with its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    /// Mode inferred from the filename extension: decompress if `.zz`, compress otherwise.
    Auto,
    /// Compress input to a zlib stream.
    Compress,
    /// Decompress a zlib-encoded input.
    Decompress,
    /// Verify stream integrity without writing output.
    Test,
}

/// Infer the operation mode from `filename`'s extension.
///
/// Returns [`OpMode::Decompress`] if `filename` ends with `.zz`,
/// [`OpMode::Compress`] otherwise.
pub fn determine_op_mode(filename: &str) -> OpMode {
    if filename.ends_with(ZZ_EXTENSION) {
        OpMode::Decompress
    } else {
        OpMode::Compress
    }
}

/// Read the default compression level from the `ZPIPE_CLEVEL` environment
/// variable, falling back to [`CLEVEL_DEFAULT`].
pub fn init_c_level() -> i32 {
    init_c_level_from(std::env::var("ZPIPE_CLEVEL").ok().as_deref())
}

/// Testable core of [`init_c_level`]: parse an optional `ZPIPE_CLEVEL` value.
///
/// Pass `Some(s)` with the raw string, or `None` to simulate the variable
/// being unset. Separating env-var I/O from parsing keeps the conversion
/// logic unit-testable without touching the process environment.
pub fn init_c_level_from(env_val: Option<&str>) -> i32 {
    const ENV_CLEVEL: &str = "ZPIPE_CLEVEL";
    if let Some(env) = env_val {
        if let Some((val, _rest)) = read_u32_from_str(env) {
            return val as i32;
        }
        if display_level() >= 2 {
            eprintln!(
                "Ignore environment variable setting {}={}: not a valid unsigned value ",
                ENV_CLEVEL, env
            );
        }
    }
    CLEVEL_DEFAULT
}
