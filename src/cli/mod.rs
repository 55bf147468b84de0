//! Command-line interface for the `zpipe` binary.
//!
//! This module organises the full CLI pipeline:
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity strings, size multipliers, and the shared `DISPLAY_LEVEL` atomic. |
//! | [`help`]      | Usage/help text printers and the version banner. |
//! | [`arg_utils`] | Low-level argument parsing utilities: path basename, executable-name matching, integer parsing. |
//! | [`op_mode`]   | `OpMode` enum, the default compression-level constant, and environment-based initialisation helpers. |
//! | [`init`]      | `CliInit` — initial state built from the binary name (alias detection for `zzcat`, `unzpipe`). |
//! | [`args`]      | `ParsedArgs` — full argument-parsing loop that consumes `argv` and produces the final set of runtime options. |
//!
//! Typical call sequence: `detect_alias` → `parse_args` → dispatch to the I/O layer.

pub mod constants;
pub mod help;
pub mod arg_utils;
pub mod op_mode;
pub mod init;
pub mod args;
