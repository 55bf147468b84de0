// Unit tests for binary-alias detection.
//
// Public API under test:
//   `zpipe::cli::init::{detect_alias, CliInit}`

use zpipe::cli::init::detect_alias;
use zpipe::cli::op_mode::OpMode;
use zpipe::io::STDOUT_MARK;

#[test]
fn default_binary_name() {
    let init = detect_alias("zpipe");
    assert_eq!(init.op_mode, OpMode::Auto);
    assert!(!init.prefs.overwrite, "plain invocation must not clobber");
    assert!(!init.prefs.remove_src_file);
}

#[test]
fn full_path_does_not_defeat_alias_detection() {
    let init = detect_alias("/usr/local/bin/unzpipe");
    assert_eq!(init.op_mode, OpMode::Decompress);
}

#[test]
fn zzcat_pipeline_defaults() {
    let init = detect_alias("zzcat");
    assert_eq!(init.op_mode, OpMode::Decompress);
    assert!(init.force_stdout);
    assert!(init.multiple_inputs);
    assert_eq!(init.output_filename.as_deref(), Some(STDOUT_MARK));
}

#[test]
fn near_miss_names_are_not_aliases() {
    assert_eq!(detect_alias("zzcatalog").op_mode, OpMode::Auto);
    assert_eq!(detect_alias("my-unzpipe").op_mode, OpMode::Auto);
}
