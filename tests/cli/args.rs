// Unit tests for the argument-parsing loop, driven through the public API
// with alias-derived initial state.
//
// Public API under test:
//   `zpipe::cli::args::{parse_args_from, ParsedArgs}`

use zpipe::cli::args::parse_args_from;
use zpipe::cli::init::detect_alias;
use zpipe::cli::op_mode::OpMode;
use zpipe::io::{STDIN_MARK, STDOUT_MARK};

fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

#[test]
fn zzcat_alias_collects_every_positional() {
    let init = detect_alias("zzcat");
    let p = parse_args_from(init, "zzcat", &argv(&["a.zz", "b.zz", "c.zz"])).unwrap();
    assert!(p.multiple_inputs);
    assert_eq!(p.in_file_names, vec!["a.zz", "b.zz", "c.zz"]);
    assert_eq!(p.output_filename.as_deref(), Some(STDOUT_MARK));
    assert_eq!(p.op_mode, OpMode::Decompress);
}

#[test]
fn explicit_flags_override_alias_defaults() {
    let init = detect_alias("unzpipe");
    let p = parse_args_from(init, "unzpipe", &argv(&["-z", "file.txt"])).unwrap();
    assert_eq!(p.op_mode, OpMode::Compress, "-z must override the alias");
}

#[test]
fn level_flag_position_is_irrelevant() {
    let a = parse_args_from(detect_alias("zpipe"), "zpipe", &argv(&["-8", "in"])).unwrap();
    let b = parse_args_from(detect_alias("zpipe"), "zpipe", &argv(&["in", "-8"])).unwrap();
    assert_eq!(a.c_level, 8);
    assert_eq!(b.c_level, 8);
    assert_eq!(a.input_filename, b.input_filename);
}

#[test]
fn later_level_flag_wins() {
    let p = parse_args_from(detect_alias("zpipe"), "zpipe", &argv(&["-1", "-7"])).unwrap();
    assert_eq!(p.c_level, 7);
}

#[test]
fn out_of_range_level_is_carried_for_downstream_clamping() {
    let p = parse_args_from(detect_alias("zpipe"), "zpipe", &argv(&["-99"])).unwrap();
    assert_eq!(p.c_level, 99, "clamping happens in the level mapper, not here");
}

#[test]
fn stdin_sentinel_as_positional() {
    let p = parse_args_from(detect_alias("zpipe"), "zpipe", &argv(&["stdin", "out.zz"]))
        .unwrap();
    assert_eq!(p.input_filename.as_deref(), Some(STDIN_MARK));
    assert_eq!(p.output_filename.as_deref(), Some("out.zz"));
}

#[test]
fn empty_arguments_are_skipped() {
    let p = parse_args_from(detect_alias("zpipe"), "zpipe", &argv(&["", "in.txt", ""]))
        .unwrap();
    assert_eq!(p.input_filename.as_deref(), Some("in.txt"));
}

#[test]
fn help_short_circuits_remaining_arguments() {
    let p = parse_args_from(
        detect_alias("zpipe"),
        "zpipe",
        &argv(&["-h", "--definitely-not-an-option"]),
    )
    .unwrap();
    assert!(p.exit_early);
}

#[test]
fn error_messages_start_with_bad_usage() {
    let err = parse_args_from(detect_alias("zpipe"), "zpipe", &argv(&["-X"]))
        .unwrap_err()
        .to_string();
    assert!(err.starts_with("bad usage"), "got: {err}");
}
