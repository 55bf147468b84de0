// Unit tests for operation-mode inference and environment defaults.
//
// Public API under test:
//   `zpipe::cli::op_mode::{OpMode, determine_op_mode, init_c_level_from}`

use zpipe::cli::op_mode::{determine_op_mode, init_c_level_from, OpMode};
use zpipe::config::CLEVEL_DEFAULT;

#[test]
fn extension_routes_to_decompress() {
    assert_eq!(determine_op_mode("backup.tar.zz"), OpMode::Decompress);
    assert_eq!(determine_op_mode("backup.tar"), OpMode::Compress);
}

#[test]
fn extension_check_is_suffix_only() {
    assert_eq!(determine_op_mode("zz.in.the.middle"), OpMode::Compress);
    assert_eq!(determine_op_mode("ends.with.zz"), OpMode::Decompress);
}

#[test]
fn env_level_parses_leading_digits() {
    assert_eq!(init_c_level_from(Some("10")), 10);
    assert_eq!(init_c_level_from(Some("3junk")), 3);
}

#[test]
fn env_level_falls_back_on_garbage() {
    assert_eq!(init_c_level_from(Some("-1")), CLEVEL_DEFAULT);
    assert_eq!(init_c_level_from(Some("max")), CLEVEL_DEFAULT);
    assert_eq!(init_c_level_from(None), CLEVEL_DEFAULT);
}
