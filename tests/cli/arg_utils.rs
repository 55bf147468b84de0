// Unit tests for low-level argument-parsing helpers.
//
// Public API under test:
//   `zpipe::cli::arg_utils::{last_name_from_path, exe_name_match, read_u32_from_str, long_command_w_arg}`

use zpipe::cli::arg_utils::{
    exe_name_match, last_name_from_path, long_command_w_arg, read_u32_from_str,
};

#[test]
fn basename_extraction() {
    assert_eq!(last_name_from_path("/a/b/c"), "c");
    assert_eq!(last_name_from_path("relative/zzcat"), "zzcat");
    assert_eq!(last_name_from_path("C:\\bin\\unzpipe.exe"), "unzpipe.exe");
    assert_eq!(last_name_from_path(""), "");
}

#[test]
fn exe_match_requires_boundary() {
    assert!(exe_name_match("unzpipe", "unzpipe"));
    assert!(exe_name_match("unzpipe.bin", "unzpipe"));
    assert!(!exe_name_match("unzpiped", "unzpipe"));
}

#[test]
fn u32_parse_consumes_digits_and_suffix() {
    assert_eq!(read_u32_from_str("123rest"), Some((123, "rest")));
    assert_eq!(read_u32_from_str("512KiB!"), Some((512 * 1024, "!")));
    assert_eq!(read_u32_from_str("x12"), None);
}

#[test]
fn u32_parse_wraps_rather_than_panics() {
    // Absurd values wrap in release builds; the parser must stay total.
    let (val, rest) = read_u32_from_str("99999999999999999999").unwrap();
    let _ = val;
    assert_eq!(rest, "");
}

#[test]
fn long_command_prefix_stripping() {
    assert_eq!(long_command_w_arg("--level=3", "--level"), Some("=3"));
    assert_eq!(long_command_w_arg("--level", "--level"), Some(""));
    assert_eq!(long_command_w_arg("-l", "--level"), None);
}
