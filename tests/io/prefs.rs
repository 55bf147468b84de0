// Unit tests for I/O preferences and display helpers.
//
// Public API under test:
//   `zpipe::io::prefs::{Prefs, set_notification_level, display_level, KB, MB, GB}`

use zpipe::io::prefs::{display_level, Prefs, GB, KB, MB};

#[test]
fn defaults_match_documented_values() {
    let p = Prefs::default();
    assert!(p.overwrite);
    assert!(!p.test_mode);
    assert!(!p.remove_src_file);
}

#[test]
fn new_equals_default() {
    let a = Prefs::new();
    let b = Prefs::default();
    assert_eq!(a.overwrite, b.overwrite);
    assert_eq!(a.test_mode, b.test_mode);
    assert_eq!(a.remove_src_file, b.remove_src_file);
}

#[test]
fn setters_mutate_and_report() {
    let mut p = Prefs::default();
    assert!(p.set_test_mode(true));
    assert!(p.test_mode);
    assert!(!p.set_overwrite(false));
    p.set_remove_src_file(true);
    assert!(p.remove_src_file);
}

#[test]
fn size_constants() {
    assert_eq!(KB, 1024);
    assert_eq!(MB, KB * 1024);
    assert_eq!(GB, MB * 1024);
}

#[test]
fn display_below_threshold_is_silent() {
    // display_level only writes when the global level is high enough; at the
    // default test level this must be a no-op and must not panic.
    display_level(99, "never shown\n");
}
