// Unit tests for the typed codec failure values.
//
// Public API under test:
//   `zpipe::zlib::error::{CompressError, DecompressError, deflate_status_name, inflate_status_name}`

use std::error::Error;
use std::io;

use zpipe::zlib::error::{
    deflate_status_name, inflate_status_name, CompressError, DecompressError,
};

#[test]
fn compress_error_is_a_std_error() {
    let e = CompressError::new("deflate_step", -1);
    let boxed: Box<dyn Error> = Box::new(e);
    assert!(boxed.to_string().contains("deflate_step"));
}

#[test]
fn compress_error_io_kind_is_other() {
    let io_err = CompressError::new("deflate_step", -2).into_io();
    assert_eq!(io_err.kind(), io::ErrorKind::Other);
}

#[test]
fn decompress_error_io_kind_is_invalid_data() {
    let io_err = DecompressError::new("inflate_step", -4).into_io();
    assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn payload_fields_survive_the_io_wrapper() {
    let io_err = DecompressError::new("inflate_step", -2).into_io();
    let payload = io_err
        .get_ref()
        .and_then(|r| r.downcast_ref::<DecompressError>())
        .expect("payload must downcast to DecompressError");
    assert_eq!(payload.op, "inflate_step");
    assert_eq!(payload.status, -2);
}

#[test]
fn display_includes_status_name() {
    assert!(DecompressError::new("inflate_step", -2)
        .to_string()
        .contains("adler32-mismatch"));
    assert!(CompressError::new("deflate_step", -2)
        .to_string()
        .contains("bad-param"));
}

#[test]
fn status_names_match_engine_ordinals() {
    assert_eq!(deflate_status_name(0), "okay");
    assert_eq!(deflate_status_name(1), "done");
    assert_eq!(inflate_status_name(0), "done");
    assert_eq!(inflate_status_name(1), "needs-more-input");
    assert_eq!(inflate_status_name(2), "has-more-output");
    assert_eq!(inflate_status_name(-1), "failed");
}
