//! zlib codec configuration and failure types.
//!
//! The entropy coding itself lives in `miniz_oxide`; this module owns the
//! two pieces of glue the streaming drivers need around it:
//!
//! - [`config`] — mapping a compression level to the engine's flag word,
//!   and composing the per-step decompression flags.
//! - [`error`] — typed failure values carrying the failing routine's name
//!   and the engine's numeric status code.

pub mod config;
pub mod error;

pub use config::{clamp_level, compression_flags, decompression_flags};
pub use error::{CompressError, DecompressError};
