//! Filesystem utility helpers shared by the I/O drivers.
//!
//! - [`file_status`] — stat-based predicates and attribute propagation
//!   (`is_reg_file`, `is_directory`, `set_file_stat`, `copy_file_stat`).

pub mod file_status;

// ── Re-exports at `util::` level ─────────────────────────────────────────────

pub use file_status::{copy_file_stat, is_directory, is_reg_file, set_file_stat};
