// config.rs — Compile-time configuration constants.

// Default compression level.
// Can be overridden by the ZPIPE_CLEVEL environment variable at runtime,
// or by the -# command-line flag.
pub const CLEVEL_DEFAULT: i32 = 6;

// Lowest and highest compression levels the level mapper accepts.
// Values outside this range are clamped, never rejected.
pub const CLEVEL_MIN: i32 = 0;
pub const CLEVEL_MAX: i32 = 10;
