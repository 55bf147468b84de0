// timefn - portable high-resolution monotonic timer abstraction
//
// std::time::Instant is monotonic and MT-safe on all supported platforms,
// so no platform-specific clock plumbing is needed here.

use std::time::Instant;

/// Nanosecond duration type.
pub type DurationNs = u64;

/// Opaque timestamp container. The absolute value is not meaningful;
/// use it only to compute a duration between two measurements.
#[derive(Clone, Copy)]
pub struct TimeT {
    pub(crate) t: Instant,
}

impl TimeT {
    /// Returns a timestamp taken now.
    pub fn new() -> Self {
        TimeT { t: Instant::now() }
    }
}

impl Default for TimeT {
    fn default() -> Self {
        TimeT::new()
    }
}

/// Returns the current monotonic timestamp.
pub fn get_time() -> TimeT {
    TimeT { t: Instant::now() }
}

/// Returns the nanosecond duration between `clock_start` and `clock_end`.
pub fn span_ns(clock_start: TimeT, clock_end: TimeT) -> DurationNs {
    clock_end
        .t
        .duration_since(clock_start.t)
        .as_nanos() as DurationNs
}

/// Measures nanoseconds elapsed since `clock_start` (captures current time internally).
pub fn clock_span_ns(clock_start: TimeT) -> DurationNs {
    clock_start.t.elapsed().as_nanos() as DurationNs
}
