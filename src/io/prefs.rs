// prefs.rs — I/O preferences, display globals, and timing helpers.
//
// The notification level is an atomic rather than a plain global so that
// concurrent driver calls on separate threads can read it safely. `Prefs`
// is a plain value type owned by the caller; allocation and release follow
// the ownership model, there is no handle to free.

use std::sync::atomic::{AtomicI32, Ordering};

use crate::timefn::{clock_span_ns, TimeT};

// ---------------------------------------------------------------------------
// Numeric constants
// ---------------------------------------------------------------------------
pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;
pub const GB: usize = 1 << 30;

// ---------------------------------------------------------------------------
// Display / notification globals
// ---------------------------------------------------------------------------

/// Global notification level. 0 = silent, 1 = errors only, 2 = results +
/// warnings, 3 = progress, 4+ = verbose.
pub static DISPLAY_LEVEL: AtomicI32 = AtomicI32::new(0);

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

/// Write `msg` to stderr if the current notification level is ≥ `level`.
/// Flushes stderr when level ≥ 4.
#[inline]
pub fn display_level(level: i32, msg: &str) {
    if DISPLAY_LEVEL.load(Ordering::Relaxed) >= level {
        eprint!("{}", msg);
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 4 {
            // flush — best-effort; ignore errors
            use std::io::Write;
            let _ = std::io::stderr().flush();
        }
    }
}

/// Sets the global notification level. Returns the value stored.
pub fn set_notification_level(level: i32) -> i32 {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
    level
}

// ---------------------------------------------------------------------------
// CPU-load helper
// ---------------------------------------------------------------------------

/// Returns seconds of CPU time consumed since `cpu_start`.
/// On non-Windows platforms uses the C `clock()` function / CLOCKS_PER_SEC.
/// On Windows uses `GetProcessTimes` kernel + user time in 100-ns units.
pub fn cpu_load_sec(cpu_start: libc::clock_t) -> f64 {
    #[cfg(not(target_os = "windows"))]
    {
        extern "C" {
            fn clock() -> libc::clock_t;
        }
        // CLOCKS_PER_SEC is 1_000_000 on POSIX (SUSv2) and macOS.
        const CLOCKS_PER_SEC: libc::clock_t = 1_000_000;
        let elapsed = unsafe { clock() } - cpu_start;
        elapsed as f64 / CLOCKS_PER_SEC as f64
    }
    #[cfg(target_os = "windows")]
    {
        // On Windows, ignore cpu_start and read from GetProcessTimes.
        // kernel_time and user_time are in 100-nanosecond intervals.
        use std::mem::MaybeUninit;
        let _ = cpu_start;
        unsafe {
            let process = winapi::um::processthreadsapi::GetCurrentProcess();
            let mut creation = MaybeUninit::uninit();
            let mut exit = MaybeUninit::uninit();
            let mut kernel = MaybeUninit::uninit();
            let mut user = MaybeUninit::uninit();
            winapi::um::processthreadsapi::GetProcessTimes(
                process,
                creation.as_mut_ptr(),
                exit.as_mut_ptr(),
                kernel.as_mut_ptr(),
                user.as_mut_ptr(),
            );
            let k = kernel.assume_init();
            let u = user.assume_init();
            ((k.dwLowDateTime as f64) + (u.dwLowDateTime as f64)) * 100.0 / 1_000_000_000.0
        }
    }
}

// ---------------------------------------------------------------------------
// Final timing display
// ---------------------------------------------------------------------------

/// Prints a "Done in … s ==> … MiB/s (cpu load: …%)" line to stderr at
/// notification level 3.
pub fn final_time_display(time_start: TimeT, cpu_start: libc::clock_t, size: u64) {
    let duration_ns = clock_span_ns(time_start);
    // Avoid division by zero: if duration is 0, treat it as 1 ns.
    let seconds = (duration_ns.max(1)) as f64 / 1_000_000_000.0_f64;
    let cpu_load_s = cpu_load_sec(cpu_start);
    let msg = format!(
        "Done in {:.2} s ==> {:.2} MiB/s  (cpu load : {:.0}%)\n",
        seconds,
        (size as f64) / seconds / 1024.0 / 1024.0,
        (cpu_load_s / seconds) * 100.0,
    );
    display_level(3, &msg);
}

// ---------------------------------------------------------------------------
// Preferences struct
// ---------------------------------------------------------------------------

/// Tunable parameters for the file-level compression and decompression
/// drivers. The stream drivers themselves take no preferences: their only
/// knob is the compression level passed per call.
#[derive(Clone, Debug)]
pub struct Prefs {
    /// Overwrite existing destination files without prompting. Default: true.
    pub overwrite: bool,
    /// Test mode — decompress but discard output. Default: false.
    pub test_mode: bool,
    /// Remove source file after successful compression/decompression. Default: false.
    pub remove_src_file: bool,
}

impl Default for Prefs {
    fn default() -> Self {
        Prefs {
            overwrite: true,
            test_mode: false,
            remove_src_file: false,
        }
    }
}

impl Prefs {
    /// Creates a new `Prefs` with all defaults applied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables destination-file overwrite. Returns the new value.
    pub fn set_overwrite(&mut self, yes: bool) -> bool {
        self.overwrite = yes;
        yes
    }

    /// Enables or disables test mode (decompress, discard). Returns the new value.
    pub fn set_test_mode(&mut self, yes: bool) -> bool {
        self.test_mode = yes;
        yes
    }

    /// Enables or disables removal of the source file after processing.
    pub fn set_remove_src_file(&mut self, flag: bool) {
        self.remove_src_file = flag;
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
