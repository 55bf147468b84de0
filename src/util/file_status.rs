//! File status utility functions.
//!
//! Stat-based predicates plus attribute propagation for the file-level
//! drivers: after a successful file-to-file transform the destination is
//! given the source's modification time, ownership (POSIX) and permission
//! bits, the way archivers conventionally preserve them.

use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use filetime::FileTime;

/// Sets modification time, ownership (POSIX), and file-permission bits on a
/// regular file.
///
/// Returns `Err` if `path` is not a regular file. On success every
/// platform-specific attribute is applied; errors from individual
/// operations accumulate and are returned as the first encountered
/// `io::Error`.
///
/// * `mtime` — desired last-modification time
/// * `uid`   — desired owner UID (POSIX only; silently ignored on Windows)
/// * `gid`   — desired owner GID (POSIX only; silently ignored on Windows)
/// * `mode`  — desired permission bits; lower 12 bits are applied
///             (`mode & 0o7777`)
pub fn set_file_stat(
    path: &Path,
    mtime: SystemTime,
    uid: u32,
    gid: u32,
    mode: u32,
) -> io::Result<()> {
    if !is_reg_file(path) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "set_file_stat: not a regular file",
        ));
    }

    // Set access time to now and modification time to the requested value.
    let atime = FileTime::from_system_time(SystemTime::now());
    let ft_mtime = FileTime::from_system_time(mtime);
    filetime::set_file_times(path, atime, ft_mtime)?;

    // Copy ownership — POSIX only (chown is absent on Windows).
    #[cfg(unix)]
    {
        use nix::unistd::{chown, Gid, Uid};
        chown(path, Some(Uid::from_raw(uid)), Some(Gid::from_raw(gid)))
            .map_err(io::Error::from)?;
    }

    #[cfg(not(unix))]
    let _ = (uid, gid);

    // Copy file permissions — mode & 07777.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o7777))?;
    }
    #[cfg(windows)]
    {
        // Windows does not support full POSIX mode bits; honour read-only bit only.
        let readonly = (mode & 0o200) == 0;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_readonly(readonly);
        fs::set_permissions(path, perms)?;
    }
    #[cfg(not(any(unix, windows)))]
    let _ = mode;

    Ok(())
}

/// Copies mtime, ownership and permission bits from `src` to `dst`.
///
/// Best-effort companion to [`set_file_stat`] used after a successful
/// file-to-file transform; chown failures for unprivileged processes are
/// the caller's to ignore.
pub fn copy_file_stat(src: &str, dst: &str) -> io::Result<()> {
    let m = fs::metadata(src)?;
    let mtime = m.modified().unwrap_or(SystemTime::UNIX_EPOCH);

    #[cfg(unix)]
    let (uid, gid, mode) = {
        use std::os::unix::fs::MetadataExt;
        (m.uid(), m.gid(), m.mode())
    };
    #[cfg(not(unix))]
    let (uid, gid, mode) = (0u32, 0u32, 0o644u32);

    set_file_stat(Path::new(dst), mtime, uid, gid, mode)
}

/// Returns `true` if `path` refers to a regular file.
///
/// Returns `false` for directories, symlinks to directories, special files,
/// and paths that do not exist.
pub fn is_reg_file(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.file_type().is_file())
        .unwrap_or(false)
}

/// Returns `true` if `path` refers to a directory.
///
/// Returns `false` for regular files, special files, and paths that do not
/// exist.
pub fn is_directory(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.file_type().is_dir())
        .unwrap_or(false)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
