//! Quiet permission probes.
//!
//! These wrap platform calls that can fail for reasons the caller does not
//! care about (permission denied, missing path, path outside an allowed
//! root). Failures are logged at trace level and answered with `false`.

use std::path::Path;

/// True if the current process may read `path`.
pub fn can_read(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use rustix::fs::{Access, access};
        match access(path, Access::READ_OK) {
            Ok(()) => true,
            Err(e) => {
                tracing::trace!(path = %path.display(), error = %e, "read probe failed");
                false
            }
        }
    }

    #[cfg(not(unix))]
    {
        match std::fs::metadata(path) {
            Ok(_) => true,
            Err(e) => {
                tracing::trace!(path = %path.display(), error = %e, "read probe failed");
                false
            }
        }
    }
}

/// True if the current process may write `path`. Missing paths are not
/// writable.
pub fn can_write(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use rustix::fs::{Access, access};
        match access(path, Access::WRITE_OK) {
            Ok(()) => true,
            Err(e) => {
                tracing::trace!(path = %path.display(), error = %e, "write probe failed");
                false
            }
        }
    }

    #[cfg(not(unix))]
    {
        match std::fs::metadata(path) {
            Ok(meta) => !meta.permissions().readonly(),
            Err(e) => {
                tracing::trace!(path = %path.display(), error = %e, "write probe failed");
                false
            }
        }
    }
}

/// Effective user id of this process, where the platform has one.
pub fn effective_uid() -> Option<u32> {
    #[cfg(unix)]
    {
        Some(rustix::process::geteuid().as_raw())
    }

    #[cfg(not(unix))]
    {
        None
    }
}
