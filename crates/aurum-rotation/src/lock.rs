//! Advisory locking for the rotation state file, using `flock(2)` directly.
//!
//! The lock lives on a sidecar `.lock` file rather than the state file
//! itself, because saves replace the state file via rename and would drop
//! the locked inode. The lock is blocking: overlapping scheduler triggers
//! serialize against each other, so two invocations can never both read a
//! below-quota count and both post.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

/// Diagnostic information written to the lock file
#[derive(Debug, Serialize, Deserialize)]
struct LockDiagnostic {
    pid: u32,
    acquired_at: DateTime<Utc>,
}

/// Exclusive lock guard over the rotation state.
///
/// Holds the open `File` whose fd carries the advisory lock; `Drop` calls
/// `flock(fd, LOCK_UN)` for deterministic release timing.
pub struct StateLock {
    file: File,
    lock_path: PathBuf,
}

impl std::fmt::Debug for StateLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateLock")
            .field("lock_path", &self.lock_path)
            .finish()
    }
}

impl Drop for StateLock {
    fn drop(&mut self) {
        let fd = self.file.as_raw_fd();
        // SAFETY: `fd` is a valid file descriptor owned by `self.file`.
        // `LOCK_UN` releases the advisory lock; if it somehow fails, the
        // lock is still released when the fd is closed moments later.
        unsafe {
            libc::flock(fd, libc::LOCK_UN);
        }
    }
}

impl StateLock {
    /// Acquire a blocking exclusive lock guarding `state_file`.
    ///
    /// Lock path: the state file's path with a `.lock` extension. Blocks
    /// until any concurrent invocation finishes its load-decide-record
    /// cycle.
    pub fn acquire(state_file: &Path) -> Result<Self> {
        let lock_path = state_file.with_extension("lock");
        if let Some(parent) = lock_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create state directory: {}", parent.display())
            })?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file: {}", lock_path.display()))?;

        let fd = file.as_raw_fd();
        // SAFETY: `fd` is a valid file descriptor from the `File` we just
        // opened. `LOCK_EX` requests an exclusive blocking lock.
        let ret = unsafe { libc::flock(fd, libc::LOCK_EX) };
        if ret != 0 {
            anyhow::bail!(
                "Failed to lock {}: {}",
                lock_path.display(),
                std::io::Error::last_os_error()
            );
        }

        let mut lock = Self { file, lock_path };

        let diagnostic = LockDiagnostic {
            pid: std::process::id(),
            acquired_at: Utc::now(),
        };
        let json =
            serde_json::to_string(&diagnostic).context("Failed to serialize lock diagnostic")?;
        lock.file
            .set_len(0)
            .context("Failed to truncate lock file")?;
        lock.file
            .write_all(json.as_bytes())
            .context("Failed to write lock diagnostic")?;
        lock.file.flush().context("Failed to flush lock file")?;

        Ok(lock)
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }
}
