//! File locking for process-level mutual exclusion.
//!
//! Every read-modify-write cycle against the settings file runs under an
//! exclusive advisory lock (fs2 crate) keyed by a lock name shared across
//! all instances of the application. Advisory locks are released by the OS
//! when the holding process's descriptors close, so a holder that crashed
//! mid-cycle never blocks the next acquirer.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Acquires the named exclusive lock, blocking until it is granted.
///
/// The lock is backed by `<temp dir>/<lock_name>.lock`. The file is only a
/// rendezvous point: it is created if absent, never written to, and a stale
/// file left behind by a dead process does not block acquisition.
///
/// There is no timeout. A caller unwilling to block indefinitely has to
/// decide before calling; acquisition itself is not interruptible.
///
/// # Arguments
/// * `lock_name`: Lock identifier shared by everyone who must be mutually
///   excluded. Must be usable as a file name.
///
/// # Returns
/// A `LockGuard` that releases the lock when dropped. Errors only for I/O
/// problems with the lock file itself, never for contention.
pub fn acquire(lock_name: &str) -> Result<LockGuard> {
    let lock_path = std::env::temp_dir().join(format!("{lock_name}.lock"));

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to open lock file {}", lock_path.display()))?;

    // Blocks until every other holder, thread or process, lets go.
    file.lock_exclusive()
        .with_context(|| format!("Failed to lock {}", lock_path.display()))?;

    Ok(LockGuard { file, lock_path })
}

/// RAII guard for the settings lock.
///
/// When this guard is dropped, the lock is released. This ensures the lock
/// is always released, even in the presence of panics or early returns.
#[derive(Debug)]
pub struct LockGuard {
    file: File,
    lock_path: PathBuf,
}

impl LockGuard {
    pub fn path(&self) -> &Path {
        &self.lock_path
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        // Release failures are unreportable from Drop; closing the
        // descriptor releases the lock regardless.
        let _ = fs2::FileExt::unlock(&self.file);
    }
}
