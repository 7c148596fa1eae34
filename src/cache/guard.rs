//! Reader/writer guard protecting the cache's slot array.
//!
//! A thin wrapper over [`std::sync::RwLock`] with one policy decision layered on
//! top: a failure of the locking primitive itself is fatal. Lock contention is
//! normal and simply blocks; a lock that cannot be acquired at all (poisoned by
//! a panicking writer) means the slot array can no longer be trusted, and there
//! is no safe way to continue past it. The failing operation is named in a
//! diagnostic and the process is aborted - this is never surfaced as an error
//! to callers of the cache.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Reader/writer lock around the cache's mutable state.
///
/// Any number of shared holders may overlap; an exclusive holder excludes
/// everyone. Acquisition never fails from the caller's perspective: a broken
/// primitive aborts the process instead of returning.
pub(crate) struct CacheGuard<T> {
    lock: RwLock<T>,
}

impl<T> CacheGuard<T> {
    pub(crate) fn new(value: T) -> Self {
        CacheGuard {
            lock: RwLock::new(value),
        }
    }

    /// Acquires shared access, blocking until available.
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, T> {
        match self.lock.read() {
            Ok(guard) => guard,
            Err(_) => lock_failure("shared lock acquisition"),
        }
    }

    /// Acquires exclusive access, blocking until available.
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, T> {
        match self.lock.write() {
            Ok(guard) => guard,
            Err(_) => lock_failure("exclusive lock acquisition"),
        }
    }

}

/// Terminates the process after naming the failed lock operation.
///
/// A poisoned guard means a writer panicked while holding exclusive access;
/// the protected state may be half-mutated and cannot be recovered.
fn lock_failure(operation: &str) -> ! {
    log::error!("resolution cache guard failure during {operation}, aborting");
    eprintln!("importcache: resolution cache guard failure during {operation}, aborting");
    std::process::abort()
}
