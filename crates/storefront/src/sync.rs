//! Small synchronization helpers shared by the store and the feed.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, ignoring poisoning.
///
/// The guarded sections here are plain field reads/writes that cannot
/// leave state half-updated, so a poisoned lock is still safe to enter.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
