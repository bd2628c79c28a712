use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

// A panic while holding one of these locks leaves plain data behind, so the
// guard is recovered instead of propagating the poison.

pub(crate) fn read<'a, T>(lock: &'a RwLock<T>, op: &'static str) -> RwLockReadGuard<'a, T> {
    lock.read().unwrap_or_else(|poisoned| {
        report_poisoned(op, "rwlock.read");
        poisoned.into_inner()
    })
}

pub(crate) fn write<'a, T>(lock: &'a RwLock<T>, op: &'static str) -> RwLockWriteGuard<'a, T> {
    lock.write().unwrap_or_else(|poisoned| {
        report_poisoned(op, "rwlock.write");
        poisoned.into_inner()
    })
}

pub(crate) fn lock<'a, T>(mutex: &'a Mutex<T>, op: &'static str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        report_poisoned(op, "mutex.lock");
        poisoned.into_inner()
    })
}

fn report_poisoned(op: &'static str, lock_kind: &'static str) {
    warn!(
        op,
        lock_kind,
        result = "poisoned_recovered",
        "Recovered from poisoned lock; state may be stale"
    );
}
