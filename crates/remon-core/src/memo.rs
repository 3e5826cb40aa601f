// ── Explicit memoization for derived selectors ──
//
// A `Memo` cell caches the last (dependency, output) pair. Dependencies
// are compared by identity, not by value: `Arc`s by pointer, scalars by
// equality. A hit hands back the cached `Arc` untouched, so consumers can
// rely on pointer equality downstream.

use std::sync::{Arc, Mutex, PoisonError};

/// Identity comparison for memo dependencies. Must be cheap; it runs on
/// every selector read.
pub trait DepKey {
    fn same(&self, other: &Self) -> bool;
}

impl<T> DepKey for Arc<T> {
    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl DepKey for String {
    fn same(&self, other: &Self) -> bool {
        self == other
    }
}

impl<K: DepKey> DepKey for Option<K> {
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<A: DepKey, B: DepKey> DepKey for (A, B) {
    fn same(&self, other: &Self) -> bool {
        self.0.same(&other.0) && self.1.same(&other.1)
    }
}

/// One memoized computation keyed by dependency identity.
#[derive(Debug)]
pub struct Memo<D, T> {
    cell: Mutex<Option<(D, Arc<T>)>>,
}

impl<D: DepKey, T> Memo<D, T> {
    pub fn new() -> Self {
        Self {
            cell: Mutex::new(None),
        }
    }

    /// Return the cached value when `dep` matches the previous call's
    /// dependency, otherwise recompute and cache.
    pub fn get<F>(&self, dep: D, compute: F) -> Arc<T>
    where
        F: FnOnce(&D) -> T,
    {
        let mut slot = self.cell.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((cached_dep, cached)) = slot.as_ref() {
            if cached_dep.same(&dep) {
                return Arc::clone(cached);
            }
        }
        let value = Arc::new(compute(&dep));
        *slot = Some((dep, Arc::clone(&value)));
        value
    }
}

impl<D: DepKey, T> Default for Memo<D, T> {
    fn default() -> Self {
        Self::new()
    }
}
