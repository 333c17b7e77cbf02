//! Debug-only guard against key functors calling back into their table.
//!
//! Hash and equality functors are user code that runs while the table is
//! probing a chain. In debug builds, a nested entry through the same table
//! panics and names both operations. In release builds the guard is a
//! zero-sized no-op.

use core::cell::Cell;
use core::marker::PhantomData;

#[derive(Debug)]
pub(crate) struct ProbeGuard {
    #[cfg(debug_assertions)]
    active: Cell<Option<&'static str>>,
    // Keeps the owning table !Sync even when the debug state is compiled out.
    _not_sync: PhantomData<Cell<()>>,
}

impl ProbeGuard {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(None),
            _not_sync: PhantomData,
        }
    }

    /// Marks `op` as running until the returned scope is dropped.
    #[inline]
    pub(crate) fn enter(&self, op: &'static str) -> ProbeScope<'_> {
        #[cfg(debug_assertions)]
        {
            if let Some(outer) = self.active.get() {
                panic!("reentrant `{}` while `{}` was running a key functor", op, outer);
            }
            self.active.set(Some(op));
            return ProbeScope { guard: self };
        }

        #[cfg(not(debug_assertions))]
        {
            let _ = op;
            return ProbeScope { _guard: PhantomData };
        }
    }
}

pub(crate) struct ProbeScope<'a> {
    #[cfg(debug_assertions)]
    guard: &'a ProbeGuard,
    #[cfg(not(debug_assertions))]
    _guard: PhantomData<&'a ProbeGuard>,
}

impl Drop for ProbeScope<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.guard.active.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::ProbeGuard;

    #[test]
    fn sequential_scopes_are_fine() {
        let g = ProbeGuard::new();
        drop(g.enter("find"));
        drop(g.enter("insert"));
        let _s = g.enter("erase");
    }

    #[cfg(debug_assertions)]
    #[test]
    fn nested_scope_panics_with_both_names() {
        let g = ProbeGuard::new();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _outer = g.enter("insert");
            let _inner = g.enter("find");
        }));
        let msg = res
            .unwrap_err()
            .downcast::<String>()
            .map(|s| *s)
            .unwrap_or_default();
        assert!(msg.contains("`find`") && msg.contains("`insert`"), "{}", msg);
    }
}
