//! Dependency-tracking scope shared by [`MutableState`](crate::MutableState)
//! and [`DerivedState`](crate::DerivedState).

use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_CELL_ID: AtomicUsize = AtomicUsize::new(1);

pub(crate) fn next_cell_id() -> usize {
    NEXT_CELL_ID.fetch_add(1, Ordering::Relaxed)
}

/// A computation that records what it reads and is told when any of it changes.
pub(crate) trait Observer {
    fn observer_id(&self) -> usize;
    fn invalidate(&self);
    fn record_dependency(&self, source: Rc<dyn Source>);
}

/// A readable cell that keeps track of the observers depending on it.
pub(crate) trait Source {
    fn source_id(&self) -> usize;
    fn add_watcher(&self, observer: Weak<dyn Observer>, observer_id: usize);
    fn remove_watcher(&self, observer_id: usize);
}

/// Observers currently depending on a source, keyed by observer id.
#[derive(Default)]
pub(crate) struct WatcherList {
    entries: RefCell<SmallVec<[(usize, Weak<dyn Observer>); 4]>>,
}

impl WatcherList {
    pub(crate) fn add(&self, observer: Weak<dyn Observer>, observer_id: usize) {
        let mut entries = self.entries.borrow_mut();
        if entries.iter().all(|(id, _)| *id != observer_id) {
            entries.push((observer_id, observer));
        }
    }

    pub(crate) fn remove(&self, observer_id: usize) {
        self.entries
            .borrow_mut()
            .retain(|(id, _)| *id != observer_id);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Invalidates and forgets every watcher. Observers re-register on their next read.
    pub(crate) fn invalidate_all(&self) {
        let entries = std::mem::take(&mut *self.entries.borrow_mut());
        for (_, observer) in entries {
            if let Some(observer) = observer.upgrade() {
                observer.invalidate();
            }
        }
    }
}

thread_local! {
    // `None` entries mark untracked scopes nested inside tracked ones.
    static SCOPE_STACK: RefCell<Vec<Option<Rc<dyn Observer>>>> = RefCell::new(Vec::new());
}

pub(crate) struct ScopeGuard;

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        SCOPE_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

#[must_use]
pub(crate) fn enter_tracked(observer: Rc<dyn Observer>) -> ScopeGuard {
    SCOPE_STACK.with(|stack| stack.borrow_mut().push(Some(observer)));
    ScopeGuard
}

fn current_observer() -> Option<Rc<dyn Observer>> {
    SCOPE_STACK.with(|stack| stack.borrow().last().cloned().flatten())
}

/// Registers `source` as a dependency of the innermost tracked computation, if any.
pub(crate) fn track_read(source: Rc<dyn Source>) {
    if let Some(observer) = current_observer() {
        source.add_watcher(Rc::downgrade(&observer), observer.observer_id());
        observer.record_dependency(source);
    }
}

/// Runs `f` with dependency tracking switched off.
///
/// Reads inside `f` are not recorded by the enclosing derived computation, and
/// structural mutations of the tree are permitted again.
pub fn untracked<R>(f: impl FnOnce() -> R) -> R {
    SCOPE_STACK.with(|stack| stack.borrow_mut().push(None));
    let _guard = ScopeGuard;
    f()
}

/// Returns true while a derived computation is recording its reads.
pub fn is_tracking() -> bool {
    SCOPE_STACK.with(|stack| matches!(stack.borrow().last(), Some(Some(_))))
}

/// Panics when called inside a tracked scope.
///
/// Structural mutation of the state tree while a derived value records its
/// reads would corrupt the invalidation graph.
#[track_caller]
pub fn assert_untracked(operation: &str) {
    assert!(
        !is_tracking(),
        "{operation} must not run inside a tracked scope; wrap it in `untracked`"
    );
}
