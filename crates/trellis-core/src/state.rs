//! Pull-based reactive state: value cells and memoized derivations.
//!
//! Reading a [`MutableState`] or a [`DerivedState`] while a derivation is
//! computing records a dependency. Writing a `MutableState` marks every
//! dependent derivation dirty; the derivation recomputes on its next read,
//! never eagerly on write.

use crate::tracking::{self, next_cell_id, Observer, Source, WatcherList};
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

struct StateCell<T> {
    id: usize,
    value: RefCell<T>,
    watchers: WatcherList,
}

impl<T> Source for StateCell<T> {
    fn source_id(&self) -> usize {
        self.id
    }

    fn add_watcher(&self, observer: Weak<dyn Observer>, observer_id: usize) {
        self.watchers.add(observer, observer_id);
    }

    fn remove_watcher(&self, observer_id: usize) {
        self.watchers.remove(observer_id);
    }
}

/// Observable value cell.
pub struct MutableState<T> {
    cell: Rc<StateCell<T>>,
}

impl<T> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: 'static> MutableState<T> {
    pub fn new(value: T) -> Self {
        Self {
            cell: Rc::new(StateCell {
                id: next_cell_id(),
                value: RefCell::new(value),
                watchers: WatcherList::default(),
            }),
        }
    }

    /// Tracked read through a borrow.
    ///
    /// `f` must not write this same state.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.track();
        f(&self.cell.value.borrow())
    }

    pub fn with_untracked<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cell.value.borrow())
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(T::clone)
    }

    pub fn get_untracked(&self) -> T
    where
        T: Clone,
    {
        self.with_untracked(T::clone)
    }

    /// Stores `value` and invalidates every dependent derivation.
    pub fn set(&self, value: T) {
        *self.cell.value.borrow_mut() = value;
        self.cell.watchers.invalidate_all();
    }

    /// Mutates the value in place, then invalidates dependents.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.cell.value.borrow_mut());
        self.cell.watchers.invalidate_all();
        result
    }

    /// Stores `value` only if it differs from the current one. Returns whether it was stored.
    pub fn set_if_changed(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        if *self.cell.value.borrow() == value {
            return false;
        }
        self.set(value);
        true
    }

    /// Number of derivations currently depending on this state.
    pub fn watcher_count(&self) -> usize {
        self.cell.watchers.len()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }

    fn track(&self) {
        tracking::track_read(self.cell.clone());
    }
}

impl<T: fmt::Debug> fmt::Debug for MutableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutableState")
            .field("id", &self.cell.id)
            .field("value", &self.cell.value.try_borrow().ok())
            .finish()
    }
}

pub fn mutable_state_of<T: 'static>(value: T) -> MutableState<T> {
    MutableState::new(value)
}

struct DerivedCell<T> {
    id: usize,
    compute: Box<dyn Fn() -> T>,
    value: RefCell<Option<T>>,
    dirty: Cell<bool>,
    computing: Cell<bool>,
    dependencies: RefCell<SmallVec<[Rc<dyn Source>; 4]>>,
    watchers: WatcherList,
    on_invalidate: RefCell<Option<Box<dyn Fn()>>>,
}

impl<T> DerivedCell<T> {
    fn drop_dependencies(&self) {
        let dependencies = std::mem::take(&mut *self.dependencies.borrow_mut());
        for source in dependencies {
            source.remove_watcher(self.id);
        }
    }
}

impl<T> Drop for DerivedCell<T> {
    fn drop(&mut self) {
        self.drop_dependencies();
    }
}

impl<T> Observer for DerivedCell<T> {
    fn observer_id(&self) -> usize {
        self.id
    }

    fn invalidate(&self) {
        if self.dirty.replace(true) {
            return;
        }
        log::trace!("derived state {} invalidated", self.id);
        if let Some(listener) = self.on_invalidate.borrow().as_ref() {
            listener();
        }
        self.watchers.invalidate_all();
    }

    fn record_dependency(&self, source: Rc<dyn Source>) {
        let mut dependencies = self.dependencies.borrow_mut();
        let id = source.source_id();
        let known = dependencies.iter().any(|dep| dep.source_id() == id);
        if !known {
            dependencies.push(source);
        }
    }
}

impl<T> Source for DerivedCell<T> {
    fn source_id(&self) -> usize {
        self.id
    }

    fn add_watcher(&self, observer: Weak<dyn Observer>, observer_id: usize) {
        self.watchers.add(observer, observer_id);
    }

    fn remove_watcher(&self, observer_id: usize) {
        self.watchers.remove(observer_id);
    }
}

/// Clears the computing flag of a derivation, including when its compute
/// closure unwinds. An unfinished run leaves the value dirty.
struct ComputeGuard<'a> {
    computing: &'a Cell<bool>,
    dirty: &'a Cell<bool>,
    finished: bool,
}

impl Drop for ComputeGuard<'_> {
    fn drop(&mut self) {
        self.computing.set(false);
        if !self.finished {
            self.dirty.set(true);
        }
    }
}

/// Memoized derivation.
///
/// The compute closure runs lazily on the first read and again on the first
/// read after one of the values it read last time changed. Its dependency
/// list is rebuilt on every run.
pub struct DerivedState<T> {
    cell: Rc<DerivedCell<T>>,
}

impl<T> Clone for DerivedState<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: 'static> DerivedState<T> {
    pub fn new(compute: impl Fn() -> T + 'static) -> Self {
        Self {
            cell: Rc::new(DerivedCell {
                id: next_cell_id(),
                compute: Box::new(compute),
                value: RefCell::new(None),
                dirty: Cell::new(true),
                computing: Cell::new(false),
                dependencies: RefCell::new(SmallVec::new()),
                watchers: WatcherList::default(),
                on_invalidate: RefCell::new(None),
            }),
        }
    }

    /// Installs a listener that runs when the value turns dirty.
    ///
    /// The listener runs synchronously inside the writer's `set` and must not
    /// read or write reactive state.
    pub fn on_invalidate(self, listener: impl Fn() + 'static) -> Self {
        *self.cell.on_invalidate.borrow_mut() = Some(Box::new(listener));
        self
    }

    /// Tracked read, recomputing first if the value is stale.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.refresh();
        tracking::track_read(self.cell.clone());
        let value = self.cell.value.borrow();
        f(value.as_ref().expect("refresh stores a value"))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(T::clone)
    }

    /// Returns the cached value without recomputing or tracking, if one exists.
    pub fn peek<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.cell.value.borrow().as_ref().map(f)
    }

    pub fn is_dirty(&self) -> bool {
        self.cell.dirty.get()
    }

    /// Marks the value stale without any dependency having changed.
    pub fn invalidate(&self) {
        self.cell.invalidate();
    }

    /// Number of sources read by the last computation.
    pub fn dependency_count(&self) -> usize {
        self.cell.dependencies.borrow().len()
    }

    /// Number of derivations currently depending on this one.
    pub fn watcher_count(&self) -> usize {
        self.cell.watchers.len()
    }

    /// Drops the cached value and unsubscribes from every dependency.
    pub fn clear(&self) {
        self.cell.drop_dependencies();
        self.cell.value.borrow_mut().take();
        self.cell.dirty.set(true);
    }

    fn refresh(&self) {
        let cell = &self.cell;
        if !cell.dirty.get() && cell.value.borrow().is_some() {
            return;
        }
        assert!(
            !cell.computing.replace(true),
            "derived state {} read itself while computing",
            cell.id
        );
        let mut guard = ComputeGuard {
            computing: &cell.computing,
            dirty: &cell.dirty,
            finished: false,
        };
        cell.drop_dependencies();
        // Cleared before running so writes observed mid-compute leave it dirty.
        cell.dirty.set(false);
        let observer: Rc<dyn Observer> = cell.clone();
        let next = {
            let _scope = tracking::enter_tracked(observer);
            (cell.compute)()
        };
        *cell.value.borrow_mut() = Some(next);
        guard.finished = true;
        drop(guard);
        log::trace!(
            "derived state {} recomputed with {} dependencies",
            cell.id,
            self.dependency_count()
        );
    }
}

impl<T: fmt::Debug> fmt::Debug for DerivedState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedState")
            .field("id", &self.cell.id)
            .field("dirty", &self.cell.dirty.get())
            .finish()
    }
}

pub fn derived_state_of<T: 'static>(compute: impl Fn() -> T + 'static) -> DerivedState<T> {
    DerivedState::new(compute)
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
