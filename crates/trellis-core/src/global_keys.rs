use crate::collections::map::HashMap;
use crate::GlobalKey;
use std::fmt;
use std::rc::{Rc, Weak};

/// Side table from global key to the live node holding it.
///
/// One registry belongs to one tree; there is no process-wide instance.
pub struct GlobalKeyRegistry<N> {
    entries: HashMap<usize, Weak<N>>,
}

impl<N> GlobalKeyRegistry<N> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::default(),
        }
    }

    /// Records `node` as the holder of `key`, replacing any previous holder.
    pub fn claim(&mut self, key: &GlobalKey, node: &Rc<N>) {
        let previous = self.entries.insert(key.id(), Rc::downgrade(node));
        if let Some(previous) = previous.and_then(|weak| weak.upgrade()) {
            if !Rc::ptr_eq(&previous, node) {
                log::warn!("{key:?} claimed by a second live node; overwriting");
            }
        }
    }

    /// Removes the entry for `key` if it still points at `node`.
    pub fn release(&mut self, key: &GlobalKey, node: &Rc<N>) -> bool {
        let owned = self
            .entries
            .get(&key.id())
            .is_some_and(|weak| std::ptr::eq(weak.as_ptr(), Rc::as_ptr(node)));
        if owned {
            self.entries.remove(&key.id());
        }
        owned
    }

    pub fn get(&self, key: &GlobalKey) -> Option<Rc<N>> {
        self.entries.get(&key.id()).and_then(Weak::upgrade)
    }

    pub fn contains(&self, key: &GlobalKey) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries whose node is still alive.
    pub fn len(&self) -> usize {
        self.entries
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<N> Default for GlobalKeyRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> fmt::Debug for GlobalKeyRegistry<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalKeyRegistry")
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/global_keys_tests.rs"]
mod tests;
