//! Identity tokens used to match widgets against existing state nodes.

use crate::hash::hash_one;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Object-safe equality for values wrapped by a [`ValueKey`].
pub trait KeyValue: Any + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn KeyValue) -> bool;
}

impl<T> KeyValue for T
where
    T: Any + fmt::Debug + PartialEq,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn KeyValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| other == self)
    }
}

/// Key that compares equal to another key wrapping an equal value of the same type.
#[derive(Clone)]
pub struct ValueKey {
    hash: u64,
    value: Rc<dyn KeyValue>,
}

impl ValueKey {
    pub fn new<T>(value: T) -> Self
    where
        T: Any + fmt::Debug + PartialEq + Hash,
    {
        Self {
            hash: hash_one(&(TypeId::of::<T>(), &value)),
            value: Rc::new(value),
        }
    }

    /// Returns the wrapped value when it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.as_any().downcast_ref::<T>()
    }
}

impl PartialEq for ValueKey {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.value.dyn_eq(&*other.value)
    }
}

impl Eq for ValueKey {}

impl Hash for ValueKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl fmt::Debug for ValueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueKey({:?})", self.value)
    }
}

static NEXT_GLOBAL_KEY: AtomicUsize = AtomicUsize::new(1);

/// Key that is unique for the lifetime of the process.
///
/// At most one live state node may hold a given global key; the tree's
/// [`GlobalKeyRegistry`](crate::GlobalKeyRegistry) maps it back to that node.
#[derive(Clone)]
pub struct GlobalKey {
    id: usize,
    label: Option<Rc<str>>,
}

impl GlobalKey {
    pub fn new() -> Self {
        Self {
            id: NEXT_GLOBAL_KEY.fetch_add(1, Ordering::Relaxed),
            label: None,
        }
    }

    /// Creates a key carrying a label that only shows up in debug output.
    pub fn labeled(label: &str) -> Self {
        Self {
            label: Some(Rc::from(label)),
            ..Self::new()
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Default for GlobalKey {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for GlobalKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GlobalKey {}

impl Hash for GlobalKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for GlobalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "GlobalKey#{}({label})", self.id),
            None => write!(f, "GlobalKey#{}", self.id),
        }
    }
}

/// Identity token attached to a widget.
///
/// Keys have no ordering; only equality is meaningful.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Value(ValueKey),
    Global(GlobalKey),
}

impl Key {
    /// Wraps `value` in a [`ValueKey`].
    pub fn value<T>(value: T) -> Self
    where
        T: Any + fmt::Debug + PartialEq + Hash,
    {
        Key::Value(ValueKey::new(value))
    }

    pub fn as_global(&self) -> Option<&GlobalKey> {
        match self {
            Key::Global(key) => Some(key),
            Key::Value(_) => None,
        }
    }
}

impl From<GlobalKey> for Key {
    fn from(key: GlobalKey) -> Self {
        Key::Global(key)
    }
}

impl From<ValueKey> for Key {
    fn from(key: ValueKey) -> Self {
        Key::Value(key)
    }
}

macro_rules! key_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Key {
                fn from(value: $ty) -> Self {
                    Key::value(value)
                }
            }
        )*
    };
}

key_from_value!(&'static str, String, u32, u64, usize, i32, i64);

#[cfg(test)]
#[path = "tests/key_tests.rs"]
mod tests;
