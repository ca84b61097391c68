#![doc = r"Core runtime pieces for the Trellis retained widget tree."]
#![allow(clippy::missing_const_for_thread_local)]

pub mod collections;
mod error;
mod global_keys;
pub mod hash;
mod key;
mod lifecycle;
mod reconcile;
mod state;
mod tracking;

pub use error::NodeError;
pub use global_keys::GlobalKeyRegistry;
pub use key::{GlobalKey, Key, KeyValue, ValueKey};
pub use lifecycle::Lifecycle;
pub use reconcile::{
    check_unique_keys, reconcile, reconcile_with_stats, ReconcileHost, ReconcileStats,
};
pub use state::{derived_state_of, mutable_state_of, DerivedState, MutableState};
pub use tracking::{assert_untracked, is_tracking, untracked};

/// Identifier assigned to every state node of a tree.
pub type NodeId = usize;

pub mod prelude {
    pub use crate::{
        derived_state_of, mutable_state_of, untracked, DerivedState, GlobalKey, Key,
        MutableState, NodeError, NodeId,
    };
}
