use crate::{Key, NodeId};
use thiserror::Error;

/// Failures raised while mounting, updating, or reconciling state nodes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("node {id} expects widget kind {expected} but was given {found}")]
    TypeMismatch {
        id: NodeId,
        expected: &'static str,
        found: &'static str,
    },
    #[error("key {key:?} is used by more than one sibling")]
    DuplicateKey { key: Key },
    #[error("node {id} is already mounted")]
    AlreadyMounted { id: NodeId },
    #[error("node {id} has been disposed")]
    Disposed { id: NodeId },
}
