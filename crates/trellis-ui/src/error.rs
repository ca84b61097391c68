use thiserror::Error;
use trellis_core::{NodeError, NodeId};
use trellis_ui_layout::Axis;

/// Failures raised by the layout pass or by reading its outputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("virtualized list {node} needs a bounded {axis:?} scroll axis")]
    UnboundedScrollAxis { node: NodeId, axis: Axis },
    #[error("node {node} has not been sized")]
    NotMeasured { node: NodeId },
    #[error("node {node} has not been positioned")]
    NotPositioned { node: NodeId },
    #[error("node {node} is not a virtualized list")]
    NotAList { node: NodeId },
    #[error("the tree has no root widget")]
    NoRoot,
    #[error(transparent)]
    Node(#[from] NodeError),
}
