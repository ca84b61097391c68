//! Intrinsic measurement APIs

/// Axis along which an intrinsic-size wrapper forces its child.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntrinsicAxis {
    /// Force the child to its natural width.
    Width,
    /// Force the child to its natural height.
    Height,
}
