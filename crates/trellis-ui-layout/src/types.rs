//! Core layout types shared by the layout engine and the visual binding layer.

use trellis_core::NodeId;
use trellis_ui_graphics::{Point, Rect, Size};

/// How a flexible child fills the main-axis share it is allotted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FlexFit {
    /// The child is forced to exactly its share.
    #[default]
    Tight,
    /// The child may be anywhere between zero and its share.
    Loose,
}

/// Parent data for flex layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlexParentData {
    /// Weight for distributing remaining main-axis space. Zero means inflexible.
    pub flex: u32,
    pub fit: FlexFit,
}

impl FlexParentData {
    pub fn new(flex: u32, fit: FlexFit) -> Self {
        Self { flex, fit }
    }

    pub fn is_flexible(&self) -> bool {
        self.flex > 0
    }
}

/// How much main-axis space a flex container occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MainAxisSize {
    /// Shrink-wrap the children.
    Min,
    /// Take the full bound when the main axis is bounded.
    #[default]
    Max,
}

/// Cross-axis alignment for flex layouts.
/// This is axis-agnostic and gets interpreted based on the flex axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CrossAxisAlignment {
    /// Align to the start of the cross axis (Top for Row, Start for Column)
    #[default]
    Start,
    /// Align to the center of the cross axis
    Center,
    /// Align to the end of the cross axis (Bottom for Row, End for Column)
    End,
    /// Force children to the full cross-axis bound.
    Stretch,
}

impl CrossAxisAlignment {
    /// Calculate the offset for positioning a child on the cross axis.
    pub fn align(&self, available: f32, child: f32) -> f32 {
        match self {
            CrossAxisAlignment::Start | CrossAxisAlignment::Stretch => 0.0,
            CrossAxisAlignment::Center => ((available - child) / 2.0).max(0.0),
            CrossAxisAlignment::End => (available - child).max(0.0),
        }
    }
}

/// Where a target item should land inside the viewport when scrolling to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScrollAnchor {
    #[default]
    Start,
    Center,
    End,
}

/// Size and corner offset of one positioned child.
///
/// Offsets are relative to the parent's top-left corner, x right-positive,
/// y down-positive. This is the only layout output the visual binding layer
/// consumes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutData {
    pub node: NodeId,
    /// Position of the child among its parent's layout children.
    pub index: usize,
    pub size: Size,
    pub offset: Point,
}

impl LayoutData {
    pub fn new(node: NodeId, index: usize, size: Size, offset: Point) -> Self {
        Self {
            node,
            index,
            size,
            offset,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.offset, self.size)
    }
}
