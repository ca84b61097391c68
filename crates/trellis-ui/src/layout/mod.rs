//! Two-pass layout engine over the layout nodes of a [`StateTree`](crate::StateTree).
//!
//! The sizing pass hands a [`Constraints`] box down to each node, which sizes
//! its children and picks its own size inside the box. The positioning pass
//! then assigns every placed child its offset from the parent's top-left
//! corner. Nodes whose widget has no layout are transparent: their children
//! are laid out as if they belonged to the nearest layout ancestor.

mod boxes;
mod flex;
mod sliver;

use crate::error::LayoutError;
use crate::node::StateNode;
use crate::scroll::ScrollState;
use crate::text::block_height;
use crate::tree::TreeShared;
use std::ops::Range;
use std::rc::Rc;
use trellis_core::{NodeError, NodeId};
use trellis_ui_graphics::{EdgeInsets, Point, Size, TextStyle};
use trellis_ui_layout::{
    Alignment, Axis, Constraints, CrossAxisAlignment, FlexParentData, IntrinsicAxis, LayoutData,
    LinearArrangement, MainAxisSize, ScrollAnchor,
};

/// Layout role of a node, with the parameters of that role.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutKind {
    /// Forwards constraints to a single child and takes its size.
    Proxy,
    /// A proxy carrying the flex factor its parent [`LayoutKind::Flex`] reads.
    Flexible(FlexParentData),
    ConstrainedBox(Constraints),
    Padding(EdgeInsets),
    Align(AlignSpec),
    Container(ContainerSpec),
    Flex(FlexSpec),
    /// Children stacked on top of each other, each aligned inside the stack.
    ZStack(Alignment),
    VirtualList(ListSpec),
    Intrinsic(IntrinsicAxis),
    Text(TextSpec),
}

impl LayoutKind {
    pub fn name(&self) -> &'static str {
        match self {
            LayoutKind::Proxy => "Proxy",
            LayoutKind::Flexible(_) => "Flexible",
            LayoutKind::ConstrainedBox(_) => "ConstrainedBox",
            LayoutKind::Padding(_) => "Padding",
            LayoutKind::Align(_) => "Align",
            LayoutKind::Container(_) => "Container",
            LayoutKind::Flex(_) => "Flex",
            LayoutKind::ZStack(_) => "ZStack",
            LayoutKind::VirtualList(_) => "VirtualList",
            LayoutKind::Intrinsic(_) => "Intrinsic",
            LayoutKind::Text(_) => "Text",
        }
    }

    /// Flex factor this node contributes to a parent flex layout.
    pub fn flex_data(&self) -> Option<FlexParentData> {
        match self {
            LayoutKind::Flexible(data) => Some(*data),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct AlignSpec {
    pub alignment: Alignment,
    /// Own width as a multiple of the child's width. `None` stretches to a bounded max.
    pub width_factor: Option<f32>,
    pub height_factor: Option<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ContainerSpec {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub alignment: Alignment,
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FlexSpec {
    pub axis: Axis,
    pub arrangement: LinearArrangement,
    pub cross_axis_alignment: CrossAxisAlignment,
    pub main_axis_size: MainAxisSize,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ListSpec {
    pub axis: Axis,
    pub scroll: ScrollState,
    /// Margin beyond the viewport, on both ends, inside which children are still emitted.
    pub cache_extent: f32,
    pub item_spacing: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextSpec {
    pub text: Rc<str>,
    pub style: TextStyle,
    pub max_lines: Option<u32>,
}

/// Scroll geometry of a virtualized list, recorded by its sizing pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListMetrics {
    /// Leading edge of every child along the scroll axis.
    pub starts: Vec<f32>,
    /// Extent of every child along the scroll axis.
    pub extents: Vec<f32>,
    pub content_extent: f32,
    pub viewport_extent: f32,
    /// Children emitted by the last positioning pass.
    pub visible: Range<usize>,
}

impl ListMetrics {
    /// Distance the content can scroll; zero when it fits the viewport.
    pub fn scrollable_extent(&self) -> f32 {
        (self.content_extent - self.viewport_extent).max(0.0)
    }

    pub fn clamp_offset(&self, offset: f32) -> f32 {
        offset.max(0.0).min(self.scrollable_extent())
    }

    /// Normalized scroll position placing child `index` at `anchor`.
    ///
    /// Indices past the end address the last child. Returns 0 when there is
    /// nothing to scroll.
    pub fn normalized_offset(&self, index: usize, anchor: ScrollAnchor) -> f32 {
        let scrollable = self.scrollable_extent();
        if scrollable <= 0.0 || self.starts.is_empty() {
            return 0.0;
        }
        let index = index.min(self.starts.len() - 1);
        let start = self.starts[index];
        let extent = self.extents[index];
        let target = match anchor {
            ScrollAnchor::Start => start,
            ScrollAnchor::Center => start + extent / 2.0 - self.viewport_extent / 2.0,
            ScrollAnchor::End => start + extent - self.viewport_extent,
        };
        (target / scrollable).clamp(0.0, 1.0)
    }
}

/// Layout state owned by one state node.
#[derive(Debug)]
pub struct LayoutNode {
    kind: LayoutKind,
    constraints: Option<Constraints>,
    size: Option<Size>,
    children: Vec<Rc<StateNode>>,
    child_sizes: Vec<Size>,
    child_data: Vec<LayoutData>,
    list: Option<ListMetrics>,
    positioned: bool,
}

impl LayoutNode {
    pub(crate) fn new(kind: LayoutKind) -> Self {
        Self {
            kind,
            constraints: None,
            size: None,
            children: Vec::new(),
            child_sizes: Vec::new(),
            child_data: Vec::new(),
            list: None,
            positioned: false,
        }
    }

    pub fn kind(&self) -> &LayoutKind {
        &self.kind
    }

    pub(crate) fn set_kind(&mut self, kind: LayoutKind) {
        self.kind = kind;
    }

    /// Constraints of the last sizing pass.
    pub fn constraints(&self) -> Option<Constraints> {
        self.constraints
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn is_positioned(&self) -> bool {
        self.positioned
    }

    pub fn child_data(&self) -> &[LayoutData] {
        &self.child_data
    }

    pub fn list_metrics(&self) -> Option<&ListMetrics> {
        self.list.as_ref()
    }

    /// Drops the outputs of the last pass if they still refer to `child`.
    ///
    /// Called when `child` is disposed; the next pass sizes this node again.
    pub(crate) fn release_child(&mut self, child: NodeId) {
        if self.children.iter().all(|node| node.id() != child) {
            return;
        }
        self.children.clear();
        self.child_sizes.clear();
        self.child_data.clear();
        self.constraints = None;
        self.positioned = false;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::new(self.kind.clone());
    }
}

/// Result of sizing one node: its unclamped size and the sizes of the
/// children it laid out, in order.
pub(crate) struct Measured {
    size: Size,
    child_sizes: Vec<Size>,
    list: Option<ListMetrics>,
}

impl Measured {
    fn new(size: Size, child_sizes: Vec<Size>) -> Self {
        Self {
            size,
            child_sizes,
            list: None,
        }
    }

    fn leaf(size: Size) -> Self {
        Self::new(size, Vec::new())
    }
}

/// Layout children of `node`: its children, with transparent nodes replaced by theirs.
///
/// With `settle`, the layout flags of the transparent nodes passed through are
/// cleared, for callers about to lay out everything returned.
pub(crate) fn layout_children(
    node: &StateNode,
    settle: bool,
) -> Result<Vec<Rc<StateNode>>, NodeError> {
    let mut out = Vec::new();
    collect_layout_children(node, settle, &mut out)?;
    Ok(out)
}

fn collect_layout_children(
    node: &StateNode,
    settle: bool,
    out: &mut Vec<Rc<StateNode>>,
) -> Result<(), NodeError> {
    for child in node.children()? {
        if child.has_layout() {
            out.push(child);
        } else {
            collect_layout_children(&child, settle, out)?;
            // After the pull: rebuilding below may have marked it again.
            if settle {
                child.clear_needs_layout();
            }
        }
    }
    Ok(())
}

fn flex_data(node: &StateNode) -> Option<FlexParentData> {
    node.layout_node()
        .and_then(|layout| layout.borrow().kind().flex_data())
}

/// One run of the sizing and positioning passes over a tree.
pub(crate) struct LayoutPass<'a> {
    tree: &'a TreeShared,
}

impl<'a> LayoutPass<'a> {
    pub(crate) fn new(tree: &'a TreeShared) -> Self {
        Self { tree }
    }

    /// Sizes `node` under `constraints` and returns its size.
    ///
    /// A node that does not need layout and sees the same constraints as last
    /// time returns its cached size. The result always lies inside `constraints`.
    pub(crate) fn layout_child(
        &self,
        node: &Rc<StateNode>,
        constraints: Constraints,
    ) -> Result<Size, LayoutError> {
        let cell = node
            .layout_node()
            .ok_or(LayoutError::NotMeasured { node: node.id() })?;
        let children = layout_children(node, true)?;

        if !node.needs_layout() {
            let layout = cell.borrow();
            if layout.constraints == Some(constraints) {
                if let Some(size) = layout.size {
                    log::trace!("layout: node {} reused cached size", node.id());
                    return Ok(size);
                }
            }
        }

        let kind = cell.borrow().kind.clone();
        let measured = self.measure(node, &kind, &children, constraints)?;
        let size = constraints.constrain_size(measured.size);
        log::trace!(
            "layout: sized node {} ({}) to {}x{}",
            node.id(),
            kind.name(),
            size.width,
            size.height
        );

        let mut layout = cell.borrow_mut();
        layout.constraints = Some(constraints);
        layout.size = Some(size);
        layout.children = children;
        layout.children.truncate(measured.child_sizes.len());
        layout.child_sizes = measured.child_sizes;
        layout.list = measured.list;
        layout.child_data.clear();
        layout.positioned = false;
        drop(layout);

        node.clear_needs_layout();
        Ok(size)
    }

    fn measure(
        &self,
        node: &StateNode,
        kind: &LayoutKind,
        children: &[Rc<StateNode>],
        constraints: Constraints,
    ) -> Result<Measured, LayoutError> {
        match kind {
            LayoutKind::Proxy | LayoutKind::Flexible(_) => {
                boxes::measure_proxy(self, children, constraints)
            }
            LayoutKind::ConstrainedBox(bounds) => {
                boxes::measure_constrained(self, *bounds, children, constraints)
            }
            LayoutKind::Padding(padding) => {
                boxes::measure_padding(self, *padding, children, constraints)
            }
            LayoutKind::Align(spec) => boxes::measure_align(self, spec, children, constraints),
            LayoutKind::Container(spec) => {
                boxes::measure_container(self, spec, children, constraints)
            }
            LayoutKind::Flex(spec) => flex::measure(self, spec, children, constraints),
            LayoutKind::ZStack(_) => boxes::measure_stack(self, children, constraints),
            LayoutKind::VirtualList(spec) => {
                sliver::measure(self, node.id(), spec, children, constraints)
            }
            LayoutKind::Intrinsic(axis) => {
                boxes::measure_intrinsic(self, *axis, children, constraints)
            }
            LayoutKind::Text(spec) => Ok(Measured::leaf(self.measure_text(
                spec,
                constraints.max_width,
                constraints.max_height,
            ))),
        }
    }

    /// Places the children of `node` and then positions each placed child.
    pub(crate) fn position(&self, node: &Rc<StateNode>) -> Result<(), LayoutError> {
        let cell = node
            .layout_node()
            .ok_or(LayoutError::NotMeasured { node: node.id() })?;

        let mut scroll_correction = None;
        let (size, placed, children) = {
            let layout = cell.borrow();
            let size = layout
                .size
                .ok_or(LayoutError::NotMeasured { node: node.id() })?;
            let placed = match (&layout.kind, &layout.list) {
                (LayoutKind::VirtualList(spec), Some(metrics)) => {
                    let placement =
                        sliver::place(spec, metrics, &layout.children, &layout.child_sizes);
                    let scroll = spec.scroll.clone();
                    scroll_correction = Some((scroll, placement.offset, placement.visible));
                    placement.data
                }
                (kind, _) => place(kind, size, &layout.children, &layout.child_sizes),
            };
            (size, placed, layout.children.clone())
        };

        {
            let mut layout = cell.borrow_mut();
            layout.child_data = placed.clone();
            layout.positioned = true;
            if let (Some(metrics), Some(correction)) = (&mut layout.list, &scroll_correction) {
                metrics.visible = correction.2.clone();
            }
        }
        if let Some((scroll, offset, _)) = scroll_correction {
            scroll.scroll_to(offset);
        }

        self.tree.notify("on_layout", Some(node.id()), |binding| {
            binding.on_layout(node.id(), size, &placed)
        });
        for data in &placed {
            self.position(&children[data.index])?;
        }
        Ok(())
    }

    /// Natural extent of `node` along `axis`, given `extent` on the other axis.
    ///
    /// Independent of the constraints of any pass; nothing is cached or marked.
    pub(crate) fn intrinsic(
        &self,
        node: &StateNode,
        axis: IntrinsicAxis,
        extent: f32,
    ) -> Result<f32, LayoutError> {
        let children = layout_children(node, false)?;
        let child = |extent: f32| match children.first() {
            Some(child) => self.intrinsic(child, axis, extent),
            None => Ok(0.0),
        };
        let Some(cell) = node.layout_node() else {
            return child(extent);
        };
        let kind = cell.borrow().kind.clone();

        match kind {
            LayoutKind::Proxy | LayoutKind::Flexible(_) | LayoutKind::Intrinsic(_) => child(extent),
            LayoutKind::ConstrainedBox(bounds) => {
                let (min, max) = match axis {
                    IntrinsicAxis::Width => (bounds.min_width, bounds.max_width),
                    IntrinsicAxis::Height => (bounds.min_height, bounds.max_height),
                };
                Ok(child(extent)?.max(min).min(max))
            }
            LayoutKind::Padding(padding) => {
                let (own, across) = match axis {
                    IntrinsicAxis::Width => (padding.horizontal_sum(), padding.vertical_sum()),
                    IntrinsicAxis::Height => (padding.vertical_sum(), padding.horizontal_sum()),
                };
                Ok(child((extent - across).max(0.0))? + own)
            }
            LayoutKind::Align(spec) => {
                let factor = match axis {
                    IntrinsicAxis::Width => spec.width_factor,
                    IntrinsicAxis::Height => spec.height_factor,
                };
                Ok(child(extent)? * factor.unwrap_or(1.0))
            }
            LayoutKind::Container(spec) => {
                let (own, across) = match axis {
                    IntrinsicAxis::Width => (spec.width, spec.height),
                    IntrinsicAxis::Height => (spec.height, spec.width),
                };
                match own {
                    Some(own) => Ok(own),
                    None => child(across.unwrap_or(extent)),
                }
            }
            LayoutKind::Flex(spec) => flex::intrinsic(self, &spec, &children, axis, extent),
            LayoutKind::ZStack(_) => {
                let mut largest = 0.0f32;
                for child in &children {
                    largest = largest.max(self.intrinsic(child, axis, extent)?);
                }
                Ok(largest)
            }
            LayoutKind::VirtualList(spec) => {
                sliver::intrinsic(self, &spec, &children, axis, extent)
            }
            LayoutKind::Text(spec) => {
                let max_width = match axis {
                    IntrinsicAxis::Width => f32::INFINITY,
                    IntrinsicAxis::Height => extent,
                };
                let size = self.measure_text(&spec, max_width, f32::INFINITY);
                Ok(match axis {
                    IntrinsicAxis::Width => size.width,
                    IntrinsicAxis::Height => size.height,
                })
            }
        }
    }

    /// Measures text through the tree's cache, clipping to `max_lines` if set.
    fn measure_text(&self, spec: &TextSpec, max_width: f32, max_height: f32) -> Size {
        let mut size = self
            .tree
            .measure_text(&spec.text, &spec.style, max_width, max_height);
        if let Some(lines) = spec.max_lines {
            size.height = size.height.min(block_height(&spec.style, lines as usize));
        }
        size
    }
}

/// Offsets of the laid-out children of every non-list layout.
fn place(
    kind: &LayoutKind,
    size: Size,
    children: &[Rc<StateNode>],
    sizes: &[Size],
) -> Vec<LayoutData> {
    let at = |index: usize, offset: Point| {
        LayoutData::new(children[index].id(), index, sizes[index], offset)
    };
    let outer = (size.width, size.height);
    let aligned = |alignment: Alignment, index: usize| {
        let child = sizes[index];
        let (x, y) = alignment.align(outer, (child.width, child.height));
        at(index, Point::new(x, y))
    };
    match kind {
        LayoutKind::Proxy
        | LayoutKind::Flexible(_)
        | LayoutKind::ConstrainedBox(_)
        | LayoutKind::Intrinsic(_) => (0..sizes.len())
            .map(|index| at(index, Point::ZERO))
            .collect(),
        LayoutKind::Padding(padding) => (0..sizes.len())
            .map(|index| at(index, padding.top_left()))
            .collect(),
        LayoutKind::Align(spec) => (0..sizes.len())
            .map(|index| aligned(spec.alignment, index))
            .collect(),
        LayoutKind::Container(spec) => (0..sizes.len())
            .map(|index| aligned(spec.alignment, index))
            .collect(),
        LayoutKind::ZStack(alignment) => (0..sizes.len())
            .map(|index| aligned(*alignment, index))
            .collect(),
        LayoutKind::Flex(spec) => flex::place(spec, size, children, sizes),
        LayoutKind::VirtualList(_) | LayoutKind::Text(_) => Vec::new(),
    }
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;
