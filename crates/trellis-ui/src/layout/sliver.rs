//! Virtualized list: measures every child, emits only those near the viewport.

use super::{LayoutPass, ListMetrics, ListSpec, Measured};
use crate::error::LayoutError;
use crate::node::StateNode;
use std::ops::Range;
use std::rc::Rc;
use trellis_core::NodeId;
use trellis_ui_graphics::Size;
use trellis_ui_layout::{Axis, Constraints, IntrinsicAxis, LayoutData};

pub(super) fn measure(
    pass: &LayoutPass<'_>,
    node: NodeId,
    spec: &ListSpec,
    children: &[Rc<StateNode>],
    constraints: Constraints,
) -> Result<Measured, LayoutError> {
    let axis = spec.axis;
    let (_, max_main, min_cross, max_cross) = axis.split(constraints);
    if !max_main.is_finite() {
        return Err(LayoutError::UnboundedScrollAxis { node, axis });
    }

    let child_constraints = if max_cross.is_finite() {
        axis.constraints(0.0, f32::INFINITY, max_cross, max_cross)
    } else {
        axis.constraints(0.0, f32::INFINITY, 0.0, f32::INFINITY)
    };
    let spacing = spec.item_spacing.max(0.0);

    let mut sizes = Vec::with_capacity(children.len());
    let mut starts = Vec::with_capacity(children.len());
    let mut extents = Vec::with_capacity(children.len());
    let mut cursor = 0.0f32;
    let mut widest = 0.0f32;
    for (index, child) in children.iter().enumerate() {
        if index > 0 {
            cursor += spacing;
        }
        let size = pass.layout_child(child, child_constraints)?;
        starts.push(cursor);
        extents.push(axis.main(size));
        cursor += axis.main(size);
        widest = widest.max(axis.cross(size));
        sizes.push(size);
    }

    let cross = if max_cross.is_finite() {
        max_cross
    } else {
        widest.max(min_cross)
    };
    log::trace!(
        "virtual list {node}: {} children, content extent {cursor}",
        children.len()
    );
    Ok(Measured {
        size: axis.size(max_main, cross),
        child_sizes: sizes,
        list: Some(ListMetrics {
            starts,
            extents,
            content_extent: cursor,
            viewport_extent: max_main,
            visible: 0..0,
        }),
    })
}

pub(super) struct Placement {
    pub(super) data: Vec<LayoutData>,
    pub(super) visible: Range<usize>,
    /// Scroll offset after clamping into the scrollable range.
    pub(super) offset: f32,
}

/// Emits the children whose extent intersects the viewport widened by the cache extent.
pub(super) fn place(
    spec: &ListSpec,
    metrics: &ListMetrics,
    children: &[Rc<StateNode>],
    sizes: &[Size],
) -> Placement {
    let offset = metrics.clamp_offset(spec.scroll.offset_untracked());
    let cache_extent = spec.cache_extent.max(0.0);
    let window_start = offset - cache_extent;
    let window_end = offset + metrics.viewport_extent + cache_extent;

    let data: Vec<LayoutData> = metrics
        .starts
        .iter()
        .zip(&metrics.extents)
        .enumerate()
        .filter(|(_, (start, extent))| **start < window_end && **start + **extent > window_start)
        .map(|(index, (start, _))| {
            LayoutData::new(
                children[index].id(),
                index,
                sizes[index],
                spec.axis.point(start - offset, 0.0),
            )
        })
        .collect();

    let visible = match (data.first(), data.last()) {
        (Some(first), Some(last)) => first.index..last.index + 1,
        _ => 0..0,
    };
    Placement {
        data,
        visible,
        offset,
    }
}

pub(super) fn intrinsic(
    pass: &LayoutPass<'_>,
    spec: &ListSpec,
    children: &[Rc<StateNode>],
    axis: IntrinsicAxis,
    extent: f32,
) -> Result<f32, LayoutError> {
    let along_scroll = matches!(
        (spec.axis, axis),
        (Axis::Horizontal, IntrinsicAxis::Width) | (Axis::Vertical, IntrinsicAxis::Height)
    );
    let mut total = 0.0f32;
    let mut largest = 0.0f32;
    for child in children {
        let value = pass.intrinsic(child, axis, extent)?;
        total += value;
        largest = largest.max(value);
    }
    if along_scroll {
        let gaps = children.len().saturating_sub(1) as f32;
        Ok(total + gaps * spec.item_spacing.max(0.0))
    } else {
        Ok(largest)
    }
}
