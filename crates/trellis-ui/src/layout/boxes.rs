//! Single-child boxes and the stack.

use super::{AlignSpec, ContainerSpec, LayoutPass, Measured};
use crate::error::LayoutError;
use crate::node::StateNode;
use std::rc::Rc;
use trellis_ui_graphics::{EdgeInsets, Size};
use trellis_ui_layout::{Constraints, IntrinsicAxis};

/// Lays out the first child, if there is one.
fn first_child(
    pass: &LayoutPass<'_>,
    children: &[Rc<StateNode>],
    constraints: Constraints,
) -> Result<Option<Size>, LayoutError> {
    children
        .first()
        .map(|child| pass.layout_child(child, constraints))
        .transpose()
}

fn single(size: Size, child: Option<Size>) -> Measured {
    Measured::new(size, child.into_iter().collect())
}

pub(super) fn measure_proxy(
    pass: &LayoutPass<'_>,
    children: &[Rc<StateNode>],
    constraints: Constraints,
) -> Result<Measured, LayoutError> {
    let child = first_child(pass, children, constraints)?;
    Ok(single(child.unwrap_or(constraints.smallest()), child))
}

pub(super) fn measure_constrained(
    pass: &LayoutPass<'_>,
    bounds: Constraints,
    children: &[Rc<StateNode>],
    constraints: Constraints,
) -> Result<Measured, LayoutError> {
    let inner = constraints.intersect(bounds);
    let child = first_child(pass, children, inner)?;
    Ok(single(child.unwrap_or(inner.smallest()), child))
}

pub(super) fn measure_padding(
    pass: &LayoutPass<'_>,
    padding: EdgeInsets,
    children: &[Rc<StateNode>],
    constraints: Constraints,
) -> Result<Measured, LayoutError> {
    let child = first_child(pass, children, constraints.deflate_insets(padding))?;
    let inner = child.unwrap_or(Size::ZERO);
    let size = Size::new(
        inner.width + padding.horizontal_sum(),
        inner.height + padding.vertical_sum(),
    );
    Ok(single(size, child))
}

/// Child extent times `factor`, or the bound when there is no factor and the axis is bounded.
fn aligned_extent(factor: Option<f32>, max: f32, child: f32) -> f32 {
    match factor {
        Some(factor) => child * factor,
        None if max.is_finite() => max,
        None => child,
    }
}

pub(super) fn measure_align(
    pass: &LayoutPass<'_>,
    spec: &AlignSpec,
    children: &[Rc<StateNode>],
    constraints: Constraints,
) -> Result<Measured, LayoutError> {
    let child = first_child(pass, children, Constraints::UNBOUNDED)?;
    let natural = child.unwrap_or(Size::ZERO);
    let size = Size::new(
        aligned_extent(spec.width_factor, constraints.max_width, natural.width),
        aligned_extent(spec.height_factor, constraints.max_height, natural.height),
    );
    Ok(single(size, child))
}

pub(super) fn measure_container(
    pass: &LayoutPass<'_>,
    spec: &ContainerSpec,
    children: &[Rc<StateNode>],
    constraints: Constraints,
) -> Result<Measured, LayoutError> {
    let child_constraints = Constraints::new(
        0.0,
        spec.width.unwrap_or(constraints.max_width),
        0.0,
        spec.height.unwrap_or(constraints.max_height),
    );
    let child = first_child(pass, children, child_constraints)?;
    let natural = child.unwrap_or(Size::ZERO);
    let size = Size::new(
        spec.width
            .unwrap_or_else(|| natural.width.min(constraints.max_width)),
        spec.height
            .unwrap_or_else(|| natural.height.min(constraints.max_height)),
    );
    Ok(single(size, child))
}

pub(super) fn measure_stack(
    pass: &LayoutPass<'_>,
    children: &[Rc<StateNode>],
    constraints: Constraints,
) -> Result<Measured, LayoutError> {
    if children.is_empty() {
        return Ok(Measured::leaf(constraints.smallest()));
    }
    let mut size = Size::ZERO;
    let mut sizes = Vec::with_capacity(children.len());
    for child in children {
        let child_size = pass.layout_child(child, constraints)?;
        size = size.max(child_size);
        sizes.push(child_size);
    }
    Ok(Measured::new(size, sizes))
}

/// Forces the child to its natural extent along `axis`, clamped into `constraints`.
pub(super) fn measure_intrinsic(
    pass: &LayoutPass<'_>,
    axis: IntrinsicAxis,
    children: &[Rc<StateNode>],
    constraints: Constraints,
) -> Result<Measured, LayoutError> {
    let Some(child) = children.first() else {
        return Ok(Measured::leaf(constraints.smallest()));
    };
    let natural = pass.intrinsic(child, axis, f32::INFINITY)?;
    let (min, max) = match axis {
        IntrinsicAxis::Width => (constraints.min_width, constraints.max_width),
        IntrinsicAxis::Height => (constraints.min_height, constraints.max_height),
    };
    let extent = natural.max(min).min(max);
    let child_constraints = match axis {
        IntrinsicAxis::Width => constraints.tighten_width(extent),
        IntrinsicAxis::Height => constraints.tighten_height(extent),
    };
    let size = pass.layout_child(child, child_constraints)?;
    Ok(single(size, Some(size)))
}
