//! Row and column layout with flex-factor distribution.

use super::{flex_data, FlexSpec, LayoutPass, Measured};
use crate::error::LayoutError;
use crate::node::StateNode;
use smallvec::SmallVec;
use std::rc::Rc;
use trellis_ui_graphics::Size;
use trellis_ui_layout::{
    Axis, Constraints, CrossAxisAlignment, FlexFit, FlexParentData, IntrinsicAxis, LayoutData,
    MainAxisSize,
};

pub(super) fn measure(
    pass: &LayoutPass<'_>,
    spec: &FlexSpec,
    children: &[Rc<StateNode>],
    constraints: Constraints,
) -> Result<Measured, LayoutError> {
    let axis = spec.axis;
    let (min_main, max_main, min_cross, max_cross) = axis.split(constraints);
    let main_bounded = max_main.is_finite();
    let spacing = spec.arrangement.fixed_spacing(children.len());

    let stretch =
        spec.cross_axis_alignment == CrossAxisAlignment::Stretch && max_cross.is_finite();
    let (child_min_cross, child_max_cross) = if stretch {
        (max_cross, max_cross)
    } else {
        (0.0, max_cross)
    };

    // Inflexible children first: loose main axis, bounded cross axis.
    let mut sizes: SmallVec<[Size; 8]> = SmallVec::from_elem(Size::ZERO, children.len());
    let mut flexible: SmallVec<[(usize, FlexParentData); 8]> = SmallVec::new();
    let mut fixed_main = 0.0f32;
    let loose = axis.constraints(0.0, max_main, child_min_cross, child_max_cross);
    for (index, child) in children.iter().enumerate() {
        match flex_data(child) {
            Some(data) if data.is_flexible() && main_bounded => flexible.push((index, data)),
            _ => {
                let size = pass.layout_child(child, loose)?;
                fixed_main += axis.main(size);
                sizes[index] = size;
            }
        }
    }

    // Flexible children split what is left in proportion to their factors.
    if !flexible.is_empty() {
        let total_flex: u32 = flexible.iter().map(|(_, data)| data.flex).sum();
        let remaining = (max_main - fixed_main - spacing).max(0.0);
        for &(index, data) in &flexible {
            let share = remaining * data.flex as f32 / total_flex as f32;
            let min_main = match data.fit {
                FlexFit::Tight => share,
                FlexFit::Loose => 0.0,
            };
            let child_constraints =
                axis.constraints(min_main, share, child_min_cross, child_max_cross);
            sizes[index] = pass.layout_child(&children[index], child_constraints)?;
        }
    }

    let children_main: f32 = sizes.iter().map(|size| axis.main(*size)).sum::<f32>() + spacing;
    let children_cross = sizes
        .iter()
        .map(|size| axis.cross(*size))
        .fold(0.0f32, f32::max);

    let main = match spec.main_axis_size {
        MainAxisSize::Max if main_bounded => max_main,
        _ => children_main.max(min_main).min(max_main),
    };
    let cross = if stretch {
        max_cross
    } else {
        children_cross.max(min_cross).min(max_cross)
    };
    Ok(Measured::new(axis.size(main, cross), sizes.into_vec()))
}

pub(super) fn place(
    spec: &FlexSpec,
    size: Size,
    children: &[Rc<StateNode>],
    sizes: &[Size],
) -> Vec<LayoutData> {
    let axis = spec.axis;
    let main_sizes: SmallVec<[f32; 8]> = sizes.iter().map(|size| axis.main(*size)).collect();
    let mut main_positions: SmallVec<[f32; 8]> = SmallVec::from_elem(0.0, sizes.len());
    spec.arrangement
        .arrange(axis.main(size), &main_sizes, &mut main_positions);

    let cross_extent = axis.cross(size);
    sizes
        .iter()
        .zip(main_positions)
        .enumerate()
        .map(|(index, (child, main))| {
            let cross = spec
                .cross_axis_alignment
                .align(cross_extent, axis.cross(*child));
            LayoutData::new(children[index].id(), index, *child, axis.point(main, cross))
        })
        .collect()
}

pub(super) fn intrinsic(
    pass: &LayoutPass<'_>,
    spec: &FlexSpec,
    children: &[Rc<StateNode>],
    axis: IntrinsicAxis,
    extent: f32,
) -> Result<f32, LayoutError> {
    let along_main = matches!(
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
    Ok(if along_main {
        total + spec.arrangement.fixed_spacing(children.len())
    } else {
        largest
    })
}
