//! Main-axis arrangement policies for flex and list layouts.

/// How leftover main-axis space is distributed around and between children.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum LinearArrangement {
    /// Pack children against the leading edge.
    #[default]
    Start,
    /// Pack children so the last child touches the trailing edge.
    End,
    /// Pack children as a centered block.
    Center,
    /// First and last child touch the edges, leftover space split between neighbours.
    SpaceBetween,
    /// Each child gets an equal share with half a share at both ends.
    SpaceAround,
    /// Equal gaps before the first child, between children, and after the last child.
    SpaceEvenly,
    /// Fixed gap between children, packed at the leading edge.
    SpacedBy(f32),
}

impl LinearArrangement {
    /// Creates an arrangement that inserts a fixed spacing between children.
    pub fn spaced_by(spacing: f32) -> Self {
        Self::SpacedBy(spacing)
    }

    /// Fixed spacing that must be reserved before distributing free space.
    pub fn fixed_spacing(&self, count: usize) -> f32 {
        match *self {
            LinearArrangement::SpacedBy(spacing) if count > 1 => {
                spacing.max(0.0) * (count - 1) as f32
            }
            _ => 0.0,
        }
    }

    /// Returns `(leading_offset, gap)` for `count` children whose main-axis
    /// extents add up to `children_total` inside `total_size`.
    ///
    /// When the children overflow the available space every policy falls back
    /// to [`LinearArrangement::Start`] so gaps never turn negative.
    pub fn leading_and_gap(
        &self,
        total_size: f32,
        count: usize,
        children_total: f32,
    ) -> (f32, f32) {
        if count == 0 {
            return (0.0, 0.0);
        }
        let free = (total_size - children_total).max(0.0);
        let count_f = count as f32;
        match *self {
            LinearArrangement::Start => (0.0, 0.0),
            LinearArrangement::End => (free, 0.0),
            LinearArrangement::Center => (free / 2.0, 0.0),
            LinearArrangement::SpaceBetween if count == 1 => (0.0, 0.0),
            LinearArrangement::SpaceBetween => (0.0, free / (count_f - 1.0)),
            LinearArrangement::SpaceAround => {
                let gap = free / count_f;
                (gap / 2.0, gap)
            }
            LinearArrangement::SpaceEvenly => {
                let gap = free / (count_f + 1.0);
                (gap, gap)
            }
            LinearArrangement::SpacedBy(spacing) => (0.0, spacing.max(0.0)),
        }
    }

    /// Writes the leading edge of every child into `out_positions`.
    pub fn arrange(&self, total_size: f32, sizes: &[f32], out_positions: &mut [f32]) {
        debug_assert_eq!(sizes.len(), out_positions.len());
        let children_total: f32 = sizes.iter().sum();
        let (leading, gap) = self.leading_and_gap(total_size, sizes.len(), children_total);
        let mut cursor = leading;
        for (size, position) in sizes.iter().zip(out_positions.iter_mut()) {
            *position = cursor;
            cursor += size + gap;
        }
    }
}

#[cfg(test)]
#[path = "tests/arrangement_tests.rs"]
mod tests;
