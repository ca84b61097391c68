//! Pure geometry and typography data for Trellis
//!
//! This crate contains the geometry primitives and text style descriptions
//! shared by the layout contracts and the retained tree.

mod geometry;
mod typography;

pub use geometry::*;
pub use typography::*;

pub mod prelude {
    pub use crate::geometry::{EdgeInsets, Point, Rect, Size};
    pub use crate::typography::{FontStyle, FontWeight, TextStyle};
}

#[cfg(test)]
#[path = "tests/geometry_tests.rs"]
mod tests;
