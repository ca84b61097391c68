//! Layout contracts & policies for Trellis

mod alignment;
mod arrangement;
mod axis;
mod constraints;
mod intrinsics;
mod types;

pub use alignment::*;
pub use arrangement::*;
pub use axis::*;
pub use constraints::*;
pub use intrinsics::*;
pub use types::*;

pub mod prelude {
    pub use crate::alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
    pub use crate::arrangement::LinearArrangement;
    pub use crate::axis::Axis;
    pub use crate::constraints::Constraints;
    pub use crate::types::{CrossAxisAlignment, FlexFit, LayoutData, MainAxisSize, ScrollAnchor};
}
