//! Testing utilities and harness for Trellis

pub mod binding;
pub mod measurer;
pub mod rule;

pub use binding::{BindingEvent, RecordingBinding};
pub use measurer::CountingMeasurer;
pub use rule::*;

pub mod prelude {
    pub use crate::binding::{BindingEvent, RecordingBinding};
    pub use crate::measurer::CountingMeasurer;
    pub use crate::rule::*;
}
