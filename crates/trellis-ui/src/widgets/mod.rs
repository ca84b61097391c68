//! Concrete widgets.

mod basic;
mod builder;
mod flex;
mod list;
mod text;

pub use basic::*;
pub use builder::*;
pub use flex::*;
pub use list::*;
pub use text::*;

use crate::WidgetRef;

fn child_list(child: &Option<WidgetRef>) -> Vec<WidgetRef> {
    child.iter().cloned().collect()
}
