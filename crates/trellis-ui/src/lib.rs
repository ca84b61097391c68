//! Retained widget tree, reconciliation and constraint layout for Trellis
//!
//! A [`StateTree`] turns immutable [`Widget`] descriptions into a tree of
//! long-lived [`StateNode`]s. Each node rebuilds its children when reactive
//! state it read changes, matching old and new children by kind and key.
//! Nodes whose widget has a layout role then take part in a two-pass
//! constraint layout.

#![allow(non_snake_case)]

mod binding;
mod context;
mod error;
pub mod layout;
mod node;
mod scroll;
mod text;
mod tree;
mod widget;
pub mod widgets;

pub use binding::{
    clear_callback_error_handler, set_callback_error_handler, CallbackError, HookResult,
    VisualBinding,
};
pub use context::BuildContext;
pub use error::LayoutError;
pub use layout::{
    AlignSpec, ContainerSpec, FlexSpec, LayoutKind, LayoutNode, ListMetrics, ListSpec, TextSpec,
};
pub use node::StateNode;
pub use scroll::ScrollState;
pub use text::{
    block_height, MonospacedTextMeasurer, TextCacheStats, TextLayoutCache, TextMeasurer,
};
pub use tree::{StateTree, TreeConfig};
pub use widget::{Widget, WidgetExt, WidgetKind, WidgetRef};

pub use trellis_core::{GlobalKey, Key, Lifecycle, NodeError, NodeId};

pub mod prelude {
    pub use crate::widgets::*;
    pub use crate::{
        BuildContext, LayoutError, ScrollState, StateNode, StateTree, TreeConfig, Widget,
        WidgetExt, WidgetRef,
    };
    pub use trellis_core::{derived_state_of, mutable_state_of, GlobalKey, Key, MutableState};
    pub use trellis_ui_graphics::{EdgeInsets, Point, Rect, Size, TextStyle};
    pub use trellis_ui_layout::prelude::*;
}
