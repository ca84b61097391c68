//! Immutable widget descriptions.

use crate::layout::LayoutKind;
use crate::BuildContext;
use std::any::{Any, TypeId};
use std::fmt;
use std::rc::Rc;
use trellis_core::Key;
use trellis_ui_layout::Constraints;

/// Immutable description of the UI at one tree position.
///
/// Widgets are recreated on every rebuild. A widget whose [`Widget::layout`]
/// returns `Some` gets a layout node; every other widget is a pure
/// composition step and is transparent to layout.
pub trait Widget: Any + fmt::Debug {
    /// Child widgets, re-run whenever reactive state read here changes.
    fn build(&self, _cx: &BuildContext) -> Vec<WidgetRef> {
        Vec::new()
    }

    fn layout(&self) -> Option<LayoutKind> {
        None
    }

    /// Constraint box this widget imposes on its subtree, as seen by
    /// [`BuildContext::constraints`].
    fn explicit_constraints(&self) -> Option<Constraints> {
        None
    }

    /// Runs once, right after the first update of the node built for this widget.
    fn init_state(&self, _cx: &BuildContext) {}

    /// Runs once when the node is destroyed, after its children.
    fn dispose(&self, _cx: &BuildContext) {}
}

/// Type identity of a widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WidgetKind {
    type_id: TypeId,
    name: &'static str,
}

impl WidgetKind {
    pub fn of<W: Widget>() -> Self {
        Self {
            type_id: TypeId::of::<W>(),
            name: std::any::type_name::<W>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Shared handle to a widget plus its optional key.
#[derive(Clone)]
pub struct WidgetRef {
    key: Option<Key>,
    kind: WidgetKind,
    widget: Rc<dyn Widget>,
    any: Rc<dyn Any>,
}

impl WidgetRef {
    pub fn new<W: Widget>(widget: W) -> Self {
        let widget = Rc::new(widget);
        Self {
            key: None,
            kind: WidgetKind::of::<W>(),
            any: widget.clone(),
            widget,
        }
    }

    pub fn with_key(mut self, key: impl Into<Key>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    pub fn widget(&self) -> &dyn Widget {
        &*self.widget
    }

    pub fn downcast<W: Widget>(&self) -> Option<Rc<W>> {
        Rc::clone(&self.any).downcast::<W>().ok()
    }

    pub fn is<W: Widget>(&self) -> bool {
        self.kind.type_id == TypeId::of::<W>()
    }
}

impl<W: Widget> From<W> for WidgetRef {
    fn from(widget: W) -> Self {
        WidgetRef::new(widget)
    }
}

impl fmt::Debug for WidgetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetRef")
            .field("key", &self.key)
            .field("widget", &self.widget)
            .finish()
    }
}

/// Builder-style helpers available on every widget.
pub trait WidgetExt: Widget + Sized {
    fn keyed(self, key: impl Into<Key>) -> WidgetRef {
        WidgetRef::new(self).with_key(key)
    }

    fn into_ref(self) -> WidgetRef {
        WidgetRef::new(self)
    }
}

impl<W: Widget> WidgetExt for W {}
