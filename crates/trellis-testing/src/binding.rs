//! Visual binding that records every notification it receives.

use std::cell::{Cell, RefCell};
use trellis_core::NodeId;
use trellis_ui::{HookResult, VisualBinding};
use trellis_ui_graphics::Size;
use trellis_ui_layout::LayoutData;

#[derive(Clone, Debug, PartialEq)]
pub enum BindingEvent {
    ChildrenChanged {
        parent: Option<NodeId>,
        before: Vec<NodeId>,
        after: Vec<NodeId>,
    },
    Disposed(NodeId),
    Layout {
        node: NodeId,
        size: Size,
        children: Vec<LayoutData>,
    },
}

/// Records hook calls in order. Can be told to fail one hook to exercise
/// the error-isolation path.
#[derive(Debug, Default)]
pub struct RecordingBinding {
    events: RefCell<Vec<BindingEvent>>,
    failing_hook: Cell<Option<&'static str>>,
}

impl RecordingBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call of `hook` return an error after recording it.
    pub fn fail_hook(&self, hook: &'static str) {
        self.failing_hook.set(Some(hook));
    }

    pub fn events(&self) -> Vec<BindingEvent> {
        self.events.borrow().clone()
    }

    pub fn take_events(&self) -> Vec<BindingEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn disposed(&self) -> Vec<NodeId> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                BindingEvent::Disposed(node) => Some(*node),
                _ => None,
            })
            .collect()
    }

    /// Placed children reported by the last layout notification for `node`.
    pub fn last_layout(&self, node: NodeId) -> Option<Vec<LayoutData>> {
        self.events.borrow().iter().rev().find_map(|event| match event {
            BindingEvent::Layout {
                node: laid_out,
                children,
                ..
            } if *laid_out == node => Some(children.clone()),
            _ => None,
        })
    }

    fn record(&self, hook: &'static str, event: BindingEvent) -> HookResult {
        self.events.borrow_mut().push(event);
        if self.failing_hook.get() == Some(hook) {
            return Err(format!("{hook} rejected by test binding").into());
        }
        Ok(())
    }
}

impl VisualBinding for RecordingBinding {
    fn on_children_changed(
        &self,
        parent: Option<NodeId>,
        before: &[NodeId],
        after: &[NodeId],
    ) -> HookResult {
        self.record(
            "on_children_changed",
            BindingEvent::ChildrenChanged {
                parent,
                before: before.to_vec(),
                after: after.to_vec(),
            },
        )
    }

    fn on_disposed(&self, node: NodeId) -> HookResult {
        self.record("on_disposed", BindingEvent::Disposed(node))
    }

    fn on_layout(&self, node: NodeId, size: Size, children: &[LayoutData]) -> HookResult {
        self.record(
            "on_layout",
            BindingEvent::Layout {
                node,
                size,
                children: children.to_vec(),
            },
        )
    }
}
