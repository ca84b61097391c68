//! Persistent state nodes and the reconciler host that creates them.

use crate::context::BuildContext;
use crate::error::LayoutError;
use crate::layout::{LayoutKind, LayoutNode};
use crate::tree::TreeShared;
use crate::widget::{WidgetKind, WidgetRef};
use smallvec::SmallVec;
use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::ops::Range;
use std::rc::{Rc, Weak};
use trellis_core::{
    assert_untracked, check_unique_keys, reconcile, untracked, DerivedState, GlobalKey, Key,
    Lifecycle, MutableState, NodeError, NodeId, ReconcileHost,
};
use trellis_ui_graphics::Size;
use trellis_ui_layout::{LayoutData, ScrollAnchor};

/// Persistent node bound to one widget kind.
///
/// A node survives every rebuild in which its parent produces a widget with
/// the same key and kind at a matching position. Its children are derived
/// lazily from [`Widget::build`](crate::Widget::build) and rebuilt on the
/// first read after anything the builder read changes.
pub struct StateNode {
    id: NodeId,
    kind: WidgetKind,
    key: Option<Key>,
    widget: MutableState<WidgetRef>,
    context: BuildContext,
    lifecycle: Cell<Lifecycle>,
    children_state: DerivedState<Result<(), NodeError>>,
    children: RefCell<Vec<Rc<StateNode>>>,
    layout: Option<RefCell<LayoutNode>>,
    needs_layout: Cell<bool>,
    tree: Weak<TreeShared>,
}

impl StateNode {
    pub(crate) fn new(tree: &Rc<TreeShared>, widget: WidgetRef) -> Rc<Self> {
        let id = tree.next_node_id();
        let layout = widget
            .widget()
            .layout()
            .map(|kind| RefCell::new(LayoutNode::new(kind)));
        Rc::new_cyclic(|this: &Weak<StateNode>| {
            let builder = this.clone();
            let invalidated = this.clone();
            let children_state = DerivedState::new(move || match builder.upgrade() {
                Some(node) => node.rebuild(),
                None => Ok(()),
            })
            .on_invalidate(move || {
                if let Some(node) = invalidated.upgrade() {
                    node.mark_needs_layout();
                }
            });
            StateNode {
                id,
                kind: widget.kind(),
                key: widget.key().cloned(),
                context: BuildContext::for_node(this.clone(), Rc::downgrade(tree)),
                widget: MutableState::new(widget),
                lifecycle: Cell::new(Lifecycle::Constructed),
                children_state,
                children: RefCell::new(Vec::new()),
                layout,
                needs_layout: Cell::new(true),
                tree: Rc::downgrade(tree),
            }
        })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.get()
    }

    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    /// Tracked read of the current widget.
    pub fn widget(&self) -> WidgetRef {
        self.widget.get()
    }

    pub fn widget_untracked(&self) -> WidgetRef {
        self.widget.get_untracked()
    }

    /// Attaches the node under `parent` and claims its global key, if any.
    pub(crate) fn mount(self: &Rc<Self>, parent: &BuildContext) -> Result<(), NodeError> {
        if !self.context.attach(parent) {
            return Err(NodeError::AlreadyMounted { id: self.id });
        }
        self.lifecycle.set(Lifecycle::Mounted);
        if let (Some(key), Some(tree)) = (self.global_key(), self.tree.upgrade()) {
            tree.registry.borrow_mut().claim(key, self);
        }
        log::trace!("mounted node {} ({})", self.id, self.kind.name());
        Ok(())
    }

    /// Replaces the node's widget. The next read of its children rebuilds them.
    ///
    /// # Panics
    ///
    /// Panics when called inside a tracked scope.
    pub fn update(&self, widget: WidgetRef) -> Result<(), NodeError> {
        assert_untracked("StateNode::update");
        if self.lifecycle.get().is_disposed() {
            return Err(NodeError::Disposed { id: self.id });
        }
        if widget.kind() != self.kind {
            return Err(NodeError::TypeMismatch {
                id: self.id,
                expected: self.kind.name(),
                found: widget.kind().name(),
            });
        }
        if let (Some(layout), Some(kind)) = (&self.layout, widget.widget().layout()) {
            layout.borrow_mut().set_kind(kind);
        }
        self.widget.set(widget);
        self.mark_needs_layout();

        if self.lifecycle.get() == Lifecycle::Mounted {
            self.lifecycle.set(Lifecycle::Active);
            self.widget_untracked().widget().init_state(&self.context);
        }
        Ok(())
    }

    /// Destroys the node and, before it, every child it retains.
    ///
    /// # Panics
    ///
    /// Panics when called twice or inside a tracked scope.
    pub(crate) fn dispose(self: &Rc<Self>) {
        assert_untracked("StateNode::dispose");
        assert!(
            !self.lifecycle.get().is_disposed(),
            "node {} disposed twice",
            self.id
        );
        let children = std::mem::take(&mut *self.children.borrow_mut());
        for child in &children {
            child.dispose();
        }
        self.widget_untracked().widget().dispose(&self.context);
        self.lifecycle.set(Lifecycle::Disposed);
        self.children_state.clear();
        if let Some(layout) = &self.layout {
            layout.borrow_mut().reset();
        }
        if let Some(holder) = self.layout_parent() {
            if let Some(Ok(mut layout)) = holder.layout_node().map(RefCell::try_borrow_mut) {
                layout.release_child(self.id);
            }
        }
        if let Some(tree) = self.tree.upgrade() {
            if let Some(key) = self.global_key() {
                tree.registry.borrow_mut().release(key, self);
            }
            tree.notify("on_disposed", Some(self.id), |binding| {
                binding.on_disposed(self.id)
            });
        }
        log::trace!("disposed node {} ({})", self.id, self.kind.name());
    }

    /// Current children, rebuilding them first if they are stale.
    pub fn children(&self) -> Result<Vec<Rc<StateNode>>, NodeError> {
        self.children_state.get()?;
        Ok(self.children.borrow().clone())
    }

    /// Children as of the last build, without rebuilding.
    pub fn current_children(&self) -> Vec<Rc<StateNode>> {
        self.children.borrow().clone()
    }

    pub fn parent(&self) -> Option<Rc<StateNode>> {
        self.context.parent().and_then(BuildContext::node)
    }

    /// Nearest ancestor with a layout node, the one that lays this node out.
    fn layout_parent(&self) -> Option<Rc<StateNode>> {
        let mut parent = self.parent();
        while let Some(node) = parent {
            if node.has_layout() {
                return Some(node);
            }
            parent = node.parent();
        }
        None
    }

    fn global_key(&self) -> Option<&GlobalKey> {
        self.key.as_ref().and_then(Key::as_global)
    }

    fn rebuild(&self) -> Result<(), NodeError> {
        if self.lifecycle.get().is_disposed() {
            return Ok(());
        }
        let context = &self.context;
        let widgets = self.widget.with(|widget| widget.widget().build(context));
        untracked(|| self.reconcile_children(widgets))
    }

    fn reconcile_children(&self, widgets: Vec<WidgetRef>) -> Result<(), NodeError> {
        let tree = self
            .tree
            .upgrade()
            .ok_or(NodeError::Disposed { id: self.id })?;
        let mut host = ChildReconciler::new(&tree, &self.context);
        // Duplicate keys fail here, with the current children still attached.
        check_unique_keys(&host, &widgets)?;

        let old = std::mem::take(&mut *self.children.borrow_mut());
        let before: SmallVec<[NodeId; 8]> = old.iter().map(|child| child.id).collect();
        let next = reconcile(&mut host, old, widgets)?;

        let after: SmallVec<[NodeId; 8]> = next.iter().map(|child| child.id).collect();
        *self.children.borrow_mut() = next;
        if before != after {
            tree.notify("on_children_changed", Some(self.id), |binding| {
                binding.on_children_changed(Some(self.id), &before, &after)
            });
        }
        Ok(())
    }

    pub fn has_layout(&self) -> bool {
        self.layout.is_some()
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout.get()
    }

    /// Marks this node and its ancestors for relayout.
    ///
    /// Stops at the first ancestor already marked; a marked node always has
    /// marked ancestors.
    pub fn mark_needs_layout(&self) {
        if self.needs_layout.replace(true) {
            return;
        }
        let mut parent = self.parent();
        while let Some(node) = parent {
            if node.needs_layout.replace(true) {
                break;
            }
            parent = node.parent();
        }
    }

    pub(crate) fn clear_needs_layout(&self) {
        self.needs_layout.set(false);
    }

    pub(crate) fn layout_node(&self) -> Option<&RefCell<LayoutNode>> {
        self.layout.as_ref()
    }

    fn layout_ref(&self) -> Result<Ref<'_, LayoutNode>, LayoutError> {
        self.layout
            .as_ref()
            .map(RefCell::borrow)
            .ok_or(LayoutError::NotMeasured { node: self.id })
    }

    pub fn layout_kind(&self) -> Option<LayoutKind> {
        self.layout_node().map(|cell| cell.borrow().kind().clone())
    }

    /// Size computed by the last sizing pass.
    pub fn size(&self) -> Result<Size, LayoutError> {
        self.layout_ref()?
            .size()
            .ok_or(LayoutError::NotMeasured { node: self.id })
    }

    /// Placed children from the last positioning pass.
    pub fn layout_data(&self) -> Result<Vec<LayoutData>, LayoutError> {
        let layout = self.layout_ref()?;
        if !layout.is_positioned() {
            return Err(LayoutError::NotPositioned { node: self.id });
        }
        Ok(layout.child_data().to_vec())
    }

    /// Indices of the list children emitted by the last positioning pass.
    pub fn visible_range(&self) -> Result<Range<usize>, LayoutError> {
        let layout = self.layout_ref()?;
        let metrics = layout
            .list_metrics()
            .ok_or(LayoutError::NotAList { node: self.id })?;
        if !layout.is_positioned() {
            return Err(LayoutError::NotPositioned { node: self.id });
        }
        Ok(metrics.visible.clone())
    }

    /// Normalized `[0, 1]` scroll position that brings child `index` to `anchor`.
    pub fn normalized_scroll_offset(
        &self,
        index: usize,
        anchor: ScrollAnchor,
    ) -> Result<f32, LayoutError> {
        let layout = self.layout_ref()?;
        if !matches!(layout.kind(), LayoutKind::VirtualList(_)) {
            return Err(LayoutError::NotAList { node: self.id });
        }
        let metrics = layout
            .list_metrics()
            .ok_or(LayoutError::NotMeasured { node: self.id })?;
        Ok(metrics.normalized_offset(index, anchor))
    }

    /// Scrolls a virtualized list so child `index` lands at `anchor`.
    ///
    /// Returns the new pixel offset. Takes effect at the next layout.
    pub fn scroll_to_index(&self, index: usize, anchor: ScrollAnchor) -> Result<f32, LayoutError> {
        let normalized = self.normalized_scroll_offset(index, anchor)?;
        let layout = self.layout_ref()?;
        let (LayoutKind::VirtualList(spec), Some(metrics)) = (layout.kind(), layout.list_metrics())
        else {
            return Err(LayoutError::NotAList { node: self.id });
        };
        let offset = normalized * metrics.scrollable_extent();
        spec.scroll.scroll_to(offset);
        Ok(offset)
    }
}

impl fmt::Debug for StateNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateNode")
            .field("id", &self.id)
            .field("kind", &self.kind.name())
            .field("key", &self.key)
            .field("lifecycle", &self.lifecycle.get())
            .finish()
    }
}

/// Reconciler host creating, updating and destroying [`StateNode`]s under one parent.
pub(crate) struct ChildReconciler<'a> {
    tree: &'a Rc<TreeShared>,
    parent: &'a BuildContext,
}

impl<'a> ChildReconciler<'a> {
    pub(crate) fn new(tree: &'a Rc<TreeShared>, parent: &'a BuildContext) -> Self {
        Self { tree, parent }
    }
}

impl ReconcileHost for ChildReconciler<'_> {
    type Node = Rc<StateNode>;
    type Widget = WidgetRef;

    fn widget_key<'w>(&self, widget: &'w WidgetRef) -> Option<&'w Key> {
        widget.key()
    }

    fn node_key(&self, node: &Rc<StateNode>) -> Option<Key> {
        node.key.clone()
    }

    fn can_update(&self, node: &Rc<StateNode>, widget: &WidgetRef) -> bool {
        node.kind == widget.kind() && node.key.as_ref() == widget.key()
    }

    fn create(&mut self, widget: WidgetRef) -> Result<Rc<StateNode>, NodeError> {
        let node = StateNode::new(self.tree, widget.clone());
        let attached = node.mount(self.parent).and_then(|()| node.update(widget));
        match attached {
            Ok(()) => Ok(node),
            Err(err) => {
                node.dispose();
                Err(err)
            }
        }
    }

    fn update(&mut self, node: &Rc<StateNode>, widget: WidgetRef) -> Result<(), NodeError> {
        node.update(widget)
    }

    fn destroy(&mut self, node: Rc<StateNode>) {
        node.dispose();
    }
}

#[cfg(test)]
#[path = "tests/node_tests.rs"]
mod tests;
