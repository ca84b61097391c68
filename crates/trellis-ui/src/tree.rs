//! The tree owning the root node, the per-tree side tables, and the layout entry point.

use crate::binding::{report, HookResult, VisualBinding};
use crate::context::BuildContext;
use crate::error::LayoutError;
use crate::layout::{layout_children, LayoutPass};
use crate::node::{ChildReconciler, StateNode};
use crate::text::{MonospacedTextMeasurer, TextCacheStats, TextLayoutCache, TextMeasurer};
use crate::widget::WidgetRef;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use trellis_core::{
    assert_untracked, reconcile, GlobalKey, GlobalKeyRegistry, MutableState, NodeError, NodeId,
};
use trellis_ui_graphics::{Size, TextStyle};
use trellis_ui_layout::Constraints;

/// Construction-time settings of a [`StateTree`].
#[derive(Clone)]
pub struct TreeConfig {
    pub text_measurer: Rc<dyn TextMeasurer>,
    pub text_cache_capacity: usize,
}

impl TreeConfig {
    pub fn with_text_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.text_measurer = Rc::new(measurer);
        self
    }

    pub fn with_text_cache_capacity(mut self, capacity: usize) -> Self {
        self.text_cache_capacity = capacity;
        self
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            text_measurer: Rc::new(MonospacedTextMeasurer),
            text_cache_capacity: TextLayoutCache::DEFAULT_CAPACITY,
        }
    }
}

impl fmt::Debug for TreeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeConfig")
            .field("text_cache_capacity", &self.text_cache_capacity)
            .finish_non_exhaustive()
    }
}

/// State shared by every node of one tree.
pub(crate) struct TreeShared {
    next_id: Cell<NodeId>,
    pub(crate) registry: RefCell<GlobalKeyRegistry<StateNode>>,
    binding: RefCell<Option<Rc<dyn VisualBinding>>>,
    text_cache: RefCell<TextLayoutCache>,
    measurer: Rc<dyn TextMeasurer>,
}

impl TreeShared {
    pub(crate) fn next_node_id(&self) -> NodeId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    pub(crate) fn measure_text(
        &self,
        text: &Rc<str>,
        style: &TextStyle,
        max_width: f32,
        max_height: f32,
    ) -> Size {
        self.text_cache
            .borrow_mut()
            .measure(&*self.measurer, text, style, max_width, max_height)
    }

    /// Invokes a binding hook, isolating any failure it reports.
    pub(crate) fn notify(
        &self,
        hook: &'static str,
        node: Option<NodeId>,
        call: impl FnOnce(&dyn VisualBinding) -> HookResult,
    ) {
        let binding = self.binding.borrow().clone();
        if let Some(binding) = binding {
            report(hook, node, call(&*binding));
        }
    }
}

/// A retained tree: one root slot reconciled against the widget given to
/// [`StateTree::set_root`], laid out by [`StateTree::layout`].
pub struct StateTree {
    shared: Rc<TreeShared>,
    host: BuildContext,
    host_constraints: MutableState<Constraints>,
    root: RefCell<Option<Rc<StateNode>>>,
}

impl StateTree {
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    pub fn with_config(config: TreeConfig) -> Self {
        let shared = Rc::new(TreeShared {
            next_id: Cell::new(1),
            registry: RefCell::new(GlobalKeyRegistry::new()),
            binding: RefCell::new(None),
            text_cache: RefCell::new(TextLayoutCache::new(config.text_cache_capacity)),
            measurer: config.text_measurer,
        });
        let host_constraints = MutableState::new(Constraints::UNBOUNDED);
        let host = BuildContext::host(Rc::downgrade(&shared), host_constraints.clone());
        Self {
            shared,
            host,
            host_constraints,
            root: RefCell::new(None),
        }
    }

    pub fn set_binding(&self, binding: Rc<dyn VisualBinding>) {
        *self.shared.binding.borrow_mut() = Some(binding);
    }

    /// Reconciles the root slot against `widget`.
    ///
    /// The current root is kept and updated when `widget` has its key and
    /// kind; otherwise it is destroyed and a new root is created.
    pub fn set_root(&self, widget: impl Into<WidgetRef>) -> Result<Rc<StateNode>, NodeError> {
        assert_untracked("StateTree::set_root");
        let old: Vec<_> = self.root.borrow_mut().take().into_iter().collect();
        let before: Vec<NodeId> = old.iter().map(|node| node.id()).collect();

        let mut host = ChildReconciler::new(&self.shared, &self.host);
        let mut nodes = reconcile(&mut host, old, vec![widget.into()])?;
        let root = nodes.pop().expect("one widget yields one node");

        if before != [root.id()] {
            self.shared.notify("on_children_changed", None, |binding| {
                binding.on_children_changed(None, &before, &[root.id()])
            });
        }
        *self.root.borrow_mut() = Some(Rc::clone(&root));
        Ok(root)
    }

    /// Destroys the whole tree.
    pub fn clear(&self) {
        let root = self.root.borrow_mut().take();
        if let Some(root) = root {
            root.dispose();
            self.shared.notify("on_children_changed", None, |binding| {
                binding.on_children_changed(None, &[root.id()], &[])
            });
        }
    }

    pub fn root(&self) -> Option<Rc<StateNode>> {
        self.root.borrow().clone()
    }

    /// Context above the root node. Its constraints are the ones last passed to [`StateTree::layout`].
    pub fn host_context(&self) -> &BuildContext {
        &self.host
    }

    /// Builds every stale subtree without laying anything out.
    pub fn flush(&self) -> Result<(), NodeError> {
        assert_untracked("StateTree::flush");
        fn visit(node: &Rc<StateNode>) -> Result<(), NodeError> {
            for child in node.children()? {
                visit(&child)?;
            }
            Ok(())
        }
        match self.root() {
            Some(root) => visit(&root),
            None => Ok(()),
        }
    }

    /// Runs the sizing pass and then the positioning pass from the root.
    ///
    /// A root without a layout of its own is transparent: each layout node
    /// it resolves to gets `constraints` and is placed at the origin.
    pub fn layout(&self, constraints: Constraints) -> Result<Size, LayoutError> {
        assert_untracked("StateTree::layout");
        self.host_constraints.set_if_changed(constraints);
        let root = self.root().ok_or(LayoutError::NoRoot)?;
        let roots = if root.has_layout() {
            vec![root]
        } else {
            let nodes = layout_children(&root, true)?;
            root.clear_needs_layout();
            nodes
        };

        let pass = LayoutPass::new(&self.shared);
        let mut size = Size::ZERO;
        for node in &roots {
            size = size.max(pass.layout_child(node, constraints)?);
        }
        for node in &roots {
            pass.position(node)?;
        }
        let size = constraints.constrain_size(size);
        log::debug!(
            "layout pass: {} root layout node(s), size {}x{}",
            roots.len(),
            size.width,
            size.height
        );
        Ok(size)
    }

    pub fn find_global(&self, key: &GlobalKey) -> Option<Rc<StateNode>> {
        self.shared.registry.borrow().get(key)
    }

    pub fn text_cache_stats(&self) -> TextCacheStats {
        self.shared.text_cache.borrow().stats()
    }
}

impl Default for StateTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StateTree {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            self.clear();
        }
    }
}

impl fmt::Debug for StateTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateTree")
            .field("root", &self.root.borrow())
            .field("global_keys", &self.shared.registry.borrow())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/tree_tests.rs"]
mod tests;
