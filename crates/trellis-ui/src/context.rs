//! Parent-linked build context handed to widget builders.

use crate::node::StateNode;
use crate::tree::TreeShared;
use crate::widget::{Widget, WidgetKind};
use std::cell::OnceCell;
use std::fmt;
use std::rc::{Rc, Weak};
use trellis_core::{GlobalKey, MutableState, NodeId};
use trellis_ui_layout::Constraints;

/// Position of a state node in its tree.
///
/// Immutable apart from the parent link, which is set once when the node mounts.
#[derive(Clone)]
pub struct BuildContext {
    inner: Rc<ContextInner>,
}

struct ContextInner {
    node: Weak<StateNode>,
    parent: OnceCell<BuildContext>,
    host_constraints: Option<MutableState<Constraints>>,
    tree: Weak<TreeShared>,
}

impl BuildContext {
    pub(crate) fn for_node(node: Weak<StateNode>, tree: Weak<TreeShared>) -> Self {
        Self {
            inner: Rc::new(ContextInner {
                node,
                parent: OnceCell::new(),
                host_constraints: None,
                tree,
            }),
        }
    }

    /// Context above the root node, carrying the constraints supplied by the host.
    pub(crate) fn host(tree: Weak<TreeShared>, constraints: MutableState<Constraints>) -> Self {
        Self {
            inner: Rc::new(ContextInner {
                node: Weak::new(),
                parent: OnceCell::new(),
                host_constraints: Some(constraints),
                tree,
            }),
        }
    }

    /// Links this context to its parent. Fails if a parent is already set.
    pub(crate) fn attach(&self, parent: &BuildContext) -> bool {
        self.inner.parent.set(parent.clone()).is_ok()
    }

    pub fn node(&self) -> Option<Rc<StateNode>> {
        self.inner.node.upgrade()
    }

    pub fn node_id(&self) -> Option<NodeId> {
        self.node().map(|node| node.id())
    }

    pub fn parent(&self) -> Option<&BuildContext> {
        self.inner.parent.get()
    }

    pub fn is_mounted(&self) -> bool {
        self.parent().is_some()
    }

    pub fn is_host(&self) -> bool {
        self.inner.host_constraints.is_some()
    }

    pub(crate) fn tree(&self) -> Option<Rc<TreeShared>> {
        self.inner.tree.upgrade()
    }

    /// The nearest explicit constraint box, starting at this context's own widget.
    ///
    /// Falls back to the host's constraints, which are reactive: a builder that
    /// reads them rebuilds when the host lays the tree out with a different box.
    pub fn constraints(&self) -> Option<Constraints> {
        let mut current = Some(self);
        while let Some(cx) = current {
            if let Some(host) = &cx.inner.host_constraints {
                return Some(host.get());
            }
            let explicit = cx
                .node()
                .and_then(|node| node.widget_untracked().widget().explicit_constraints());
            if explicit.is_some() {
                return explicit;
            }
            current = cx.parent();
        }
        None
    }

    /// State nodes above this one, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = Rc<StateNode>> + '_ {
        std::iter::successors(self.parent(), |cx| cx.parent()).filter_map(BuildContext::node)
    }

    pub fn find_ancestor_of_kind(&self, kind: WidgetKind) -> Option<Rc<StateNode>> {
        self.ancestors().find(|node| node.kind() == kind)
    }

    /// Nearest ancestor widget of type `W`.
    ///
    /// The read is tracked: a builder calling this rebuilds when that
    /// ancestor is updated with a new widget.
    pub fn find_ancestor_widget<W: Widget>(&self) -> Option<Rc<W>> {
        let node = self.find_ancestor_of_kind(WidgetKind::of::<W>())?;
        node.widget().downcast::<W>()
    }

    pub fn find_global(&self, key: &GlobalKey) -> Option<Rc<StateNode>> {
        let tree = self.tree()?;
        let found = tree.registry.borrow().get(key);
        found
    }
}

impl fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildContext")
            .field("node", &self.node_id())
            .field("mounted", &self.is_mounted())
            .field("host", &self.is_host())
            .finish()
    }
}
