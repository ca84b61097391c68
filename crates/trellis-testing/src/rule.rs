use crate::binding::RecordingBinding;
use crate::measurer::CountingMeasurer;
use std::fmt::Write as _;
use std::rc::Rc;
use trellis_core::collections::map::HashMap;
use trellis_core::{NodeError, NodeId};
use trellis_ui::widgets::Text;
use trellis_ui::{LayoutError, StateNode, StateTree, TreeConfig, WidgetRef};
use trellis_ui_graphics::{Point, Rect, Size};
use trellis_ui_layout::Constraints;

/// Headless harness around a [`StateTree`].
///
/// Owns the tree together with a [`RecordingBinding`] and a
/// [`CountingMeasurer`], and lays the tree out against a fixed viewport the
/// way a window host would.
pub struct TreeTestRule {
    tree: StateTree,
    binding: Rc<RecordingBinding>,
    measurer: CountingMeasurer,
    viewport: Size,
}

impl TreeTestRule {
    pub const DEFAULT_VIEWPORT: Size = Size::new(800.0, 600.0);

    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Uses `config` with its text measurer replaced by a counting one.
    pub fn with_config(config: TreeConfig) -> Self {
        let measurer = CountingMeasurer::new();
        let tree = StateTree::with_config(config.with_text_measurer(measurer.clone()));
        let binding = Rc::new(RecordingBinding::new());
        tree.set_binding(binding.clone());
        Self {
            tree,
            binding,
            measurer,
            viewport: Self::DEFAULT_VIEWPORT,
        }
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Size::new(width, height);
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Installs `widget` as the root and builds the whole tree.
    pub fn set_content(&self, widget: impl Into<WidgetRef>) -> Result<Rc<StateNode>, NodeError> {
        let root = self.tree.set_root(widget)?;
        self.tree.flush()?;
        Ok(root)
    }

    /// Lays the tree out with the viewport as a tight box.
    pub fn pump(&self) -> Result<Size, LayoutError> {
        self.pump_with(Constraints::tight(self.viewport.width, self.viewport.height))
    }

    pub fn pump_with(&self, constraints: Constraints) -> Result<Size, LayoutError> {
        self.tree.layout(constraints)
    }

    pub fn tree(&self) -> &StateTree {
        &self.tree
    }

    pub fn binding(&self) -> &RecordingBinding {
        &self.binding
    }

    pub fn measure_calls(&self) -> usize {
        self.measurer.calls()
    }

    pub fn root(&self) -> Option<Rc<StateNode>> {
        self.tree.root()
    }

    /// Every node in the tree, parents before children.
    pub fn nodes(&self) -> Vec<Rc<StateNode>> {
        let mut out = Vec::new();
        if let Some(root) = self.root() {
            collect(&root, &mut out);
        }
        out
    }

    /// First [`Text`] node showing exactly `text`.
    pub fn find_text(&self, text: &str) -> Option<Rc<StateNode>> {
        self.nodes().into_iter().find(|node| {
            node.widget_untracked()
                .downcast::<Text>()
                .is_some_and(|widget| &*widget.text == text)
        })
    }

    /// Window-space rectangles of every placed layout node after the last pump.
    pub fn bounds(&self) -> Result<HashMap<NodeId, Rect>, LayoutError> {
        let mut order = Vec::new();
        if let Some(root) = self.root() {
            collect_layout_order(&root, false, &mut order);
        }

        let mut origins: HashMap<NodeId, Point> = HashMap::default();
        let mut rects = HashMap::default();
        for (node, top_level) in order {
            let origin = if top_level {
                Some(Point::ZERO)
            } else {
                origins.get(&node.id()).copied()
            };
            let Some(origin) = origin else {
                continue;
            };
            rects.insert(node.id(), Rect::from_origin_size(origin, node.size()?));
            for data in node.layout_data()? {
                origins.insert(data.node, origin + data.offset);
            }
        }
        Ok(rects)
    }

    pub fn bounds_of(&self, node: NodeId) -> Option<Rect> {
        self.bounds().ok()?.get(&node).copied()
    }

    /// Indented outline of the tree, one node per line.
    pub fn dump_tree(&self) -> String {
        let mut out = String::new();
        if let Some(root) = self.root() {
            dump(&root, 0, &mut out);
        }
        out
    }
}

impl Default for TreeTestRule {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for tests that only need temporary access to a [`TreeTestRule`].
pub fn run_test_tree<R>(f: impl FnOnce(&mut TreeTestRule) -> R) -> R {
    let mut rule = TreeTestRule::new();
    f(&mut rule)
}

fn collect(node: &Rc<StateNode>, out: &mut Vec<Rc<StateNode>>) {
    out.push(node.clone());
    for child in node.current_children() {
        collect(&child, out);
    }
}

/// Layout nodes in tree order, flagged when no layout node sits above them.
fn collect_layout_order(
    node: &Rc<StateNode>,
    under_layout: bool,
    out: &mut Vec<(Rc<StateNode>, bool)>,
) {
    if node.has_layout() {
        out.push((node.clone(), !under_layout));
    }
    let under_layout = under_layout || node.has_layout();
    for child in node.current_children() {
        collect_layout_order(&child, under_layout, out);
    }
}

fn short_name(name: &str) -> &str {
    name.rsplit("::").next().unwrap_or(name)
}

fn dump(node: &Rc<StateNode>, depth: usize, out: &mut String) {
    let _ = write!(
        out,
        "{:indent$}{}#{}",
        "",
        short_name(node.kind().name()),
        node.id(),
        indent = depth * 2
    );
    if let Some(key) = node.key() {
        let _ = write!(out, " key={key:?}");
    }
    if let Ok(size) = node.size() {
        let _ = write!(out, " {}x{}", size.width, size.height);
    }
    out.push('\n');
    for child in node.current_children() {
        dump(&child, depth + 1, out);
    }
}
