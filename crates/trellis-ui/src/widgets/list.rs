use crate::layout::{LayoutKind, ListSpec};
use crate::scroll::ScrollState;
use crate::{BuildContext, Widget, WidgetRef};
use trellis_ui_layout::Axis;

/// Scrollable list that sizes every child but only places the ones inside
/// the viewport, widened by `cache_extent` on both ends.
#[derive(Clone, Debug, Default)]
pub struct VirtualList {
    pub spec: ListSpec,
    pub children: Vec<WidgetRef>,
}

impl VirtualList {
    pub fn new(axis: Axis, scroll: ScrollState, children: Vec<WidgetRef>) -> Self {
        Self {
            spec: ListSpec {
                axis,
                scroll,
                ..ListSpec::default()
            },
            children,
        }
    }

    pub fn cache_extent(mut self, extent: f32) -> Self {
        self.spec.cache_extent = extent.max(0.0);
        self
    }

    pub fn item_spacing(mut self, spacing: f32) -> Self {
        self.spec.item_spacing = spacing.max(0.0);
        self
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.spec.scroll
    }
}

impl Widget for VirtualList {
    fn build(&self, _cx: &BuildContext) -> Vec<WidgetRef> {
        self.children.clone()
    }

    fn layout(&self) -> Option<LayoutKind> {
        Some(LayoutKind::VirtualList(self.spec.clone()))
    }
}
