use super::child_list;
use crate::layout::{FlexSpec, LayoutKind};
use crate::{BuildContext, Widget, WidgetRef};
use trellis_ui_layout::{
    Axis, CrossAxisAlignment, FlexFit, FlexParentData, LinearArrangement, MainAxisSize,
};

/// Lays its children out in a line along `axis`, sharing leftover space
/// between [`Flexible`] children by weight.
#[derive(Clone, Debug, Default)]
pub struct Flex {
    pub spec: FlexSpec,
    pub children: Vec<WidgetRef>,
}

impl Flex {
    pub fn new(axis: Axis, children: Vec<WidgetRef>) -> Self {
        Self {
            spec: FlexSpec {
                axis,
                ..FlexSpec::default()
            },
            children,
        }
    }

    pub fn arrangement(mut self, arrangement: LinearArrangement) -> Self {
        self.spec.arrangement = arrangement;
        self
    }

    pub fn cross_axis_alignment(mut self, alignment: CrossAxisAlignment) -> Self {
        self.spec.cross_axis_alignment = alignment;
        self
    }

    pub fn main_axis_size(mut self, size: MainAxisSize) -> Self {
        self.spec.main_axis_size = size;
        self
    }
}

impl Widget for Flex {
    fn build(&self, _cx: &BuildContext) -> Vec<WidgetRef> {
        self.children.clone()
    }

    fn layout(&self) -> Option<LayoutKind> {
        Some(LayoutKind::Flex(self.spec))
    }
}

#[allow(non_snake_case)]
pub fn Row(children: Vec<WidgetRef>) -> Flex {
    Flex::new(Axis::Horizontal, children)
}

#[allow(non_snake_case)]
pub fn Column(children: Vec<WidgetRef>) -> Flex {
    Flex::new(Axis::Vertical, children)
}

/// Marks its child as taking a weighted share of a parent [`Flex`].
///
/// Outside a flex it behaves like a proxy.
#[derive(Clone, Debug)]
pub struct Flexible {
    pub data: FlexParentData,
    pub child: Option<WidgetRef>,
}

impl Flexible {
    pub fn new(flex: u32, child: impl Into<WidgetRef>) -> Self {
        Self {
            data: FlexParentData {
                flex,
                fit: FlexFit::Tight,
            },
            child: Some(child.into()),
        }
    }

    pub fn fit(mut self, fit: FlexFit) -> Self {
        self.data.fit = fit;
        self
    }
}

impl Widget for Flexible {
    fn build(&self, _cx: &BuildContext) -> Vec<WidgetRef> {
        child_list(&self.child)
    }

    fn layout(&self) -> Option<LayoutKind> {
        Some(LayoutKind::Flexible(self.data))
    }
}

/// A [`Flexible`] with weight 1 that fills its share.
#[allow(non_snake_case)]
pub fn Expanded(child: impl Into<WidgetRef>) -> Flexible {
    Flexible::new(1, child)
}
