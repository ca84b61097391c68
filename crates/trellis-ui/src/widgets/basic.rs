use super::child_list;
use crate::layout::{AlignSpec, ContainerSpec, LayoutKind};
use crate::{BuildContext, Widget, WidgetRef};
use trellis_ui_graphics::EdgeInsets;
use trellis_ui_layout::{Alignment, Constraints, IntrinsicAxis};

/// Passes its constraints straight to its child.
#[derive(Clone, Debug, Default)]
pub struct Proxy {
    pub child: Option<WidgetRef>,
}

impl Proxy {
    pub fn new(child: impl Into<WidgetRef>) -> Self {
        Self {
            child: Some(child.into()),
        }
    }
}

impl Widget for Proxy {
    fn build(&self, _cx: &BuildContext) -> Vec<WidgetRef> {
        child_list(&self.child)
    }

    fn layout(&self) -> Option<LayoutKind> {
        Some(LayoutKind::Proxy)
    }
}

/// Imposes an extra constraint box on its child.
#[derive(Clone, Debug)]
pub struct ConstrainedBox {
    pub constraints: Constraints,
    pub child: Option<WidgetRef>,
}

impl ConstrainedBox {
    pub fn new(constraints: Constraints) -> Self {
        Self {
            constraints,
            child: None,
        }
    }

    /// Box of exactly `width` x `height`.
    pub fn sized(width: f32, height: f32) -> Self {
        Self::new(Constraints::tight(width, height))
    }

    /// Box no larger than `max_width` x `max_height`.
    pub fn max(max_width: f32, max_height: f32) -> Self {
        Self::new(Constraints::loose(max_width, max_height))
    }

    pub fn child(mut self, child: impl Into<WidgetRef>) -> Self {
        self.child = Some(child.into());
        self
    }
}

impl Widget for ConstrainedBox {
    fn build(&self, _cx: &BuildContext) -> Vec<WidgetRef> {
        child_list(&self.child)
    }

    fn layout(&self) -> Option<LayoutKind> {
        Some(LayoutKind::ConstrainedBox(self.constraints))
    }

    fn explicit_constraints(&self) -> Option<Constraints> {
        Some(self.constraints)
    }
}

/// A [`ConstrainedBox`] with a tight size.
#[allow(non_snake_case)]
pub fn SizedBox(width: f32, height: f32) -> ConstrainedBox {
    ConstrainedBox::sized(width, height)
}

#[derive(Clone, Debug)]
pub struct Padding {
    pub padding: EdgeInsets,
    pub child: Option<WidgetRef>,
}

impl Padding {
    pub fn new(padding: EdgeInsets, child: impl Into<WidgetRef>) -> Self {
        Self {
            padding,
            child: Some(child.into()),
        }
    }
}

impl Widget for Padding {
    fn build(&self, _cx: &BuildContext) -> Vec<WidgetRef> {
        child_list(&self.child)
    }

    fn layout(&self) -> Option<LayoutKind> {
        Some(LayoutKind::Padding(self.padding))
    }
}

/// Sizes its child loosely and aligns it inside its own box.
#[derive(Clone, Debug, Default)]
pub struct Align {
    pub spec: AlignSpec,
    pub child: Option<WidgetRef>,
}

impl Align {
    pub fn new(alignment: Alignment, child: impl Into<WidgetRef>) -> Self {
        Self {
            spec: AlignSpec {
                alignment,
                ..AlignSpec::default()
            },
            child: Some(child.into()),
        }
    }

    pub fn width_factor(mut self, factor: f32) -> Self {
        self.spec.width_factor = Some(factor);
        self
    }

    pub fn height_factor(mut self, factor: f32) -> Self {
        self.spec.height_factor = Some(factor);
        self
    }
}

impl Widget for Align {
    fn build(&self, _cx: &BuildContext) -> Vec<WidgetRef> {
        child_list(&self.child)
    }

    fn layout(&self) -> Option<LayoutKind> {
        Some(LayoutKind::Align(self.spec))
    }
}

#[allow(non_snake_case)]
pub fn Center(child: impl Into<WidgetRef>) -> Align {
    Align::new(Alignment::CENTER, child)
}

/// Optional fixed width and height with an aligned child.
#[derive(Clone, Debug, Default)]
pub struct Container {
    pub spec: ContainerSpec,
    pub child: Option<WidgetRef>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: f32) -> Self {
        self.spec.width = Some(width);
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.spec.height = Some(height);
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.spec.alignment = alignment;
        self
    }

    pub fn child(mut self, child: impl Into<WidgetRef>) -> Self {
        self.child = Some(child.into());
        self
    }
}

impl Widget for Container {
    fn build(&self, _cx: &BuildContext) -> Vec<WidgetRef> {
        child_list(&self.child)
    }

    fn layout(&self) -> Option<LayoutKind> {
        Some(LayoutKind::Container(self.spec))
    }
}

/// Children drawn on top of each other, each aligned inside the stack.
#[derive(Clone, Debug, Default)]
pub struct ZStack {
    pub alignment: Alignment,
    pub children: Vec<WidgetRef>,
}

impl ZStack {
    pub fn new(children: Vec<WidgetRef>) -> Self {
        Self {
            alignment: Alignment::TOP_START,
            children,
        }
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

impl Widget for ZStack {
    fn build(&self, _cx: &BuildContext) -> Vec<WidgetRef> {
        self.children.clone()
    }

    fn layout(&self) -> Option<LayoutKind> {
        Some(LayoutKind::ZStack(self.alignment))
    }
}

/// Forces its child to its intrinsic width or height.
#[derive(Clone, Debug)]
pub struct IntrinsicSize {
    pub axis: IntrinsicAxis,
    pub child: Option<WidgetRef>,
}

impl IntrinsicSize {
    pub fn width(child: impl Into<WidgetRef>) -> Self {
        Self {
            axis: IntrinsicAxis::Width,
            child: Some(child.into()),
        }
    }

    pub fn height(child: impl Into<WidgetRef>) -> Self {
        Self {
            axis: IntrinsicAxis::Height,
            child: Some(child.into()),
        }
    }
}

impl Widget for IntrinsicSize {
    fn build(&self, _cx: &BuildContext) -> Vec<WidgetRef> {
        child_list(&self.child)
    }

    fn layout(&self) -> Option<LayoutKind> {
        Some(LayoutKind::Intrinsic(self.axis))
    }
}
