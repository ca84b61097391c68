use crate::{BuildContext, Widget, WidgetRef};
use std::fmt;
use std::rc::Rc;

type BuildFn = Rc<dyn Fn(&BuildContext) -> Vec<WidgetRef>>;
type HookFn = Rc<dyn Fn(&BuildContext)>;

/// Composition step backed by a closure.
///
/// Reactive state read inside the closure reruns it when it changes. A
/// builder has no layout of its own.
#[derive(Clone)]
pub struct Builder {
    name: &'static str,
    build: BuildFn,
    on_init: Option<HookFn>,
    on_dispose: Option<HookFn>,
}

impl Builder {
    pub fn new(build: impl Fn(&BuildContext) -> Vec<WidgetRef> + 'static) -> Self {
        Self {
            name: "Builder",
            build: Rc::new(build),
            on_init: None,
            on_dispose: None,
        }
    }

    /// Builder with a single child.
    pub fn single(build: impl Fn(&BuildContext) -> WidgetRef + 'static) -> Self {
        Self::new(move |cx| vec![build(cx)])
    }

    /// Label shown in debug output.
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn on_init(mut self, hook: impl Fn(&BuildContext) + 'static) -> Self {
        self.on_init = Some(Rc::new(hook));
        self
    }

    pub fn on_dispose(mut self, hook: impl Fn(&BuildContext) + 'static) -> Self {
        self.on_dispose = Some(Rc::new(hook));
        self
    }
}

impl Widget for Builder {
    fn build(&self, cx: &BuildContext) -> Vec<WidgetRef> {
        (self.build)(cx)
    }

    fn init_state(&self, cx: &BuildContext) {
        if let Some(hook) = &self.on_init {
            hook(cx);
        }
    }

    fn dispose(&self, cx: &BuildContext) {
        if let Some(hook) = &self.on_dispose {
            hook(cx);
        }
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder").field("name", &self.name).finish()
    }
}
