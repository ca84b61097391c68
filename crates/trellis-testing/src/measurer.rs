use std::cell::Cell;
use std::rc::Rc;
use trellis_ui::{MonospacedTextMeasurer, TextMeasurer};
use trellis_ui_graphics::{Size, TextStyle};

/// Monospaced measurer that counts how often it is asked to measure.
///
/// Clones share the counter, so a test can keep one clone and hand the other
/// to a [`TreeConfig`](trellis_ui::TreeConfig).
#[derive(Clone, Debug, Default)]
pub struct CountingMeasurer {
    calls: Rc<Cell<usize>>,
}

impl CountingMeasurer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn reset(&self) {
        self.calls.set(0);
    }
}

impl TextMeasurer for CountingMeasurer {
    fn measure(&self, text: &str, style: &TextStyle, max_width: f32, max_height: f32) -> Size {
        self.calls.set(self.calls.get() + 1);
        MonospacedTextMeasurer.measure(text, style, max_width, max_height)
    }
}
