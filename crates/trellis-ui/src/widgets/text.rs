use crate::layout::{LayoutKind, TextSpec};
use crate::Widget;
use std::rc::Rc;
use trellis_ui_graphics::TextStyle;

/// A run of styled text, measured through the tree's text cache.
#[derive(Clone, Debug)]
pub struct Text {
    pub text: Rc<str>,
    pub style: TextStyle,
    pub max_lines: Option<u32>,
}

impl Text {
    pub fn new(text: impl Into<Rc<str>>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
            max_lines: None,
        }
    }

    pub fn style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub fn max_lines(mut self, lines: u32) -> Self {
        self.max_lines = Some(lines);
        self
    }
}

impl Widget for Text {
    fn layout(&self) -> Option<LayoutKind> {
        Some(LayoutKind::Text(TextSpec {
            text: self.text.clone(),
            style: self.style.clone(),
            max_lines: self.max_lines,
        }))
    }
}
