//! Typography data structures (font styles, weights, text styles)

use std::hash::{Hash, Hasher};

/// Font style (normal, italic, oblique)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// Font weight (100-900)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const THIN: FontWeight = FontWeight(100);
    pub const LIGHT: FontWeight = FontWeight(300);
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const MEDIUM: FontWeight = FontWeight(500);
    pub const BOLD: FontWeight = FontWeight(700);
    pub const BLACK: FontWeight = FontWeight(900);
}

impl Default for FontWeight {
    fn default() -> Self {
        FontWeight::NORMAL
    }
}

/// Font attributes handed to the text measurer.
///
/// Equality and hashing compare float fields bit-for-bit so a style can be
/// part of a measurement cache key.
#[derive(Clone, Debug)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    /// Height of a single line. Defaults to `font_size * 1.25` when unset.
    pub line_height: Option<f32>,
    /// Extra space inserted between consecutive lines.
    pub line_spacing: f32,
}

impl TextStyle {
    pub const DEFAULT_FONT_SIZE: f32 = 16.0;

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = Some(line_height);
        self
    }

    pub fn with_line_spacing(mut self, line_spacing: f32) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// Resolved height of one line of text in pixels.
    pub fn resolved_line_height(&self) -> f32 {
        self.line_height.unwrap_or(self.font_size * 1.25)
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: Self::DEFAULT_FONT_SIZE,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
            line_height: None,
            line_spacing: 0.0,
        }
    }
}

impl PartialEq for TextStyle {
    fn eq(&self, other: &Self) -> bool {
        self.font_family == other.font_family
            && self.font_size.to_bits() == other.font_size.to_bits()
            && self.font_weight == other.font_weight
            && self.font_style == other.font_style
            && self.line_height.map(f32::to_bits) == other.line_height.map(f32::to_bits)
            && self.line_spacing.to_bits() == other.line_spacing.to_bits()
    }
}

impl Eq for TextStyle {}

impl Hash for TextStyle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.font_family.hash(state);
        self.font_size.to_bits().hash(state);
        self.font_weight.hash(state);
        self.font_style.hash(state);
        self.line_height.map(f32::to_bits).hash(state);
        self.line_spacing.to_bits().hash(state);
    }
}
