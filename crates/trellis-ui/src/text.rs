//! Text measurement and the per-tree measurement cache.

use std::rc::Rc;
use trellis_core::collections::map::HashMap;
use trellis_ui_graphics::{Size, TextStyle};

/// Measures a run of text inside a bounding box.
///
/// Implementations may ignore `max_height`; line-count truncation is applied
/// by the text layout node, not by the measurer.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle, max_width: f32, max_height: f32) -> Size;
}

/// Measurer with a fixed advance per character that wraps by character.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonospacedTextMeasurer;

impl MonospacedTextMeasurer {
    /// Character advance as a fraction of the font size.
    pub const ADVANCE_FACTOR: f32 = 0.5;

    pub fn advance(style: &TextStyle) -> f32 {
        style.font_size * Self::ADVANCE_FACTOR
    }
}

impl TextMeasurer for MonospacedTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle, max_width: f32, _max_height: f32) -> Size {
        let advance = Self::advance(style);
        let per_line = if max_width.is_finite() && advance > 0.0 {
            Some(((max_width / advance).floor() as usize).max(1))
        } else {
            None
        };

        let mut lines = 0usize;
        let mut width = 0.0f32;
        for paragraph in text.split('\n') {
            let count = paragraph.chars().count();
            match per_line {
                Some(per_line) if count > per_line => {
                    lines += count.div_ceil(per_line);
                    width = width.max(per_line as f32 * advance);
                }
                _ => {
                    lines += 1;
                    width = width.max(count as f32 * advance);
                }
            }
        }

        Size::new(width, block_height(style, lines))
    }
}

/// Height of `lines` lines of `style`, including the spacing between them.
pub fn block_height(style: &TextStyle, lines: usize) -> f32 {
    if lines == 0 {
        return 0.0;
    }
    let lines = lines as f32;
    lines * style.resolved_line_height() + (lines - 1.0) * style.line_spacing
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct TextCacheKey {
    text: Rc<str>,
    max_width: u32,
    max_height: u32,
    style: TextStyle,
}

/// Hit, miss and eviction counters of a [`TextLayoutCache`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entries: usize,
}

/// Memoizes measurer results by text, bounding box and style.
///
/// When full, the cache is cleared before the next insertion.
#[derive(Debug)]
pub struct TextLayoutCache {
    capacity: usize,
    entries: HashMap<TextCacheKey, Size>,
    stats: TextCacheStats,
}

impl TextLayoutCache {
    pub const DEFAULT_CAPACITY: usize = 512;

    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::default(),
            stats: TextCacheStats::default(),
        }
    }

    pub fn measure(
        &mut self,
        measurer: &dyn TextMeasurer,
        text: &Rc<str>,
        style: &TextStyle,
        max_width: f32,
        max_height: f32,
    ) -> Size {
        let key = TextCacheKey {
            text: Rc::clone(text),
            max_width: max_width.to_bits(),
            max_height: max_height.to_bits(),
            style: style.clone(),
        };
        if let Some(size) = self.entries.get(&key) {
            self.stats.hits += 1;
            return *size;
        }

        self.stats.misses += 1;
        let size = measurer.measure(text, style, max_width, max_height);
        if self.entries.len() >= self.capacity {
            log::debug!("text cache full at {} entries; clearing", self.entries.len());
            self.stats.evictions += self.entries.len() as u64;
            self.entries.clear();
        }
        self.entries.insert(key, size);
        size
    }

    pub fn stats(&self) -> TextCacheStats {
        TextCacheStats {
            entries: self.entries.len(),
            ..self.stats
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for TextLayoutCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
#[path = "tests/text_tests.rs"]
mod tests;
