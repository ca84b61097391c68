use trellis_core::MutableState;

/// Reactive scroll position of a virtualized list, in pixels along its scroll axis.
///
/// Clones share the same position. Two states are equal only if they are clones.
#[derive(Clone, Debug)]
pub struct ScrollState {
    offset: MutableState<f32>,
}

impl ScrollState {
    pub fn new(initial_offset: f32) -> Self {
        Self {
            offset: MutableState::new(initial_offset),
        }
    }

    /// Tracked read of the current offset.
    pub fn offset(&self) -> f32 {
        self.offset.get()
    }

    pub fn offset_untracked(&self) -> f32 {
        self.offset.get_untracked()
    }

    pub fn scroll_to(&self, offset: f32) {
        self.offset.set_if_changed(offset);
    }

    pub fn scroll_by(&self, delta: f32) {
        let offset = self.offset_untracked() + delta;
        self.scroll_to(offset);
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl PartialEq for ScrollState {
    fn eq(&self, other: &Self) -> bool {
        self.offset.ptr_eq(&other.offset)
    }
}
