/// Lifecycle of a state node.
///
/// `Constructed -> Mounted -> Active -> Disposed`. Updates happen while
/// `Mounted` (the first one) and `Active` (every later one).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Constructed,
    Mounted,
    Active,
    Disposed,
}

impl Lifecycle {
    pub fn is_live(self) -> bool {
        matches!(self, Lifecycle::Mounted | Lifecycle::Active)
    }

    pub fn is_disposed(self) -> bool {
        matches!(self, Lifecycle::Disposed)
    }
}
