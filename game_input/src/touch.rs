use glam::Vec2;

/// Identifier of a finger as reported by the touch device.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TouchId(pub u64);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// A finger touched the surface.
    Started,
    /// A finger moved while touching the surface.
    Moved,
    /// A finger was lifted from the surface.
    Ended,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchInput {
    pub id: TouchId,
    pub phase: TouchPhase,
    /// The position of the finger, normalized to `[0, 1]` relative to the window. The origin is
    /// the top-left corner.
    pub position: Vec2,
}
