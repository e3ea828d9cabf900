use glam::Vec2;

use crate::ButtonState;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MouseButtonInput {
    pub button: MouseButton,
    pub state: ButtonState,
    /// The cursor position in window pixels at the time of the event.
    pub position: Vec2,
}

/// A event fired when the cursor moved inside a window.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CursorMoved {
    /// The new cursor position in window pixels.
    pub position: Vec2,
}
