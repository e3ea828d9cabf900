use std::collections::VecDeque;

use glam::Vec2;

use crate::mouse::{CursorMoved, MouseButton, MouseButtonInput};
use crate::ButtonState;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MouseEvent {
    Button(MouseButtonInput),
    CursorMoved(CursorMoved),
}

/// An emulator for a mouse device.
///
/// The emulator remembers the last cursor position so button events are reported where the
/// cursor currently is.
#[derive(Clone, Debug)]
pub struct MouseEmulator {
    events: VecDeque<MouseEvent>,
    position: Vec2,
}

impl MouseEmulator {
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
            position: Vec2::ZERO,
        }
    }

    pub fn press(&mut self, button: MouseButton) {
        self.events.push_back(MouseEvent::Button(MouseButtonInput {
            button,
            state: ButtonState::Pressed,
            position: self.position,
        }));
    }

    pub fn release(&mut self, button: MouseButton) {
        self.events.push_back(MouseEvent::Button(MouseButtonInput {
            button,
            state: ButtonState::Released,
            position: self.position,
        }));
    }

    /// Moves the cursor to `position` in window pixels.
    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
        self.events
            .push_back(MouseEvent::CursorMoved(CursorMoved { position }));
    }

    /// Moves the cursor to `position` and clicks `button` there.
    pub fn click(&mut self, button: MouseButton, position: Vec2) {
        self.move_to(position);
        self.press(button);
        self.release(button);
    }

    pub fn pop(&mut self) -> Option<MouseEvent> {
        self.events.pop_front()
    }
}

impl Default for MouseEmulator {
    fn default() -> Self {
        Self::new()
    }
}
