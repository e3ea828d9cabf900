use std::collections::VecDeque;

use crate::keyboard::{KeyCode, KeyboardInput};
use crate::ButtonState;

/// An emulator for a keyboard device.
///
/// Events are queued in the order they were produced and can be consumed with
/// [`pop`](Self::pop), the same way a host event queue would be drained.
#[derive(Clone, Debug, Default)]
pub struct KeyboardEmulator {
    queue: VecDeque<KeyboardInput>,
}

impl KeyboardEmulator {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn press(&mut self, key_code: KeyCode) {
        self.push(KeyboardInput::new(key_code, ButtonState::Pressed));
    }

    pub fn release(&mut self, key_code: KeyCode) {
        self.push(KeyboardInput::new(key_code, ButtonState::Released));
    }

    pub fn push(&mut self, event: KeyboardInput) {
        self.queue.push_back(event);
    }

    pub fn pop(&mut self) -> Option<KeyboardInput> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
