use std::collections::VecDeque;

use glam::Vec2;

use crate::touch::{TouchId, TouchInput, TouchPhase};

/// An emulator for a touch screen.
///
/// Every [`begin`](Self::begin) puts down a new finger. [`move_to`](Self::move_to) and
/// [`end`](Self::end) act on the most recent finger.
#[derive(Clone, Debug, Default)]
pub struct TouchEmulator {
    events: VecDeque<TouchInput>,
    next_id: u64,
}

impl TouchEmulator {
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
            next_id: 0,
        }
    }

    pub fn begin(&mut self, position: Vec2) -> TouchId {
        let id = TouchId(self.next_id);
        self.next_id += 1;

        self.push(id, TouchPhase::Started, position);
        id
    }

    pub fn move_to(&mut self, position: Vec2) {
        self.push(self.current(), TouchPhase::Moved, position);
    }

    pub fn end(&mut self, position: Vec2) {
        self.push(self.current(), TouchPhase::Ended, position);
    }

    /// Touches and lifts a finger at the same `position`.
    pub fn tap(&mut self, position: Vec2) {
        self.begin(position);
        self.end(position);
    }

    /// Touches at `from`, slides to `to` and lifts the finger at `to`.
    pub fn drag(&mut self, from: Vec2, to: Vec2) {
        self.begin(from);
        self.move_to(to);
        self.end(to);
    }

    pub fn pop(&mut self) -> Option<TouchInput> {
        self.events.pop_front()
    }

    fn current(&self) -> TouchId {
        TouchId(self.next_id.saturating_sub(1))
    }

    fn push(&mut self, id: TouchId, phase: TouchPhase, position: Vec2) {
        self.events.push_back(TouchInput {
            id,
            phase,
            position,
        });
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::TouchEmulator;
    use crate::touch::{TouchId, TouchPhase};

    #[test]
    fn touch_emulator_drag() {
        let mut emulator = TouchEmulator::new();
        emulator.drag(Vec2::new(0.1, 0.1), Vec2::new(0.9, 0.9));

        let phases: Vec<_> = std::iter::from_fn(|| emulator.pop())
            .map(|event| (event.id, event.phase))
            .collect();

        assert_eq!(
            phases,
            [
                (TouchId(0), TouchPhase::Started),
                (TouchId(0), TouchPhase::Moved),
                (TouchId(0), TouchPhase::Ended),
            ]
        );
    }

    #[test]
    fn touch_emulator_new_finger_per_begin() {
        let mut emulator = TouchEmulator::new();
        let first = emulator.begin(Vec2::ZERO);
        let second = emulator.begin(Vec2::ONE);

        assert_ne!(first, second);
    }
}
