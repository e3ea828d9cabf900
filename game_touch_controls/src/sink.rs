//! Destinations for synthesized key events.

use std::collections::VecDeque;
use std::sync::mpsc;

use game_input::emulator::KeyboardEmulator;
use game_input::keyboard::KeyboardInput;

/// A queue that accepts synthesized [`KeyboardInput`] events.
///
/// Sending never blocks and never fails. A sink that cannot accept an event drops it.
pub trait KeySink {
    fn send(&mut self, event: KeyboardInput);
}

impl KeySink for Vec<KeyboardInput> {
    #[inline]
    fn send(&mut self, event: KeyboardInput) {
        self.push(event);
    }
}

impl KeySink for VecDeque<KeyboardInput> {
    #[inline]
    fn send(&mut self, event: KeyboardInput) {
        self.push_back(event);
    }
}

impl KeySink for mpsc::Sender<KeyboardInput> {
    #[inline]
    fn send(&mut self, event: KeyboardInput) {
        // The receiver is gone, nobody is interested in the event anymore.
        let _ = mpsc::Sender::send(self, event);
    }
}

impl KeySink for KeyboardEmulator {
    #[inline]
    fn send(&mut self, event: KeyboardInput) {
        self.push(event);
    }
}

impl<S> KeySink for &mut S
where
    S: KeySink + ?Sized,
{
    #[inline]
    fn send(&mut self, event: KeyboardInput) {
        (**self).send(event);
    }
}
