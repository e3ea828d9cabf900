//! A thread-safe handle to [`TouchControls`].
//!
//! Input usually arrives on the window thread while the overlay is drawn on the render thread.
//! [`SharedTouchControls`] serializes access to a single [`TouchControls`] so that both threads
//! always observe a consistent set of pressed buttons.

use std::sync::Arc;

use game_input::mouse::{CursorMoved, MouseButtonInput};
use game_input::touch::TouchInput;
use glam::UVec2;
use parking_lot::{Mutex, MutexGuard};

use crate::button::LayoutError;
use crate::config::OverlayConfig;
use crate::controls::TouchControls;
use crate::sink::KeySink;

#[derive(Clone, Debug, Default)]
pub struct SharedTouchControls {
    inner: Arc<Mutex<TouchControls>>,
}

impl SharedTouchControls {
    pub fn new(config: OverlayConfig) -> Self {
        Self::from(TouchControls::new(config))
    }

    pub fn initialize(&self, window_size: UVec2) -> Result<(), LayoutError> {
        self.inner.lock().initialize(window_size)
    }

    pub fn on_window_resized(&self, window_size: UVec2) {
        self.inner.lock().on_window_resized(window_size);
    }

    pub fn handle_touch<S>(&self, event: &TouchInput, sink: &mut S)
    where
        S: KeySink + ?Sized,
    {
        self.inner.lock().handle_touch(event, sink);
    }

    pub fn handle_mouse_button<S>(&self, event: &MouseButtonInput, sink: &mut S)
    where
        S: KeySink + ?Sized,
    {
        self.inner.lock().handle_mouse_button(event, sink);
    }

    pub fn handle_cursor_moved<S>(&self, event: &CursorMoved, sink: &mut S)
    where
        S: KeySink + ?Sized,
    {
        self.inner.lock().handle_cursor_moved(event, sink);
    }

    pub fn release_all<S>(&self, sink: &mut S)
    where
        S: KeySink + ?Sized,
    {
        self.inner.lock().release_all(sink);
    }

    /// Locks the controls for reading the button state, e.g. to render the overlay.
    ///
    /// Input handling on other threads blocks while the returned guard is alive.
    #[inline]
    pub fn lock(&self) -> MutexGuard<'_, TouchControls> {
        self.inner.lock()
    }
}

impl From<TouchControls> for SharedTouchControls {
    #[inline]
    fn from(controls: TouchControls) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controls)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::thread;

    use game_input::keyboard::KeyCode;
    use game_input::touch::{TouchId, TouchInput, TouchPhase};
    use game_input::ButtonState;
    use glam::{UVec2, Vec2};

    use super::SharedTouchControls;
    use crate::config::OverlayConfig;

    #[test]
    fn input_from_other_thread() {
        let controls = SharedTouchControls::new(OverlayConfig::default());
        controls.initialize(UVec2::new(800, 600)).unwrap();

        let (mut tx, rx) = mpsc::channel();

        let handle = thread::spawn({
            let controls = controls.clone();
            move || {
                controls.handle_touch(
                    &TouchInput {
                        id: TouchId(0),
                        phase: TouchPhase::Started,
                        position: Vec2::new(0.85, 0.8),
                    },
                    &mut tx,
                );
            }
        });
        handle.join().unwrap();

        assert!(controls.lock().is_pressed(KeyCode::Return));

        let event = rx.try_recv().unwrap();
        assert_eq!(event.key_code, Some(KeyCode::Return));
        assert_eq!(event.state, ButtonState::Pressed);
    }

    #[test]
    fn release_all_through_handle() {
        let controls = SharedTouchControls::new(OverlayConfig::default());
        controls.initialize(UVec2::new(800, 600)).unwrap();

        let mut events = Vec::new();
        controls.handle_touch(
            &TouchInput {
                id: TouchId(0),
                phase: TouchPhase::Started,
                position: Vec2::new(0.1, 0.8),
            },
            &mut events,
        );
        controls.release_all(&mut events);

        assert_eq!(events.len(), 2);
        assert_eq!(events[1].state, ButtonState::Released);
        assert_eq!(controls.lock().pressed_keys().count(), 0);
    }
}
