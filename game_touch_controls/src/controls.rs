use game_input::keyboard::{KeyCode, KeyboardInput};
use game_input::mouse::{CursorMoved, MouseButtonInput};
use game_input::touch::{TouchInput, TouchPhase};
use game_input::ButtonState;
use game_tracing::trace_span;
use glam::{UVec2, Vec2};

use crate::button::{build_layout, Button, ButtonId, LayoutError};
use crate::config::{OverlayConfig, ReleasePolicy};
use crate::sink::KeySink;

/// The window size assumed before the first call to [`TouchControls::initialize`].
const DEFAULT_WINDOW_SIZE: UVec2 = UVec2::new(800, 600);

/// The touch overlay controller.
///
/// `TouchControls` owns the buttons of the overlay and converts pointer input into synthesized
/// key events. Touches are not tracked individually: every event is tested against every
/// button, so multiple fingers can hold multiple buttons at the same time.
///
/// The buttons only exist after [`initialize`] was called.
///
/// [`initialize`]: Self::initialize
#[derive(Clone, Debug)]
pub struct TouchControls {
    config: OverlayConfig,
    buttons: Vec<Button>,
    window_size: UVec2,
    /// Is any mouse button currently held down?
    mouse_held: bool,
}

impl TouchControls {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            buttons: Vec::new(),
            window_size: DEFAULT_WINDOW_SIZE,
            mouse_held: false,
        }
    }

    /// Builds the buttons from the configured layout and records the window size.
    ///
    /// Any previous state is dropped, calling `initialize` again resets the overlay. Note that
    /// held buttons are released without emitting key-up events. Call [`release_all`] first if
    /// the consumer needs to see them.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout has more than [`MAX_BUTTONS`] entries or contains bounds
    /// outside of the window. The overlay has no buttons in that case.
    ///
    /// [`release_all`]: Self::release_all
    /// [`MAX_BUTTONS`]: crate::MAX_BUTTONS
    pub fn initialize(&mut self, window_size: UVec2) -> Result<(), LayoutError> {
        self.buttons.clear();
        self.mouse_held = false;
        self.window_size = window_size;

        match build_layout(&self.config.buttons) {
            Ok(buttons) => {
                tracing::debug!(
                    "initialized {} touch buttons for {}x{} window",
                    buttons.len(),
                    window_size.x,
                    window_size.y,
                );

                self.buttons = buttons;
                Ok(())
            }
            Err(err) => {
                tracing::warn!("rejected touch button layout: {}", err);
                Err(err)
            }
        }
    }

    /// Updates the window size used to map between pixels and normalized coordinates.
    pub fn on_window_resized(&mut self, window_size: UVec2) {
        tracing::debug!("touch overlay resized to {}x{}", window_size.x, window_size.y);
        self.window_size = window_size;
    }

    /// Handles a touch event with a normalized position.
    pub fn handle_touch<S>(&mut self, event: &TouchInput, sink: &mut S)
    where
        S: KeySink + ?Sized,
    {
        let _span = trace_span!("TouchControls::handle_touch").entered();

        match event.phase {
            TouchPhase::Started => self.begin(event.position, sink),
            TouchPhase::Moved => self.moved(event.position, sink),
            TouchPhase::Ended => self.end(event.position, self.config.touch_release, sink),
        }
    }

    /// Handles a mouse button event with a position in window pixels.
    ///
    /// This is the fallback for platforms that report touches as mouse input. Every mouse button
    /// is treated the same.
    pub fn handle_mouse_button<S>(&mut self, event: &MouseButtonInput, sink: &mut S)
    where
        S: KeySink + ?Sized,
    {
        let _span = trace_span!("TouchControls::handle_mouse_button").entered();

        let point = self.to_normalized(event.position);

        match event.state {
            ButtonState::Pressed => {
                self.mouse_held = true;

                if let Some(point) = point {
                    self.begin(point, sink);
                }
            }
            ButtonState::Released => {
                self.mouse_held = false;

                match (self.config.mouse_release, point) {
                    (ReleasePolicy::All, _) => self.release_all(sink),
                    (ReleasePolicy::HitTest, Some(point)) => {
                        self.end(point, ReleasePolicy::HitTest, sink)
                    }
                    (ReleasePolicy::HitTest, None) => (),
                }
            }
        }
    }

    /// Handles cursor motion with a position in window pixels.
    ///
    /// Motion is only relevant while a mouse button is held, dragging the cursor off a pressed
    /// button releases it.
    pub fn handle_cursor_moved<S>(&mut self, event: &CursorMoved, sink: &mut S)
    where
        S: KeySink + ?Sized,
    {
        let _span = trace_span!("TouchControls::handle_cursor_moved").entered();

        if !self.mouse_held {
            return;
        }

        if let Some(point) = self.to_normalized(event.position) {
            self.moved(point, sink);
        }
    }

    /// Releases every pressed button, emitting a key-up for each of them.
    ///
    /// Useful when the window loses focus while buttons are held.
    pub fn release_all<S>(&mut self, sink: &mut S)
    where
        S: KeySink + ?Sized,
    {
        for button in self.buttons.iter_mut().filter(|button| button.pressed) {
            button.pressed = false;
            emit(sink, button.key, ButtonState::Released);
        }
    }

    #[inline]
    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    #[inline]
    pub fn button(&self, id: ButtonId) -> Option<&Button> {
        self.buttons.get(id.0)
    }

    /// Returns `true` if any button bound to `key` is pressed.
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.buttons
            .iter()
            .any(|button| button.key == key && button.pressed)
    }

    /// Returns the keys of all pressed buttons in layout order.
    pub fn pressed_keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.buttons
            .iter()
            .filter(|button| button.pressed)
            .map(|button| button.key)
    }

    #[inline]
    pub fn window_size(&self) -> UVec2 {
        self.window_size
    }

    #[inline]
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    fn begin<S>(&mut self, point: Vec2, sink: &mut S)
    where
        S: KeySink + ?Sized,
    {
        for button in &mut self.buttons {
            if !button.pressed && button.bounds.contains(point) {
                button.pressed = true;
                emit(sink, button.key, ButtonState::Pressed);
            }
        }
    }

    fn end<S>(&mut self, point: Vec2, policy: ReleasePolicy, sink: &mut S)
    where
        S: KeySink + ?Sized,
    {
        match policy {
            ReleasePolicy::All => self.release_all(sink),
            ReleasePolicy::HitTest => {
                for button in &mut self.buttons {
                    if button.pressed && button.bounds.contains(point) {
                        button.pressed = false;
                        emit(sink, button.key, ButtonState::Released);
                    }
                }
            }
        }
    }

    fn moved<S>(&mut self, point: Vec2, sink: &mut S)
    where
        S: KeySink + ?Sized,
    {
        for button in &mut self.buttons {
            if button.pressed && !button.bounds.contains(point) {
                button.pressed = false;
                emit(sink, button.key, ButtonState::Released);
            }
        }
    }

    /// Converts a position in window pixels to normalized coordinates. Returns `None` if the
    /// window has no area.
    fn to_normalized(&self, position: Vec2) -> Option<Vec2> {
        if self.window_size.x == 0 || self.window_size.y == 0 {
            tracing::debug!("dropping pointer event for zero-sized window");
            return None;
        }

        Some(position / self.window_size.as_vec2())
    }
}

impl Default for TouchControls {
    #[inline]
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}

fn emit<S>(sink: &mut S, key: KeyCode, state: ButtonState)
where
    S: KeySink + ?Sized,
{
    tracing::trace!("synthesized {:?} {:?}", key, state);
    sink.send(KeyboardInput::new(key, state));
}
