//! On-screen touch controls
//!
//! A small set of virtual buttons (a D-pad and an action button) that are drawn over the game
//! window. Touch and mouse input on the buttons is converted into synthesized keyboard events, so
//! the game can be played on devices without a physical keyboard.
//!
//! The crate is split into two halves:
//!
//! - [`TouchControls`] owns the buttons and turns pointer input into [`KeyboardInput`] events.
//!   It has no graphics dependencies and can be driven entirely from tests.
//! - [`OverlayRenderer`] draws the current button state through a [`RenderBackend`]. Rendering
//!   resources are created on the first draw.
//!
//! ```
//! use game_input::touch::{TouchId, TouchInput, TouchPhase};
//! use game_touch_controls::{OverlayConfig, TouchControls};
//! use glam::{UVec2, Vec2};
//!
//! let mut controls = TouchControls::new(OverlayConfig::default());
//! controls.initialize(UVec2::new(800, 600)).unwrap();
//!
//! let mut events = Vec::new();
//! controls.handle_touch(
//!     &TouchInput {
//!         id: TouchId(0),
//!         phase: TouchPhase::Started,
//!         position: Vec2::new(0.1, 0.8),
//!     },
//!     &mut events,
//! );
//! assert_eq!(events.len(), 1);
//! ```
//!
//! [`KeyboardInput`]: game_input::keyboard::KeyboardInput

pub mod button;
pub mod config;
pub mod render;
pub mod shared;
pub mod sink;

mod controls;

pub use button::{point_in_button, Bounds, Button, ButtonId, LayoutError, Rect};
pub use config::{ButtonConfig, Color, ConfigError, OverlayConfig, ReleasePolicy, Style};
pub use controls::TouchControls;
pub use render::{ImageBackend, OverlayRenderer, RenderBackend, RenderError, RenderState, Vertex};
pub use shared::SharedTouchControls;
pub use sink::KeySink;

/// The maximum number of buttons in a single overlay.
pub const MAX_BUTTONS: usize = 16;
