//! Emulator for input devices
//!
//! Mostly useful for testing.

mod keyboard;
mod mouse;
mod touch;

pub use keyboard::KeyboardEmulator;
pub use mouse::{MouseEmulator, MouseEvent};
pub use touch::TouchEmulator;
