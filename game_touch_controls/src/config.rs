use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use game_input::keyboard::KeyCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::button::Bounds;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(io::Error),
    #[error(transparent)]
    Toml(toml::de::Error),
}

/// The configuration of a [`TouchControls`] overlay.
///
/// The default configuration is a D-pad in the bottom-left corner and a `Return` button in the
/// bottom-right corner.
///
/// [`TouchControls`]: crate::TouchControls
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    /// The buttons of the overlay, in order.
    pub buttons: Vec<ButtonConfig>,
    /// Which buttons are released when a finger is lifted.
    ///
    /// Defaults to [`ReleasePolicy::HitTest`].
    pub touch_release: ReleasePolicy,
    /// Which buttons are released when a mouse button is released.
    ///
    /// Defaults to [`ReleasePolicy::All`].
    pub mouse_release: ReleasePolicy,
    pub style: Style,
}

impl OverlayConfig {
    pub fn from_file<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let mut file = File::open(path).map_err(ConfigError::Io)?;

        let mut buf = String::new();
        file.read_to_string(&mut buf).map_err(ConfigError::Io)?;

        buf.parse()
    }
}

impl FromStr for OverlayConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            buttons: vec![
                ButtonConfig::new(Bounds::new(0.05, 0.75, 0.12, 0.18), KeyCode::Left),
                ButtonConfig::new(Bounds::new(0.22, 0.75, 0.12, 0.18), KeyCode::Down),
                ButtonConfig::new(Bounds::new(0.22, 0.55, 0.12, 0.18), KeyCode::Up),
                ButtonConfig::new(Bounds::new(0.39, 0.75, 0.12, 0.18), KeyCode::Right),
                ButtonConfig::new(Bounds::new(0.80, 0.75, 0.15, 0.18), KeyCode::Return),
            ],
            touch_release: ReleasePolicy::HitTest,
            mouse_release: ReleasePolicy::All,
            style: Style::default(),
        }
    }
}

/// A single entry in the button layout table.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ButtonConfig {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub key: KeyCode,
}

impl ButtonConfig {
    #[inline]
    pub const fn new(bounds: Bounds, key: KeyCode) -> Self {
        Self {
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            key,
        }
    }

    #[inline]
    pub const fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }
}

/// The rule deciding which pressed buttons are released when a pointer is lifted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReleasePolicy {
    /// Release only the pressed buttons that contain the lift-off point.
    #[default]
    HitTest,
    /// Release every pressed button, wherever the pointer was lifted.
    All,
}

/// A linear RGBA color with components in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);
    pub const BLACK: Self = Self([0.0, 0.0, 0.0, 1.0]);

    #[inline]
    pub const fn as_rgba(self) -> [f32; 4] {
        self.0
    }

    /// Converts the color to 8-bit channels, clamping out-of-range components.
    pub fn to_rgba8(self) -> [u8; 4] {
        self.0.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Style {
    /// The fill color of a pressed button.
    pub pressed: Color,
    /// The fill color of a released button.
    pub released: Color,
    /// Draw an outline around every button?
    ///
    /// Defaults to `true`.
    pub outline: bool,
    pub outline_color: Color,
}

impl Style {
    #[inline]
    pub fn fill(&self, pressed: bool) -> Color {
        if pressed {
            self.pressed
        } else {
            self.released
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            pressed: Color([0.2, 0.6, 0.2, 0.7]),
            released: Color([0.1, 0.1, 0.1, 0.4]),
            outline: true,
            outline_color: Color([1.0, 1.0, 1.0, 0.6]),
        }
    }
}
