use glam::{UVec2, Vec2};
use thiserror::Error;

use game_input::keyboard::KeyCode;

use crate::config::ButtonConfig;
use crate::MAX_BUTTONS;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout exceeds the maximum of {capacity} buttons")]
    CapacityExceeded { capacity: usize },
    #[error("button {index} has bounds outside of the window")]
    InvalidBounds { index: usize },
}

/// A rectangle in normalized window coordinates.
///
/// All values are fractions of the window size, with the origin in the top-left corner and `y`
/// growing downwards.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` if the bounds lie entirely within `[0, 1]` and have no negative extent.
    pub fn is_valid(&self) -> bool {
        let unit = 0.0..=1.0;

        unit.contains(&self.x)
            && unit.contains(&self.y)
            && self.width >= 0.0
            && self.height >= 0.0
            && self.x + self.width <= 1.0 + f32::EPSILON
            && self.y + self.height <= 1.0 + f32::EPSILON
    }

    /// Returns `true` if `point` lies inside the bounds. Points on the edges are inside.
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Maps the bounds onto a window of `window_size` pixels. Fractional pixels are truncated.
    pub fn to_pixels(&self, window_size: UVec2) -> Rect {
        let size = window_size.as_vec2();

        let min = UVec2::new((self.x * size.x) as u32, (self.y * size.y) as u32);
        let extent = UVec2::new((self.width * size.x) as u32, (self.height * size.y) as u32);

        Rect {
            min,
            max: min + extent,
        }
    }
}

/// A rectangle in window pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min: UVec2,
    pub max: UVec2,
}

impl Rect {
    #[inline]
    pub fn size(self) -> UVec2 {
        self.max - self.min
    }

    #[inline]
    pub fn width(self) -> u32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> u32 {
        self.max.y - self.min.y
    }
}

/// The index of a [`Button`] in the layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ButtonId(pub usize);

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Button {
    pub(crate) id: ButtonId,
    pub(crate) bounds: Bounds,
    pub(crate) key: KeyCode,
    pub(crate) pressed: bool,
}

impl Button {
    #[inline]
    pub fn id(&self) -> ButtonId {
        self.id
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns the key that is synthesized when this button is pressed or released.
    #[inline]
    pub fn key(&self) -> KeyCode {
        self.key
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    #[inline]
    pub fn pixel_rect(&self, window_size: UVec2) -> Rect {
        self.bounds.to_pixels(window_size)
    }
}

/// Returns `true` if the normalized `point` hits `button`.
#[inline]
pub fn point_in_button(button: &Button, point: Vec2) -> bool {
    button.bounds.contains(point)
}

/// Builds the released buttons for a layout table.
///
/// Either the whole table is accepted or none of it.
pub(crate) fn build_layout(entries: &[ButtonConfig]) -> Result<Vec<Button>, LayoutError> {
    if entries.len() > MAX_BUTTONS {
        return Err(LayoutError::CapacityExceeded {
            capacity: MAX_BUTTONS,
        });
    }

    let mut buttons = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let bounds = entry.bounds();
        if !bounds.is_valid() {
            return Err(LayoutError::InvalidBounds { index });
        }

        buttons.push(Button {
            id: ButtonId(index),
            bounds,
            key: entry.key,
            pressed: false,
        });
    }

    Ok(buttons)
}

#[cfg(test)]
mod tests {
    use game_input::keyboard::KeyCode;
    use glam::{UVec2, Vec2};

    use super::{build_layout, point_in_button, Bounds, Button, ButtonId, LayoutError, Rect};
    use crate::config::ButtonConfig;
    use crate::MAX_BUTTONS;

    fn button(x: f32, y: f32, width: f32, height: f32) -> Button {
        Button {
            id: ButtonId(0),
            bounds: Bounds::new(x, y, width, height),
            key: KeyCode::Left,
            pressed: false,
        }
    }

    #[test]
    fn point_in_button_inside() {
        let button = button(0.25, 0.25, 0.5, 0.5);
        assert!(point_in_button(&button, Vec2::new(0.5, 0.5)));
    }

    #[test]
    fn point_in_button_edge() {
        let button = button(0.25, 0.25, 0.5, 0.5);

        assert!(point_in_button(&button, Vec2::new(0.25, 0.25)));
        assert!(point_in_button(&button, Vec2::new(0.75, 0.75)));
        assert!(point_in_button(&button, Vec2::new(0.25, 0.75)));
        assert!(point_in_button(&button, Vec2::new(0.75, 0.5)));
    }

    #[test]
    fn point_in_button_outside() {
        let button = button(0.25, 0.25, 0.5, 0.5);

        assert!(!point_in_button(&button, Vec2::new(0.2, 0.5)));
        assert!(!point_in_button(&button, Vec2::new(0.5, 0.76)));
        assert!(!point_in_button(&button, Vec2::new(0.8, 0.8)));
    }

    #[test]
    fn point_in_button_zero_size() {
        let button = button(0.5, 0.5, 0.0, 0.0);

        assert!(point_in_button(&button, Vec2::new(0.5, 0.5)));
        assert!(!point_in_button(&button, Vec2::new(0.5, 0.51)));
    }

    #[test]
    fn bounds_to_pixels_truncates() {
        let bounds = Bounds::new(0.05, 0.75, 0.12, 0.18);
        let rect = bounds.to_pixels(UVec2::new(800, 600));

        assert_eq!(rect.min, UVec2::new(40, 450));
        assert_eq!(rect.size(), UVec2::new(96, 108));
        assert_eq!(rect.width(), 96);
        assert_eq!(rect.height(), 108);
    }

    #[test]
    fn bounds_to_pixels_scales_with_window() {
        let bounds = Bounds::new(0.0, 0.0, 0.5, 0.5);

        assert_eq!(
            bounds.to_pixels(UVec2::new(800, 600)),
            Rect {
                min: UVec2::ZERO,
                max: UVec2::new(400, 300),
            }
        );
        assert_eq!(
            bounds.to_pixels(UVec2::new(1600, 1200)),
            Rect {
                min: UVec2::ZERO,
                max: UVec2::new(800, 600),
            }
        );
    }

    #[test]
    fn bounds_is_valid() {
        assert!(Bounds::new(0.0, 0.0, 1.0, 1.0).is_valid());
        assert!(Bounds::new(0.8, 0.75, 0.15, 0.18).is_valid());

        assert!(!Bounds::new(-0.1, 0.0, 0.5, 0.5).is_valid());
        assert!(!Bounds::new(0.0, 0.0, -0.5, 0.5).is_valid());
        assert!(!Bounds::new(0.75, 0.0, 0.5, 0.5).is_valid());
        assert!(!Bounds::new(f32::NAN, 0.0, 0.5, 0.5).is_valid());
    }

    #[test]
    fn build_layout_assigns_ids_in_order() {
        let entries = [
            ButtonConfig::new(Bounds::new(0.0, 0.0, 0.1, 0.1), KeyCode::Left),
            ButtonConfig::new(Bounds::new(0.2, 0.0, 0.1, 0.1), KeyCode::Right),
        ];

        let buttons = build_layout(&entries).unwrap();

        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[0].id(), ButtonId(0));
        assert_eq!(buttons[0].key(), KeyCode::Left);
        assert_eq!(buttons[1].id(), ButtonId(1));
        assert_eq!(buttons[1].key(), KeyCode::Right);
        assert!(buttons.iter().all(|button| !button.is_pressed()));
    }

    #[test]
    fn build_layout_capacity_exceeded() {
        let entries =
            vec![ButtonConfig::new(Bounds::new(0.0, 0.0, 0.1, 0.1), KeyCode::Space); MAX_BUTTONS + 1];

        assert_eq!(
            build_layout(&entries),
            Err(LayoutError::CapacityExceeded {
                capacity: MAX_BUTTONS
            })
        );
    }

    #[test]
    fn build_layout_at_capacity() {
        let entries =
            vec![ButtonConfig::new(Bounds::new(0.0, 0.0, 0.1, 0.1), KeyCode::Space); MAX_BUTTONS];

        assert_eq!(build_layout(&entries).unwrap().len(), MAX_BUTTONS);
    }

    #[test]
    fn build_layout_invalid_bounds() {
        let entries = [
            ButtonConfig::new(Bounds::new(0.0, 0.0, 0.1, 0.1), KeyCode::Left),
            ButtonConfig::new(Bounds::new(0.95, 0.0, 0.1, 0.1), KeyCode::Right),
        ];

        assert_eq!(
            build_layout(&entries),
            Err(LayoutError::InvalidBounds { index: 1 })
        );
    }
}
