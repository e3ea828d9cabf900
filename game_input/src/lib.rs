pub mod emulator;
pub mod keyboard;
pub mod mouse;
pub mod touch;

/// The state of a button-like input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ButtonState {
    Pressed,
    Released,
}

impl ButtonState {
    #[inline]
    pub const fn is_pressed(self) -> bool {
        matches!(self, Self::Pressed)
    }

    #[inline]
    pub const fn is_released(self) -> bool {
        matches!(self, Self::Released)
    }
}

#[cfg(test)]
mod tests {
    use super::ButtonState;

    #[test]
    fn button_state_predicates() {
        assert!(ButtonState::Pressed.is_pressed());
        assert!(!ButtonState::Pressed.is_released());
        assert!(ButtonState::Released.is_released());
        assert!(!ButtonState::Released.is_pressed());
    }
}
