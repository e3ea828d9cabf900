use std::time::Instant;

use crate::ButtonState;

/// A single key press or release.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyboardInput {
    pub scan_code: ScanCode,
    pub key_code: Option<KeyCode>,
    pub state: ButtonState,
    /// Whether this event was generated by the OS key repeat.
    pub repeat: bool,
    pub timestamp: Instant,
}

impl KeyboardInput {
    /// Creates a new non-repeat `KeyboardInput` for `key_code` timestamped now.
    ///
    /// The scan code is the physical code the key has on a standard layout, so consumers cannot
    /// tell a constructed event apart from a hardware one.
    pub fn new(key_code: KeyCode, state: ButtonState) -> Self {
        Self {
            scan_code: key_code.scan_code(),
            key_code: Some(key_code),
            state,
            repeat: false,
            timestamp: Instant::now(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanCode(pub u32);

macro_rules! impl_keycode {
    ($($key:ident => $name:literal, $scan_code:literal),*,) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum KeyCode {
            $(
                $key,
            )*
        }

        impl KeyCode {
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(
                        Self::$key => $name,
                    )*
                }
            }

            /// Returns the evdev scan code of the key on a standard US layout.
            pub const fn scan_code(&self) -> ScanCode {
                match self {
                    $(
                        Self::$key => ScanCode($scan_code),
                    )*
                }
            }
        }
    };
}

impl_keycode! {
    Key1 => "1", 2,
    Key2 => "2", 3,
    Key3 => "3", 4,
    Key4 => "4", 5,
    Key5 => "5", 6,
    Key6 => "6", 7,
    Key7 => "7", 8,
    Key8 => "8", 9,
    Key9 => "9", 10,
    Key0 => "0", 11,
    A => "A", 30,
    B => "B", 48,
    C => "C", 46,
    D => "D", 32,
    E => "E", 18,
    F => "F", 33,
    G => "G", 34,
    H => "H", 35,
    I => "I", 23,
    J => "J", 36,
    K => "K", 37,
    L => "L", 38,
    M => "M", 50,
    N => "N", 49,
    O => "O", 24,
    P => "P", 25,
    Q => "Q", 16,
    R => "R", 19,
    S => "S", 31,
    T => "T", 20,
    U => "U", 22,
    V => "V", 47,
    W => "W", 17,
    X => "X", 45,
    Y => "Y", 21,
    Z => "Z", 44,
    Escape => "Escape", 1,
    F1 => "F1", 59,
    F2 => "F2", 60,
    F3 => "F3", 61,
    F4 => "F4", 62,
    F5 => "F5", 63,
    F6 => "F6", 64,
    F7 => "F7", 65,
    F8 => "F8", 66,
    F9 => "F9", 67,
    F10 => "F10", 68,
    F11 => "F11", 87,
    F12 => "F12", 88,
    Pause => "Pause", 119,
    Insert => "Insert", 110,
    Home => "Home", 102,
    Delete => "Delete", 111,
    End => "End", 107,
    PageDown => "PageDown", 109,
    PageUp => "PageUp", 104,
    Left => "Left", 105,
    Up => "Up", 103,
    Right => "Right", 106,
    Down => "Down", 108,
    Back => "Back", 14,
    Return => "Return", 28,
    Space => "Space", 57,
    Tab => "Tab", 15,
    LAlt => "LAlt", 56,
    LControl => "LControl", 29,
    LShift => "LShift", 42,
    RAlt => "RAlt", 100,
    RControl => "RControl", 97,
    RShift => "RShift", 54,
}
