//! Button state derived from the native `buttons` bitmask.

use crate::constants::BUTTON_COUNT;
use serde::{Deserialize, Serialize};

/// Raw bitmask plus one boolean per possible mouse button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ButtonState {
    /// Raw bitmask as supplied by the pointer event
    pub buttons: u16,
    /// `pressed[i]` is bit `i` of `buttons`
    pub pressed: [bool; BUTTON_COUNT],
}

impl ButtonState {
    /// Nothing pressed.
    pub const RELEASED: ButtonState = ButtonState {
        buttons: 0,
        pressed: [false; BUTTON_COUNT],
    };

    pub fn from_bits(buttons: u16) -> Self {
        let mut pressed = [false; BUTTON_COUNT];
        for (bit, slot) in pressed.iter_mut().enumerate() {
            *slot = buttons & (1 << bit) != 0;
        }
        Self { buttons, pressed }
    }

    /// Whether button `index` (0-based) is pressed. Out-of-range is `false`.
    #[inline]
    pub fn is_pressed(&self, index: usize) -> bool {
        self.pressed.get(index).copied().unwrap_or(false)
    }

    #[inline]
    pub fn any_pressed(&self) -> bool {
        self.buttons != 0
    }

    /// Number of buttons held down.
    pub fn pressed_count(&self) -> u32 {
        self.buttons.count_ones()
    }
}

impl From<u16> for ButtonState {
    fn from(buttons: u16) -> Self {
        Self::from_bits(buttons)
    }
}
