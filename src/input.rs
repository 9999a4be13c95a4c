//! Button snapshots from the keyboard and standard-mapping gamepads.

use wasm_bindgen::JsCast;
use web_sys::{Gamepad, GamepadButton, Navigator};

/// The four face buttons, named by position as on a standard gamepad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Button {
    North,
    East,
    South,
    West,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::North, Button::East, Button::South, Button::West];

    fn index(self) -> usize {
        self as usize
    }

    /// Keyboard key (by `KeyboardEvent.code`) standing in for this button.
    pub fn key_code(self) -> &'static str {
        match self {
            Button::North => "KeyS",
            Button::East => "KeyX",
            Button::South => "KeyZ",
            Button::West => "KeyA",
        }
    }

    /// Letter shown to players in prompts.
    pub fn key_label(self) -> char {
        match self {
            Button::North => 'S',
            Button::East => 'X',
            Button::South => 'Z',
            Button::West => 'A',
        }
    }

    /// Index in the W3C standard gamepad mapping.
    pub fn gamepad_index(self) -> u32 {
        match self {
            Button::South => 0,
            Button::East => 1,
            Button::West => 2,
            Button::North => 3,
        }
    }

    pub fn from_key_code(code: &str) -> Option<Button> {
        Button::ALL.into_iter().find(|b| b.key_code() == code)
    }
}

/// Pressed state of every button on one device (or several, merged).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonSnapshot([bool; 4]);

impl ButtonSnapshot {
    pub fn pressed(&self, button: Button) -> bool {
        self.0[button.index()]
    }

    pub fn set(&mut self, button: Button, down: bool) {
        self.0[button.index()] = down;
    }

    pub fn with(mut self, button: Button) -> Self {
        self.set(button, true);
        self
    }

    /// A button counts as held if any device holds it.
    pub fn merge(self, other: ButtonSnapshot) -> Self {
        let mut out = self;
        for (a, b) in out.0.iter_mut().zip(other.0) {
            *a |= b;
        }
        out
    }
}

/// Keyboard state tracked from keydown / keyup events.
#[derive(Debug, Default)]
pub struct KeyboardInput {
    held: ButtonSnapshot,
}

impl KeyboardInput {
    /// Returns true when the key is mapped (caller may prevent default).
    pub fn key_down(&mut self, code: &str) -> bool {
        self.apply(code, true)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.apply(code, false)
    }

    /// Focus loss: the matching keyups will never arrive.
    pub fn release_all(&mut self) {
        self.held = ButtonSnapshot::default();
    }

    pub fn snapshot(&self) -> ButtonSnapshot {
        self.held
    }

    fn apply(&mut self, code: &str, down: bool) -> bool {
        match Button::from_key_code(code) {
            Some(b) => {
                self.held.set(b, down);
                true
            }
            None => false,
        }
    }
}

/// Merged snapshot of every connected gamepad. Browsers without the Gamepad
/// API simply contribute nothing.
pub fn poll_gamepads(navigator: &Navigator) -> ButtonSnapshot {
    let Ok(pads) = navigator.get_gamepads() else {
        return ButtonSnapshot::default();
    };
    pads.iter()
        .filter_map(|pad| pad.dyn_into::<Gamepad>().ok())
        .filter(|pad| pad.connected())
        .map(|pad| gamepad_snapshot(&pad))
        .fold(ButtonSnapshot::default(), ButtonSnapshot::merge)
}

fn gamepad_snapshot(pad: &Gamepad) -> ButtonSnapshot {
    let buttons = pad.buttons();
    let mut snap = ButtonSnapshot::default();
    for b in Button::ALL {
        let down = buttons
            .get(b.gamepad_index())
            .dyn_into::<GamepadButton>()
            .map(|gb| gb.pressed())
            .unwrap_or(false);
        snap.set(b, down);
    }
    snap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_mapping_round_trips() {
        for b in Button::ALL {
            assert_eq!(Button::from_key_code(b.key_code()), Some(b));
        }
        assert_eq!(Button::from_key_code("KeyQ"), None);
    }

    #[test]
    fn keyboard_tracks_press_and_release() {
        let mut kb = KeyboardInput::default();
        assert!(kb.key_down("KeyZ"));
        assert!(kb.snapshot().pressed(Button::South));
        assert!(!kb.key_down("Space"));
        assert!(kb.key_up("KeyZ"));
        assert_eq!(kb.snapshot(), ButtonSnapshot::default());
        kb.key_down("KeyA");
        kb.release_all();
        assert!(!kb.snapshot().pressed(Button::West));
    }

    #[test]
    fn merge_is_or() {
        let a = ButtonSnapshot::default().with(Button::North);
        let b = ButtonSnapshot::default().with(Button::West);
        let m = a.merge(b);
        assert!(m.pressed(Button::North) && m.pressed(Button::West));
        assert!(!m.pressed(Button::East));
    }
}
