//! Platform-agnostic input events.
//!
//! These are fed into an [`InputRouter`](super::InputRouter) which resolves
//! them against the keymap into logical [`Action`](super::Action) states.

/// Raw input event as delivered by the host's window layer.
///
/// Key codes use the `winit::keyboard::KeyCode` debug format (`"KeyW"`,
/// `"Tab"`, `"Escape"`); mouse buttons are `"MouseLeft"`, `"MouseMiddle"`,
/// `"MouseRight"`. Left/right modifier variants (`"ShiftLeft"`, …) are
/// folded into their canonical names by the router.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to an absolute position in physical pixels.
    CursorMoved {
        /// Horizontal position, pixels.
        x: f32,
        /// Vertical position, pixels (`+y` down).
        y: f32,
    },
    /// Key or mouse button pressed or released.
    Key {
        /// Key code string.
        code: String,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel steps (positive = up / zoom in).
    Scroll {
        /// Whole wheel steps.
        steps: i32,
    },
}

/// Fold left/right modifier variants into canonical modifier names.
#[must_use]
pub fn canonical_code(code: &str) -> &str {
    match code {
        "ShiftLeft" | "ShiftRight" => "Shift",
        "ControlLeft" | "ControlRight" => "Control",
        "AltLeft" | "AltRight" => "Alt",
        "SuperLeft" | "SuperRight" => "Super",
        other => other,
    }
}

/// Whether a canonical code is a modifier key.
#[must_use]
pub fn is_modifier(code: &str) -> bool {
    matches!(code, "Shift" | "Control" | "Alt" | "Super")
}
