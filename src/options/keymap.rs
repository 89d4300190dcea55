use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::NavError;
use crate::input::{Action, KeymapBinding};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Keymap", inline)]
#[serde(default)]
/// Ordered table of key-to-action bindings consumed by the input router.
pub struct KeymapOptions {
    /// Bindings, resolved top to bottom.
    pub bindings: Vec<KeymapBinding>,
}

impl KeymapOptions {
    /// Reject malformed bindings (empty key list or blank key code) so a
    /// bad preset fails at load time instead of silently never firing.
    pub fn validate(&self) -> Result<(), NavError> {
        for binding in &self.bindings {
            if binding.keys.is_empty() {
                return Err(NavError::Keymap(format!(
                    "binding for {:?} has no keys",
                    binding.action
                )));
            }
            if binding.keys.iter().any(|k| k.is_empty()) {
                return Err(NavError::Keymap(format!(
                    "binding for {:?} has a blank key code",
                    binding.action
                )));
            }
        }
        Ok(())
    }
}

impl Default for KeymapOptions {
    fn default() -> Self {
        Self {
            bindings: default_bindings(),
        }
    }
}

/// The reference control scheme.
///
/// Mouse buttons arrive as `"MouseLeft"` / `"MouseMiddle"` / `"MouseRight"`
/// key codes; modifiers as canonical side-less codes.
#[must_use]
pub fn default_bindings() -> Vec<KeymapBinding> {
    vec![
        KeymapBinding::multi(&["MouseLeft", "Enter", "Space"], Action::Confirm),
        KeymapBinding::multi(&["MouseRight", "Escape"], Action::Cancel),
        KeymapBinding::hold("MouseMiddle", Action::Orbit),
        KeymapBinding::hold("Alt", Action::OrbitSnap),
        KeymapBinding::hold("Shift", Action::Pan),
        KeymapBinding::hold("Control", Action::Dolly),
        KeymapBinding::hold("KeyZ", Action::Zoom),
        KeymapBinding::hold("KeyF", Action::Fly),
        KeymapBinding::toggle("Tab", Action::Walk),
        KeymapBinding::multi(&["KeyW", "ArrowUp"], Action::Forward),
        KeymapBinding::multi(&["KeyS", "ArrowDown"], Action::Back),
        KeymapBinding::multi(&["KeyA", "ArrowLeft"], Action::Left),
        KeymapBinding::multi(&["KeyD", "ArrowRight"], Action::Right),
        KeymapBinding::multi(&["KeyE", "PageUp"], Action::Up),
        KeymapBinding::multi(&["KeyQ", "PageDown"], Action::Down),
        // Shift and Alt double as the FPS speed modifiers; the state machine
        // only consults Faster/Slower in fly and walk.
        KeymapBinding::hold("Shift", Action::Faster),
        KeymapBinding::hold("Alt", Action::Slower),
        KeymapBinding::hold("KeyC", Action::Crouch),
        KeymapBinding::hold("KeyV", Action::Jump),
        KeymapBinding::hold("KeyT", Action::Teleport),
        KeymapBinding::hold("KeyX", Action::LockX),
        KeymapBinding::hold("KeyY", Action::LockY),
        KeymapBinding::hold("KeyR", Action::RotationToggle),
    ]
}
