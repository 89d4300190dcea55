//! Logical actions the keymap can bind.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Logical navigation action.
///
/// Serde serializes as `snake_case` strings so TOML keymaps stay readable:
/// ```toml
/// [[keymap]]
/// keys = ["Tab"]
/// action = "walk"
/// trigger = "toggle"
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Commit the navigation and keep the pose.
    Confirm,
    /// Abort the navigation and restore the starting pose.
    Cancel,
    /// Switch between turntable and trackball orbiting.
    RotationToggle,
    /// Orbit mode trigger.
    Orbit,
    /// Quantize the orbit rotation while held.
    OrbitSnap,
    /// Pan mode trigger.
    Pan,
    /// Dolly mode trigger.
    Dolly,
    /// Zoom mode trigger.
    Zoom,
    /// Fly mode trigger.
    Fly,
    /// Walk mode trigger.
    Walk,
    /// Move forward (fly/walk).
    Forward,
    /// Move back (fly/walk).
    Back,
    /// Strafe left (fly/walk).
    Left,
    /// Strafe right (fly/walk).
    Right,
    /// Move up (fly/walk). Disables gravity for the session.
    Up,
    /// Move down (fly/walk). Disables gravity for the session.
    Down,
    /// Speed multiplier while held; wins over `Slower`.
    Faster,
    /// Slow-down multiplier while held.
    Slower,
    /// Lower the eye height while gravity is active.
    Crouch,
    /// Enable gravity and jump.
    Jump,
    /// Relocate to the surface under the cursor.
    Teleport,
    /// Restrict pointer input to the X axis.
    LockX,
    /// Restrict pointer input to the Y axis.
    LockY,
}

impl Action {
    /// Actions that trigger a navigation mode, with the mode they select.
    pub(crate) const MODE_TRIGGERS: [Self; 6] = [
        Self::Orbit,
        Self::Pan,
        Self::Dolly,
        Self::Zoom,
        Self::Fly,
        Self::Walk,
    ];
}
