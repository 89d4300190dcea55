use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, JsonSchema,
)]
#[schemars(title = "Input Flips", inline)]
#[serde(default)]
/// Per-axis input inversion toggles.
pub struct InputFlips {
    /// Invert horizontal orbit motion.
    #[schemars(title = "Orbit X")]
    pub orbit_x: bool,
    /// Invert vertical orbit motion.
    #[schemars(title = "Orbit Y")]
    pub orbit_y: bool,
    /// Invert horizontal drag zoom.
    #[schemars(title = "Zoom X")]
    pub zoom_x: bool,
    /// Invert vertical drag zoom.
    #[schemars(title = "Zoom Y")]
    pub zoom_y: bool,
    /// Invert wheel zoom.
    #[schemars(title = "Zoom Wheel")]
    pub zoom_wheel: bool,
    /// Invert the vertical dolly direction.
    #[schemars(title = "Dolly Y")]
    pub dolly_y: bool,
}
