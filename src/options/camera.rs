use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and speed-modifier parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees (pan/dolly pixel scaling).
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Rotation sensitivity multiplier.
    #[schemars(title = "Rotation Speed", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub rotation_speed: f32,
    /// Zoom sensitivity multiplier.
    #[schemars(title = "Zoom Speed", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub zoom_speed: f32,
    /// Fly/walk movement speed multiplier.
    #[schemars(title = "FPS Speed", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub fps_speed: f32,
    /// Autolevel speed multiplier.
    #[schemars(title = "Autolevel Speed", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub autolevel_speed: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            rotation_speed: 1.0,
            zoom_speed: 1.0,
            fps_speed: 1.0,
            autolevel_speed: 1.0,
        }
    }
}
