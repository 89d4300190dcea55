use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::math::snap::UnsnapProjection;
use crate::math::trackball::TrackballAlgorithm;

/// How pointer motion maps to orbit rotation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RotationMethod {
    /// Independent yaw/pitch about fixed axes.
    #[default]
    Turntable,
    /// Virtual-sphere rotation (algorithm selected separately).
    Trackball,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Orbit", inline)]
#[serde(default)]
/// Orbit rotation, snapping and autolevel parameters.
pub struct OrbitOptions {
    /// Turntable or trackball rotation.
    #[schemars(title = "Rotation Method")]
    pub rotation_method: RotationMethod,
    /// Which trackball algorithm to use when trackball rotation is active.
    #[schemars(title = "Trackball Algorithm")]
    pub trackball_algorithm: TrackballAlgorithm,
    /// Clamp turntable pitch to ±90° instead of allowing full rotation.
    #[schemars(title = "Clamp Pitch")]
    pub clamp_pitch: bool,
    /// Orbit snap quantization count per 90°.
    #[schemars(title = "Snap Subdivisions", range(min = 1, max = 16))]
    pub snap_subdivs: u32,
    /// Force an orthographic projection while snapped.
    #[schemars(title = "Snap to Ortho")]
    pub snap_orthographic: bool,
    /// Projection to restore when the snap is released.
    #[schemars(title = "Unsnap Projection")]
    pub unsnap_projection: UnsnapProjection,
    /// Run autolevel for trackball algorithms.
    #[schemars(title = "Autolevel Trackball")]
    pub autolevel_trackball: bool,
    /// Autolevel re-aligns fully to world up, even when upside-down.
    #[schemars(title = "Autolevel Up")]
    pub autolevel_up: bool,
}

impl Default for OrbitOptions {
    fn default() -> Self {
        Self {
            rotation_method: RotationMethod::Turntable,
            trackball_algorithm: TrackballAlgorithm::Center,
            clamp_pitch: false,
            snap_subdivs: 1,
            snap_orthographic: false,
            unsnap_projection: UnsnapProjection::Perspective,
            autolevel_trackball: false,
            autolevel_up: false,
        }
    }
}
