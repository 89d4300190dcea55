//! The mutable subject of navigation: an orbit-style camera pose.

use glam::{Quat, Vec3};

use crate::viewport::Viewport;

/// Smallest distance the focus point may have from the eye (2^-10).
///
/// Zoom is logarithmic, so the distance can approach this value but never
/// reach zero.
pub const MIN_DISTANCE: f32 = 0.000_976_562_5;

/// Deltas smaller than this are treated as numerically negligible and
/// skipped instead of composed into the orientation.
pub const EPSILON: f32 = 1e-6;

/// Orbit camera pose: a focus point, a distance from it, and an orientation.
///
/// The eye position is derived: `focus_point + orientation * Z * distance`,
/// so the camera looks along `-(orientation * Z)` toward the focus. World up
/// is `+Y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// The point the camera orbits around / looks toward.
    pub focus_point: Vec3,
    /// Distance from the eye to the focus point. Always `> MIN_DISTANCE`.
    pub distance: f32,
    /// View orientation as a unit quaternion.
    pub orientation: Quat,
    /// Whether the projection is orthographic.
    pub is_orthographic: bool,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            focus_point: Vec3::ZERO,
            distance: 10.0,
            orientation: Quat::IDENTITY,
            is_orthographic: false,
        }
    }
}

impl CameraPose {
    /// Derived eye (camera) position in world space.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.focus_point + self.orientation * Vec3::Z * self.distance
    }

    /// View direction (eye toward focus).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Camera-local right axis in world space.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.orientation * Vec3::X
    }

    /// Camera-local up axis in world space.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    /// Set the distance, clamped to stay above [`MIN_DISTANCE`].
    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.max(MIN_DISTANCE);
    }

    /// Change the distance logarithmically: `2^(log2(distance) + delta)`.
    ///
    /// Exponential zoom keeps the distance strictly positive for any input
    /// sequence and gives uniform perceived zoom speed at every scale.
    pub fn zoom_by(&mut self, delta: f32) {
        let log_zoom = self.distance.max(MIN_DISTANCE).log2();
        self.set_distance((log_zoom + delta).exp2());
    }

    /// Compose a rotation delta onto the orientation and renormalize.
    ///
    /// Deltas with a negligible angle are skipped entirely so a degenerate
    /// axis can never corrupt the pose.
    pub fn rotate(&mut self, delta: Quat) {
        if delta.w.abs() >= 1.0 - EPSILON {
            return;
        }
        self.orientation = (delta * self.orientation).normalize();
    }

    /// World-space size of one pixel at the focus distance.
    ///
    /// Used to convert pointer deltas into pan/dolly translations. The same
    /// scale is used for orthographic views, where `distance` doubles as the
    /// ortho zoom factor.
    #[must_use]
    pub fn world_per_pixel(&self, viewport: Viewport, fovy_deg: f32) -> f32 {
        let height = viewport.height.max(1.0);
        2.0 * self.distance * (fovy_deg.to_radians() * 0.5).tan() / height
    }

    /// Renormalize the orientation to counter floating-point drift.
    pub fn renormalize(&mut self) {
        self.orientation = self.orientation.normalize();
        self.distance = self.distance.max(MIN_DISTANCE);
    }
}
