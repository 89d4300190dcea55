//! Trackball orbit: pointer motion to rotation deltas.
//!
//! Three interchangeable algorithms, selected by configuration. Each is a
//! pure function of the pointer motion and current orientation; only the
//! Wrapped variant carries per-session state (the accumulated virtual
//! cursor trajectory).

use glam::{Quat, Vec2, Vec3};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::pose::EPSILON;
use crate::viewport::Viewport;

/// Sphere radius relative to the viewport, shared by all algorithms.
const SPHERE_SCALE: f32 = 1.1;

/// Angle normalization for the Blender-emulation variant, matching
/// Blender's scaling of the SGI trackball output.
const EMULATION_ANGLE_SCALE: f32 = 200.0;

/// Trackball rotation algorithm.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TrackballAlgorithm {
    /// Rotation depends only on the pointer delta, not on where the cursor
    /// is in the viewport.
    #[default]
    Center,
    /// The accumulated pointer trajectory (wrapped modulo the viewport) is
    /// projected onto a hemisphere, so sensitivity varies with distance
    /// from the viewport center.
    Wrapped,
    /// Approximation of Blender's spherical trackball: both cursor
    /// positions are projected onto a virtual sphere and the rotation
    /// carries one projection to the other. Known not to match Blender
    /// bit-exactly; treat as a best-effort approximation.
    Blender,
}

/// Accumulated pointer trajectory since mode entry (Wrapped algorithm only).
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackballState {
    virtual_cursor: Vec2,
}

impl TrackballState {
    /// Restart the trajectory from the given cursor position.
    pub fn reset(&mut self, cursor: Vec2) {
        self.virtual_cursor = cursor;
    }
}

/// Compute the rotation delta for one pointer motion.
///
/// `delta` and `cursor` are in pixels with `+y` down; `speed` is the
/// combined rotation speed for this tick. Returns a quaternion to compose
/// onto the current orientation (identity for negligible motion).
#[must_use]
pub fn rotation_delta(
    algorithm: TrackballAlgorithm,
    state: &mut TrackballState,
    orientation: Quat,
    delta: Vec2,
    cursor: Vec2,
    viewport: Viewport,
    speed: f32,
) -> Quat {
    if delta.length_squared() <= EPSILON {
        return Quat::IDENTITY;
    }
    match algorithm {
        TrackballAlgorithm::Center => center_delta(orientation, delta, speed),
        TrackballAlgorithm::Wrapped => {
            state.virtual_cursor += delta;
            wrapped_delta(orientation, state.virtual_cursor, delta, viewport, speed)
        }
        TrackballAlgorithm::Blender => {
            emulation_delta(orientation, delta, cursor, viewport, speed)
        }
    }
}

/// Position-independent swing about the camera right/up axes.
fn center_delta(orientation: Quat, delta: Vec2, speed: f32) -> Quat {
    let d = Vec2::new(delta.x, -delta.y) * speed;
    let right = orientation * Vec3::X;
    let up = orientation * Vec3::Y;
    let forward = orientation * Vec3::NEG_Z;
    let spin = -(right * d.x + up * d.y);
    let axis = spin.cross(forward);
    axis_angle(axis, d.length())
}

/// Hemisphere projection of the wrapped virtual cursor.
fn wrapped_delta(
    orientation: Quat,
    virtual_cursor: Vec2,
    delta: Vec2,
    viewport: Viewport,
    speed: f32,
) -> Quat {
    let d = Vec2::new(delta.x, -delta.y) * speed;
    let tv = hemisphere_vector(virtual_cursor, viewport);
    // Tilt the screen-plane delta onto the tangent plane at the projected
    // point, then spin about the axis perpendicular to both.
    let tilt = Quat::from_rotation_arc(Vec3::NEG_Z, tv);
    let spin = tilt * Vec3::new(d.x, d.y, 0.0);
    let axis_view = spin.cross(tv);
    axis_angle(orientation * axis_view, d.length())
}

/// Project a (possibly out-of-viewport) cursor onto the unit hemisphere.
///
/// The position wraps modulo the viewport so a continuous drag keeps
/// sweeping over the sphere instead of clamping at the borders.
fn hemisphere_vector(cursor: Vec2, viewport: Viewport) -> Vec3 {
    let size = Vec2::new(viewport.width.max(1.0), viewport.height.max(1.0));
    let wrapped = Vec2::new(
        cursor.x.rem_euclid(size.x),
        cursor.y.rem_euclid(size.y),
    );
    let radius = viewport.half_diagonal().max(1.0) * SPHERE_SCALE;
    let offset = (wrapped - viewport.center()) / radius;
    // +y up in view space
    let xy = Vec2::new(offset.x, -offset.y);
    let z = (1.0 - xy.length_squared()).max(0.0).sqrt();
    Vec3::new(xy.x, xy.y, -z).normalize()
}

/// SGI-style sphere/hyperbola trackball between the two cursor positions.
fn emulation_delta(
    orientation: Quat,
    delta: Vec2,
    cursor: Vec2,
    viewport: Viewport,
    speed: f32,
) -> Quat {
    let p1 = viewport.ndc(cursor - delta);
    let p2 = viewport.ndc(cursor);
    let v1 = sphere_point(p1, SPHERE_SCALE);
    let v2 = sphere_point(p2, SPHERE_SCALE);
    let axis_view = v1.cross(v2);
    let t = ((p1 - p2).length() / (2.0 * SPHERE_SCALE)).clamp(-1.0, 1.0);
    let phi = 2.0 * t.asin();
    axis_angle(orientation * axis_view, phi * speed * EMULATION_ANGLE_SCALE)
}

/// Classic trackball projection: sphere near the center, hyperbolic sheet
/// outside `r/sqrt(2)` so the mapping stays continuous off the sphere.
fn sphere_point(p: Vec2, r: f32) -> Vec3 {
    let d = p.length();
    let z = if d < r * std::f32::consts::FRAC_1_SQRT_2 {
        (r * r - d * d).sqrt()
    } else {
        r * r / (2.0 * d)
    };
    Vec3::new(p.x, p.y, z)
}

fn axis_angle(axis: Vec3, angle: f32) -> Quat {
    let len = axis.length();
    if len <= EPSILON || angle.abs() <= EPSILON {
        return Quat::IDENTITY;
    }
    Quat::from_axis_angle(axis / len, angle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn center_is_cursor_position_independent() {
        // Two sessions replaying the same delta sequence from different
        // cursor starting points must produce identical rotations.
        let deltas = [
            Vec2::new(3.0, -2.0),
            Vec2::new(-5.0, 1.0),
            Vec2::new(0.5, 4.0),
        ];
        let mut q_a = Quat::IDENTITY;
        let mut q_b = Quat::IDENTITY;
        let mut state = TrackballState::default();
        let mut cursor_a = Vec2::new(10.0, 10.0);
        let mut cursor_b = Vec2::new(700.0, 550.0);
        for d in deltas {
            cursor_a += d;
            cursor_b += d;
            let da = rotation_delta(
                TrackballAlgorithm::Center,
                &mut state,
                q_a,
                d,
                cursor_a,
                viewport(),
                0.01,
            );
            let db = rotation_delta(
                TrackballAlgorithm::Center,
                &mut state,
                q_b,
                d,
                cursor_b,
                viewport(),
                0.01,
            );
            q_a = (da * q_a).normalize();
            q_b = (db * q_b).normalize();
        }
        assert!(q_a.abs_diff_eq(q_b, 1e-6));
    }

    #[test]
    fn negligible_delta_yields_identity() {
        let mut state = TrackballState::default();
        for algorithm in [
            TrackballAlgorithm::Center,
            TrackballAlgorithm::Wrapped,
            TrackballAlgorithm::Blender,
        ] {
            let q = rotation_delta(
                algorithm,
                &mut state,
                Quat::IDENTITY,
                Vec2::ZERO,
                viewport().center(),
                viewport(),
                0.01,
            );
            assert_eq!(q, Quat::IDENTITY);
        }
    }

    #[test]
    fn center_horizontal_drag_yaws_about_up() {
        let mut state = TrackballState::default();
        let q = rotation_delta(
            TrackballAlgorithm::Center,
            &mut state,
            Quat::IDENTITY,
            Vec2::new(40.0, 0.0),
            viewport().center(),
            viewport(),
            0.01,
        );
        let (axis, angle) = q.to_axis_angle();
        assert!(angle > 0.0);
        // Pure horizontal motion rotates about the view up axis.
        assert!(axis.abs_diff_eq(Vec3::Y, 1e-4) || axis.abs_diff_eq(Vec3::NEG_Y, 1e-4));
    }

    #[test]
    fn wrapped_sensitivity_varies_with_position() {
        let d = Vec2::new(20.0, 0.0);
        let mut state_center = TrackballState::default();
        state_center.reset(viewport().center());
        let q_center = rotation_delta(
            TrackballAlgorithm::Wrapped,
            &mut state_center,
            Quat::IDENTITY,
            d,
            viewport().center(),
            viewport(),
            0.01,
        );
        let mut state_edge = TrackballState::default();
        state_edge.reset(Vec2::new(780.0, 20.0));
        let q_edge = rotation_delta(
            TrackballAlgorithm::Wrapped,
            &mut state_edge,
            Quat::IDENTITY,
            d,
            Vec2::new(780.0, 20.0),
            viewport(),
            0.01,
        );
        // Same delta, different trajectory position: different rotation.
        assert!(!q_center.abs_diff_eq(q_edge, 1e-6));
    }

    #[test]
    fn emulation_rotation_carries_projection() {
        let mut state = TrackballState::default();
        let cursor = viewport().center() + Vec2::new(30.0, 0.0);
        let q = rotation_delta(
            TrackballAlgorithm::Blender,
            &mut state,
            Quat::IDENTITY,
            Vec2::new(30.0, 0.0),
            cursor,
            viewport(),
            0.001,
        );
        let (_, angle) = q.to_axis_angle();
        assert!(angle > 0.0);
    }
}
