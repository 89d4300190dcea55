//! Autolevel: gradual correction of camera tilt toward a reference up.

use glam::{Quat, Vec3};

use super::turntable::TurntableEuler;

/// Apply one tick of tilt correction to an orientation.
///
/// `amount` is `autolevel_speed * dt`; the correction is an exponential
/// decay of the roll angle, never a full snap, so repeated application
/// converges smoothly without a visible jump. With `scale_by_view` the
/// amount is additionally scaled by `1 - |forward_y|`, suppressing the
/// correction while looking straight up or down (where the roll axis is
/// ill-defined). `always_up` re-levels even when the camera is upside-down.
#[must_use]
pub fn level_orientation(
    orientation: Quat,
    amount: f32,
    always_up: bool,
    scale_by_view: bool,
) -> Quat {
    if amount <= 0.0 {
        return orientation;
    }
    let mut amount = amount;
    if scale_by_view {
        let forward = orientation * Vec3::NEG_Z;
        amount *= 1.0 - forward.y.abs();
    }
    let up_y = (orientation * Vec3::Y).y;
    let mut euler = TurntableEuler::from_quat(orientation);
    euler.level(amount, always_up, up_y);
    euler.to_quat()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Angle between the camera up vector and world up, radians.
    fn up_error(q: Quat) -> f32 {
        (q * Vec3::Y).dot(Vec3::Y).clamp(-1.0, 1.0).acos()
    }

    #[test]
    fn converges_to_world_up() {
        // A tilted (rolled) view, leveled over many small steps with dt
        // summing to a large value, must converge to world up.
        let mut q = Quat::from_euler(glam::EulerRot::YXZ, 0.4, 0.2, 0.9);
        for _ in 0..800 {
            q = level_orientation(q, 1.0 * 0.016, false, false);
        }
        assert!(up_error(q) < 0.21); // only pitch remains (0.2 rad)
        let euler = TurntableEuler::from_quat(q);
        assert!(euler.roll.abs() < 1e-3);
    }

    #[test]
    fn single_step_is_partial() {
        let q0 = Quat::from_euler(glam::EulerRot::YXZ, 0.0, 0.0, 0.8);
        let q1 = level_orientation(q0, 0.016, false, false);
        let roll1 = TurntableEuler::from_quat(q1).roll;
        // Neither a no-op nor a full snap.
        assert!(roll1 < 0.8);
        assert!(roll1 > 0.7);
    }

    #[test]
    fn view_scaling_suppresses_at_poles() {
        // Looking straight down: forward is -Y, so the scaled correction
        // vanishes.
        let q = Quat::from_euler(
            glam::EulerRot::YXZ,
            0.0,
            -std::f32::consts::FRAC_PI_2,
            0.5,
        );
        let leveled = level_orientation(q, 1.0, false, true);
        assert!(q.abs_diff_eq(leveled, 1e-4));
    }

    #[test]
    fn zero_amount_is_identity() {
        let q = Quat::from_euler(glam::EulerRot::YXZ, 0.3, 0.1, 0.4);
        assert_eq!(level_orientation(q, 0.0, true, true), q);
    }
}
