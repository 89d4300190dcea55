//! Turntable orbit: independent yaw/pitch composition about fixed axes.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{EulerRot, Quat};

/// View orientation decomposed into turntable angles.
///
/// Yaw rotates about world up (`+Y`), pitch about the camera-local right
/// axis, roll about the view axis. The quaternion equivalent is
/// `Ry(yaw) * Rx(pitch) * Rz(roll)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TurntableEuler {
    /// Rotation about world up, radians.
    pub yaw: f32,
    /// Rotation about the local right axis, radians.
    pub pitch: f32,
    /// Tilt about the view axis, radians. Zero means level.
    pub roll: f32,
}

impl TurntableEuler {
    /// Decompose a view orientation into turntable angles.
    #[must_use]
    pub fn from_quat(q: Quat) -> Self {
        let (yaw, pitch, roll) = q.to_euler(EulerRot::YXZ);
        Self { yaw, pitch, roll }
    }

    /// Recompose into a unit quaternion.
    #[must_use]
    pub fn to_quat(self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, self.roll)
            .normalize()
    }

    /// Apply yaw/pitch deltas.
    ///
    /// With `clamp_pitch` the pitch is limited to ±90° so the view cannot
    /// wrap over the poles; otherwise full rotation is permitted.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32, clamp_pitch: bool) {
        self.yaw += yaw_delta;
        self.pitch += pitch_delta;
        if clamp_pitch {
            self.pitch = self.pitch.clamp(-FRAC_PI_2, FRAC_PI_2);
        } else if self.pitch.abs() > PI {
            self.pitch -= (2.0 * PI).copysign(self.pitch);
        }
    }

    /// Exponentially decay the roll toward level: `roll *= 2^-amount`.
    ///
    /// When the camera is upside-down (`|roll| > 90°`), or when `always_up`
    /// is set and the camera up points below the horizon (`up_y < 0`), the
    /// decay target is ±180° — the nearer level orientation — instead of 0.
    pub fn level(&mut self, amount: f32, always_up: bool, up_y: f32) {
        if amount <= 0.0 {
            return;
        }
        let falloff = (-amount.abs()).exp2();
        if (always_up && up_y < 0.0) || self.roll.abs() > FRAC_PI_2 {
            let pole = PI.copysign(self.roll);
            self.roll = pole - (pole - self.roll) * falloff;
        } else {
            self.roll *= falloff;
        }
    }
}
