//! First-person motion for fly and walk: key-driven velocity, wheel-stepped
//! cruise, gravity with grounding, and teleport.

use glam::{Quat, Vec3};

use crate::options::FpsOptions;
use crate::probe::GeometryHit;

/// Downward acceleration while gravity is active, world units per second².
const GRAVITY_ACCEL: f32 = 9.91;

/// Per-tick damping applied to the vertical velocity before integration.
const GRAVITY_DAMPING: f32 = 0.999;

/// Cruise step magnitude clamp; `2^(9-2)` is already 128 world units per
/// second.
const CRUISE_STEP_MAX: f32 = 9.0;

/// Held directional/modifier keys for one tick, resolved from the keymap.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveInput {
    /// Move forward.
    pub forward: bool,
    /// Move back.
    pub back: bool,
    /// Strafe left.
    pub left: bool,
    /// Strafe right.
    pub right: bool,
    /// Move up. Disables gravity for the rest of the session.
    pub up: bool,
    /// Move down. Disables gravity for the rest of the session.
    pub down: bool,
    /// Speed-up modifier; wins over `slower`.
    pub faster: bool,
    /// Slow-down modifier.
    pub slower: bool,
    /// Lower the eye height while gravity is active.
    pub crouch: bool,
    /// Enable gravity and jump.
    pub jump: bool,
}

impl MoveInput {
    /// Signed movement axes: `x` right, `y` up, `z` forward.
    #[must_use]
    pub fn axes(self) -> Vec3 {
        Vec3::new(
            f32::from(self.right) - f32::from(self.left),
            f32::from(self.up) - f32::from(self.down),
            f32::from(self.forward) - f32::from(self.back),
        )
    }
}

/// Velocity integrator for the first-person modes.
///
/// Owns the gravity latch, the falling velocity and the fly cruise steps.
/// The state machine composes the pieces: key motion every FPS tick, cruise
/// only in fly, gravity and grounding only in walk.
#[derive(Debug, Default)]
pub struct FpsController {
    gravity: bool,
    vertical_velocity: f32,
    cruise_steps: f32,
    prev_jump: bool,
}

impl FpsController {
    /// Reset for a new session.
    pub fn reset(&mut self, use_gravity: bool) {
        *self = Self {
            gravity: use_gravity,
            ..Self::default()
        };
    }

    /// Whether gravity is currently latched on.
    #[must_use]
    pub fn gravity_active(&self) -> bool {
        self.gravity
    }

    /// Effective eye height; crouching only applies while gravity holds the
    /// camera to the ground.
    #[must_use]
    pub fn eye_height(&self, opts: &FpsOptions, crouch: bool) -> f32 {
        if self.gravity && crouch {
            opts.view_height * opts.crouch_factor
        } else {
            opts.view_height
        }
    }

    /// World-space displacement from held keys for one tick.
    ///
    /// With `horizontal`, forward/back/left/right stay yaw-relative in the
    /// world horizontal plane and up/down use world vertical; otherwise the
    /// basis is the camera's own axes. Explicit vertical motion releases the
    /// gravity latch; a jump press re-arms it.
    pub fn step(
        &mut self,
        input: MoveInput,
        opts: &FpsOptions,
        speed_multiplier: f32,
        orientation: Quat,
        dt: f32,
    ) -> Vec3 {
        let axes = input.axes();
        if axes.y != 0.0 {
            self.gravity = false;
        }
        if input.jump {
            self.gravity = true;
        }

        let mut speed = opts.movement_speed * speed_multiplier;
        if input.faster {
            speed *= opts.fast_multiplier;
        } else if input.slower {
            speed *= opts.slow_multiplier;
        }

        let (right, up, forward) = if opts.horizontal {
            let fwd = orientation * Vec3::NEG_Z;
            let flat = Vec3::new(fwd.x, 0.0, fwd.z);
            let forward = if flat.length_squared() > f32::EPSILON {
                flat.normalize()
            } else {
                // Looking straight up or down: fall back to the projected
                // camera up so forward motion still means something.
                let cam_up = orientation * Vec3::Y;
                Vec3::new(cam_up.x, 0.0, cam_up.z).normalize_or(Vec3::NEG_Z)
            };
            (forward.cross(Vec3::Y).normalize(), Vec3::Y, forward)
        } else {
            (
                orientation * Vec3::X,
                orientation * Vec3::Y,
                orientation * Vec3::NEG_Z,
            )
        };

        (right * axes.x + up * axes.y + forward * axes.z) * speed * dt
    }

    /// Apply wheel steps to the cruise velocity (fly mode).
    ///
    /// From speed step two upward, a step against the current cruise
    /// direction counts double, so a quick wheel reversal brakes instead of
    /// creeping through every speed level.
    pub fn add_cruise_steps(&mut self, steps: i32) {
        if steps == 0 {
            return;
        }
        #[allow(clippy::cast_precision_loss)]
        let mut delta = steps as f32;
        if self.cruise_steps.abs() >= 2.0
            && delta.signum() != self.cruise_steps.signum()
        {
            delta *= 2.0;
        }
        self.cruise_steps = (self.cruise_steps + delta)
            .round()
            .clamp(-CRUISE_STEP_MAX, CRUISE_STEP_MAX);
    }

    /// Cruise velocity in world units per second: `±2^(|steps|-2)`, zero at
    /// step zero.
    #[must_use]
    pub fn cruise_velocity(&self) -> f32 {
        if self.cruise_steps == 0.0 {
            0.0
        } else {
            (self.cruise_steps.abs() - 2.0)
                .exp2()
                .copysign(self.cruise_steps)
        }
    }

    /// Stop the cruise (key motion overriding it, or mode exit).
    pub fn stop_cruise(&mut self) {
        self.cruise_steps = 0.0;
    }

    /// Integrate gravity for one tick and return the vertical world
    /// displacement. No-op while the latch is off.
    ///
    /// Holding jump while falling bleeds the downward velocity so repeated
    /// hops stay responsive; the impulse itself fires once per press.
    pub fn integrate_gravity(
        &mut self,
        input: MoveInput,
        opts: &FpsOptions,
        dt: f32,
    ) -> f32 {
        if !self.gravity {
            self.prev_jump = input.jump;
            return 0.0;
        }
        self.vertical_velocity *= GRAVITY_DAMPING;
        self.vertical_velocity -= GRAVITY_ACCEL * dt;
        if input.jump {
            if self.vertical_velocity < 0.0 {
                self.vertical_velocity *= 0.9;
            }
            if !self.prev_jump {
                self.vertical_velocity += opts.jump_height;
            }
            self.vertical_velocity += (GRAVITY_ACCEL + opts.jump_height) * dt;
        }
        self.prev_jump = input.jump;
        self.vertical_velocity * dt
    }

    /// Clamp against the ground and return the upward correction.
    ///
    /// `clearance` is the probed distance from the eye to the surface below;
    /// when it is smaller than the eye height the camera is lifted onto the
    /// surface and any downward velocity is absorbed.
    pub fn ground(&mut self, clearance: f32, eye_height: f32) -> f32 {
        let lift = eye_height - clearance;
        if lift > 0.0 {
            if self.vertical_velocity < 0.0 {
                self.vertical_velocity = 0.0;
            }
            lift
        } else {
            0.0
        }
    }
}

/// Teleport destination: the probed surface point offset along its normal by
/// the eye height. The normal is flipped to face the camera so teleporting
/// onto a back-facing surface still lands in front of it. `None` on a miss.
#[must_use]
pub fn teleport_target(hit: GeometryHit, eye: Vec3, eye_height: f32) -> Option<Vec3> {
    let point = hit.world_point.filter(|_| hit.found)?;
    let mut normal = hit.normal.unwrap_or(Vec3::Y);
    if normal.length_squared() < f32::EPSILON {
        normal = Vec3::Y;
    } else {
        normal = normal.normalize();
        if normal.dot(eye - point) < 0.0 {
            normal = -normal;
        }
    }
    Some(point + normal * eye_height)
}
