//! Orbit snap: quantization of view rotation to fixed angular increments.

use std::f32::consts::FRAC_PI_2;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::turntable::TurntableEuler;

/// What projection to use when orbit snap is released.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum UnsnapProjection {
    /// Keep whatever projection is active.
    Keep,
    /// Switch to perspective.
    #[default]
    Perspective,
    /// Restore the projection that was active when the session began.
    SessionStart,
}

/// Quantizes orientation angles to a grid of `90° / subdivs` steps, with
/// hysteresis so pointer jitter near a grid boundary does not oscillate
/// between two adjacent snap targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapEngine {
    snapped: Option<TurntableEuler>,
}

impl SnapEngine {
    /// Snap the free (unsnapped) angles to the grid.
    ///
    /// The first call quantizes directly. Subsequent calls keep the previous
    /// snap target until the free angle of a component has moved more than
    /// half a grid step away from it, and only then re-quantize that
    /// component.
    pub fn snap(&mut self, free: TurntableEuler, subdivs: u32) -> TurntableEuler {
        let grid = FRAC_PI_2 / subdivs.max(1) as f32;
        let target = TurntableEuler {
            yaw: quantize(free.yaw, grid),
            pitch: quantize(free.pitch, grid),
            roll: quantize(free.roll, grid),
        };
        let snapped = match self.snapped {
            None => target,
            Some(prev) => TurntableEuler {
                yaw: hysteresis(free.yaw, prev.yaw, target.yaw, grid),
                pitch: hysteresis(free.pitch, prev.pitch, target.pitch, grid),
                roll: hysteresis(free.roll, prev.roll, target.roll, grid),
            },
        };
        self.snapped = Some(snapped);
        snapped
    }

    /// Forget the current snap target (snap key released or session ended).
    pub fn reset(&mut self) {
        self.snapped = None;
    }

    /// Whether a snap target is currently held.
    #[must_use]
    pub fn is_snapped(&self) -> bool {
        self.snapped.is_some()
    }
}

fn quantize(angle: f32, grid: f32) -> f32 {
    (angle / grid).round() * grid
}

/// Keep the previous snap value until the free angle leaves its half-step
/// neighborhood.
fn hysteresis(free: f32, prev: f32, target: f32, grid: f32) -> f32 {
    if (free - prev).abs() > grid * 0.5 {
        target
    } else {
        prev
    }
}
