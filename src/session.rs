//! Navigation session state: the active mode, its history stack, and the
//! per-session accumulators.

use glam::{Quat, Vec3};
use rustc_hash::{FxHashMap, FxHashSet};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

use crate::fps::FpsController;
use crate::input::Action;
use crate::math::snap::SnapEngine;
use crate::math::trackball::TrackballState;
use crate::math::turntable::TurntableEuler;
use crate::pose::CameraPose;
use crate::probe::GeometryProbe;
use crate::viewport::Viewport;

/// A running navigation mode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum NavMode {
    /// Rotate the view around the focus point.
    Orbit,
    /// Translate the view in the screen plane.
    Pan,
    /// Translate the view along the view axis.
    Dolly,
    /// Change the focus distance.
    Zoom,
    /// Free flight with wheel-stepped cruise velocity.
    Fly,
    /// First-person walking, optionally with gravity.
    Walk,
}

impl NavMode {
    /// The logical action that triggers this mode.
    #[must_use]
    pub fn trigger(self) -> Action {
        match self {
            Self::Orbit => Action::Orbit,
            Self::Pan => Action::Pan,
            Self::Dolly => Action::Dolly,
            Self::Zoom => Action::Zoom,
            Self::Fly => Action::Fly,
            Self::Walk => Action::Walk,
        }
    }

    /// All declared modes.
    pub const ALL: [Self; 6] = [
        Self::Orbit,
        Self::Pan,
        Self::Dolly,
        Self::Zoom,
        Self::Fly,
        Self::Walk,
    ];

    /// Whether this is a first-person mode (fly or walk).
    #[must_use]
    pub fn is_fps(self) -> bool {
        matches!(self, Self::Fly | Self::Walk)
    }
}

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// The session is live and advancing per tick.
    Running,
    /// Terminal: the pose was committed.
    Confirmed,
    /// Terminal: the pose was reverted to the start snapshot.
    Cancelled,
}

/// Per-mode key signal consumed by the mode stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSignal {
    /// The mode's key is not held.
    Inactive,
    /// The mode's key is held.
    Active,
    /// A toggle binding for the mode fired this tick.
    Toggled,
}

/// Explicit bounded stack of mode tags with a configurable transition set.
///
/// Transitions are directional `(from, to)` pairs; a requested transition
/// outside the set is silently ignored and the current mode is retained.
/// When the current mode's key is released, the stack is searched for a
/// reachable prior mode to fall back to. The default mode is always the
/// bottom entry.
#[derive(Debug, Clone)]
pub struct ModeStack<M> {
    mode: M,
    stack: Vec<M>,
    transitions: FxHashSet<(M, M)>,
    prev_active: FxHashMap<M, bool>,
    search_top_down: bool,
}

impl<M: Copy + Eq + Hash> ModeStack<M> {
    /// Create a stack seeded with the default mode.
    #[must_use]
    pub fn new(
        default_mode: M,
        transitions: impl IntoIterator<Item = (M, M)>,
        search_top_down: bool,
    ) -> Self {
        Self {
            mode: default_mode,
            stack: vec![default_mode],
            transitions: transitions.into_iter().collect(),
            prev_active: FxHashMap::default(),
            search_top_down,
        }
    }

    /// The current mode.
    #[must_use]
    pub fn mode(&self) -> M {
        self.mode
    }

    /// Force the current mode without a transition check (session start).
    pub fn set_mode(&mut self, mode: M) {
        self.remove(mode);
        self.stack.push(mode);
        self.mode = mode;
    }

    /// Whether a transition from `from` to `to` is allowed.
    #[must_use]
    pub fn transition_allowed(&self, from: M, to: M) -> bool {
        from == to || self.transitions.contains(&(from, to))
    }

    /// Remove every transition touching `mode` (ortho-unrotate lockout).
    pub fn isolate(&mut self, mode: M) {
        self.transitions.retain(|(a, b)| *a != mode && *b != mode);
    }

    /// Advance the stack from this tick's per-mode key signals.
    pub fn update(&mut self, modes: &[M], signal: impl Fn(M) -> ModeSignal) {
        for &m in modes {
            let delta = match signal(m) {
                ModeSignal::Toggled => {
                    if self.mode == m {
                        -1
                    } else {
                        1
                    }
                }
                s => {
                    let is_on = s == ModeSignal::Active;
                    let was_on = self
                        .prev_active
                        .insert(m, is_on)
                        .unwrap_or(false);
                    i32::from(is_on) - i32::from(was_on)
                }
            };
            if delta > 0 {
                if self.transition_allowed(self.mode, m) {
                    self.remove(m);
                    self.stack.push(m);
                    self.mode = m;
                }
            } else if delta < 0 {
                if self.mode == m {
                    self.fall_back();
                } else {
                    self.remove(m);
                }
            }
        }
    }

    fn remove(&mut self, m: M) {
        self.stack.retain(|entry| *entry != m);
    }

    /// Search the stack for a reachable prior mode after a release.
    fn fall_back(&mut self) {
        let indices: Vec<usize> = if self.search_top_down {
            (0..self.stack.len()).rev().collect()
        } else {
            (0..self.stack.len()).collect()
        };
        for i in indices {
            let candidate = self.stack[i];
            if candidate != self.mode && self.transition_allowed(self.mode, candidate) {
                self.mode = candidate;
                self.stack.truncate(i + 1);
                return;
            }
        }
        // Nothing reachable: stay in the current mode (policy, not error).
    }
}

/// Pointer axis restriction sub-state (X-only / Y-only toggles).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisLock {
    /// Both axes pass through.
    Free,
    /// Only horizontal motion passes.
    X,
    /// Only vertical motion passes.
    Y,
}

/// Saved per-mode view state for the independent-modes option.
#[derive(Debug, Clone, Copy)]
pub struct ModeSnapshot {
    /// Projection flag at the time the mode was left.
    pub is_orthographic: bool,
    /// Focus distance.
    pub distance: f32,
    /// Focus point.
    pub focus_point: Vec3,
    /// View orientation.
    pub orientation: Quat,
    /// Turntable decomposition of the orientation.
    pub euler: TurntableEuler,
}

impl ModeSnapshot {
    /// Capture the current pose.
    #[must_use]
    pub fn capture(pose: &CameraPose, euler: TurntableEuler) -> Self {
        Self {
            is_orthographic: pose.is_orthographic,
            distance: pose.distance,
            focus_point: pose.focus_point,
            orientation: pose.orientation,
            euler,
        }
    }
}

/// Live navigation session.
///
/// Created when navigation is invoked (capturing `start_pose`), mutated
/// every tick while running, and destroyed when the phase reaches a
/// terminal state — the pose is either committed or reverted. Only one
/// session is live at a time and it exclusively owns its accumulators.
#[derive(Debug)]
pub struct NavigationSession {
    /// Lifecycle phase.
    pub phase: SessionPhase,
    /// Immutable snapshot of the pose at session start.
    pub start_pose: CameraPose,
    /// The pose being manipulated.
    pub pose: CameraPose,
    /// Viewport captured at session start.
    pub viewport: Viewport,
    /// Mode stack with the configured transition set.
    pub modes: ModeStack<NavMode>,
    /// Pointer axis restriction stack.
    pub axis_lock: ModeStack<AxisLock>,
    /// Turntable decomposition of the current orientation.
    pub euler: TurntableEuler,
    /// Orientation captured when Orbit was last entered (ortho-unrotate).
    pub orbit_entry: (Quat, TurntableEuler),
    /// Accumulated pointer trajectory for the Wrapped trackball.
    pub trackball: TrackballState,
    /// Orbit snap quantizer.
    pub snap: SnapEngine,
    /// Fly/walk velocity integrator.
    pub fps: FpsController,
    /// Geometry probe with its depth-sample cache.
    pub probe: GeometryProbe,
    /// Saved view state per mode (independent-modes option).
    pub mode_state: FxHashMap<NavMode, ModeSnapshot>,
    /// Orbit pivot override from the origin policy, if any.
    pub explicit_orbit_origin: Option<Vec3>,
    /// Whether turntable (vs trackball) rotation is active.
    pub turntable: bool,
    /// Whether this session was started under ZBrush gating.
    pub is_zbrush_gated: bool,
    /// Whether the ortho-unrotate lockout has been applied.
    pub unrotate_applied: bool,
    /// Orbit-snap key state from the previous tick.
    pub prev_orbit_snap: bool,
    /// Seconds since session start.
    pub elapsed: f32,
    /// Tick counter (drives probe debouncing).
    pub tick: u64,
}

impl NavigationSession {
    /// Restrict a pointer delta according to the axis lock.
    #[must_use]
    pub fn filter_delta(&self, delta: glam::Vec2) -> glam::Vec2 {
        match self.axis_lock.mode() {
            AxisLock::Free => delta,
            AxisLock::X => glam::Vec2::new(delta.x, 0.0),
            AxisLock::Y => glam::Vec2::new(0.0, delta.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn both_ways<M: Copy>(pairs: &[(M, M)]) -> Vec<(M, M)> {
        pairs.iter().flat_map(|&(a, b)| [(a, b), (b, a)]).collect()
    }

    fn stack() -> ModeStack<NavMode> {
        ModeStack::new(
            NavMode::Orbit,
            both_ways(&[
                (NavMode::Orbit, NavMode::Pan),
                (NavMode::Orbit, NavMode::Zoom),
                (NavMode::Pan, NavMode::Zoom),
            ]),
            true,
        )
    }

    #[test]
    fn disallowed_transition_is_ignored() {
        let mut s = stack();
        // Dolly is not reachable from Orbit in this table.
        s.update(&[NavMode::Dolly], |_| ModeSignal::Active);
        assert_eq!(s.mode(), NavMode::Orbit);
    }

    #[test]
    fn allowed_transition_switches_mode() {
        let mut s = stack();
        s.update(&[NavMode::Pan], |_| ModeSignal::Active);
        assert_eq!(s.mode(), NavMode::Pan);
    }

    #[test]
    fn release_falls_back_to_prior_mode() {
        let mut s = stack();
        s.update(&[NavMode::Pan], |m| match m {
            NavMode::Pan => ModeSignal::Active,
            _ => ModeSignal::Inactive,
        });
        assert_eq!(s.mode(), NavMode::Pan);
        // Zoom on top of Pan.
        s.update(&NavMode::ALL, |m| match m {
            NavMode::Pan | NavMode::Zoom => ModeSignal::Active,
            _ => ModeSignal::Inactive,
        });
        assert_eq!(s.mode(), NavMode::Zoom);
        // Release Zoom: back to Pan, not to Orbit.
        s.update(&NavMode::ALL, |m| match m {
            NavMode::Pan => ModeSignal::Active,
            _ => ModeSignal::Inactive,
        });
        assert_eq!(s.mode(), NavMode::Pan);
        // Release Pan: back to the default mode.
        s.update(&NavMode::ALL, |_| ModeSignal::Inactive);
        assert_eq!(s.mode(), NavMode::Orbit);
    }

    #[test]
    fn toggle_signal_flips_mode() {
        let mut s = ModeStack::new(
            NavMode::Orbit,
            both_ways(&[(NavMode::Orbit, NavMode::Walk)]),
            true,
        );
        s.update(&[NavMode::Walk], |_| ModeSignal::Toggled);
        assert_eq!(s.mode(), NavMode::Walk);
        s.update(&[NavMode::Walk], |_| ModeSignal::Toggled);
        assert_eq!(s.mode(), NavMode::Orbit);
    }

    #[test]
    fn isolate_removes_every_path_into_a_mode() {
        let mut s = stack();
        s.update(&[NavMode::Pan], |_| ModeSignal::Active);
        s.isolate(NavMode::Orbit);
        assert!(!s.transition_allowed(NavMode::Pan, NavMode::Orbit));
        // Pan to Zoom still works.
        assert!(s.transition_allowed(NavMode::Pan, NavMode::Zoom));
    }

    #[test]
    fn mode_is_always_a_declared_state() {
        // Drive the stack with a pseudo-random signal pattern; the mode
        // must always remain one of the declared variants and only change
        // along allowed pairs.
        let mut s = stack();
        let mut prev = s.mode();
        for step in 0u32..200 {
            let bits = step.wrapping_mul(2_654_435_761);
            s.update(&NavMode::ALL, |m| {
                let idx = NavMode::ALL.iter().position(|x| *x == m).unwrap_or(0);
                if bits >> idx & 1 == 1 {
                    ModeSignal::Active
                } else {
                    ModeSignal::Inactive
                }
            });
            let mode = s.mode();
            assert!(NavMode::ALL.contains(&mode));
            if mode != prev {
                assert!(s.transition_allowed(prev, mode));
            }
            prev = mode;
        }
    }
}
