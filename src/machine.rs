//! The navigation state machine: session start gating, per-tick advancement
//! and mode dispatch.
//!
//! A [`Navigator`] owns an immutable options snapshot and at most one live
//! [`NavigationSession`]. `try_start` decides whether a navigation session
//! begins or the triggering event passes through to paint/sculpt handling;
//! `advance` is a pure function of the per-tick input snapshot — no hidden
//! timers, all time arrives as `dt`.

use std::f32::consts::PI;

use glam::{Quat, Vec2, Vec3};
use rustc_hash::FxHashMap;

use crate::fps::{teleport_target, FpsController, MoveInput};
use crate::input::{Action, InputRouter, TickState};
use crate::math::autolevel::level_orientation;
use crate::math::snap::{SnapEngine, UnsnapProjection};
use crate::math::trackball::{rotation_delta, TrackballState};
use crate::math::turntable::TurntableEuler;
use crate::options::{Options, OriginPolicy, RotationMethod, ZBrushMode};
use crate::pose::{CameraPose, EPSILON};
use crate::probe::{gate_allows_navigation, GeometryProbe, GeometryQuery};
use crate::session::{
    AxisLock, ModeSignal, ModeSnapshot, ModeStack, NavMode, NavigationSession,
    SessionPhase,
};
use crate::viewport::Viewport;

/// Log-distance change per drag unit (drag-zoom).
const ZOOM_SPEED_COEF: f32 = -0.77;

/// Log-distance change per wheel step.
const ZOOM_WHEEL_COEF: f32 = -0.25;

/// Trackball angular speed coefficient.
const TRACKBALL_SPEED_COEF: f32 = 0.35;

/// Turntable angular speed coefficient.
const TURNTABLE_SPEED_COEF: f32 = 0.62;

/// Pixels of drag per one log-distance zoom unit.
const ZOOM_DRAG_STEP_PX: f32 = 200.0;

/// Minimum autolevel speed while walking, in units of `autolevel_speed`.
const WALK_AUTOLEVEL_MIN: f32 = 30.0;

/// Outcome of a navigation start request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A session began; subsequent input belongs to the navigator.
    Started,
    /// The event was not consumed; paint/sculpt handling proceeds.
    PassThrough,
}

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Advance {
    /// The session continues.
    Running,
    /// The session ended; the returned pose is committed.
    Confirmed(CameraPose),
    /// The session ended; the returned pose is the restored start pose.
    Cancelled(CameraPose),
}

/// Owns the options snapshot and the live session, if any.
#[derive(Debug)]
pub struct Navigator {
    options: Options,
    session: Option<NavigationSession>,
}

impl Navigator {
    /// Create a navigator over an options snapshot.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            options,
            session: None,
        }
    }

    /// The configuration this navigator was created with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Whether a session is live.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The live session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&NavigationSession> {
        self.session.as_ref()
    }

    /// Request a navigation session.
    ///
    /// The initial mode comes from whichever mode trigger is already held,
    /// else the configured default. Under ZBrush gating the probe decides:
    /// geometry within the gate radius of the cursor means the press was a
    /// paint stroke, not a navigation, and the event passes through
    /// unconsumed. `Simple` gating only applies to a default-mode start — a
    /// held mode trigger or modifier is already an explicit ask to navigate
    /// and bypasses it; `Always` is unconditional. Gating is bypassed within
    /// the border band of the viewport edge.
    pub fn try_start(
        &mut self,
        pose: CameraPose,
        cursor: Vec2,
        viewport: Viewport,
        router: &InputRouter,
        host: &mut dyn GeometryQuery,
    ) -> StartOutcome {
        if self.session.is_some() {
            return StartOutcome::PassThrough;
        }
        let nav = &self.options.navigation;
        let probe_opts = &self.options.probe;
        let mut probe = GeometryProbe::default();

        let held_mode = NavMode::ALL
            .into_iter()
            .find(|m| router.is_on(m.trigger()));
        let gated = match nav.zbrush {
            ZBrushMode::Off => false,
            ZBrushMode::Simple => {
                held_mode.is_none() && !router.any_modifier_held()
            }
            ZBrushMode::Always => true,
        };
        if gated {
            let hit = probe.sample(
                probe_opts.method,
                host,
                viewport,
                cursor,
                probe_opts.radius,
                0,
            );
            if !gate_allows_navigation(
                hit,
                probe_opts.radius,
                cursor,
                viewport,
                probe_opts.border,
            ) {
                log::debug!(
                    "navigation gated: geometry {:.1} px from cursor",
                    hit.distance_px
                );
                return StartOutcome::PassThrough;
            }
        }

        let initial = held_mode.unwrap_or(nav.default_mode);

        let explicit_orbit_origin = match nav.origin {
            // Auto defers to host input preferences; with none provided it
            // behaves as View.
            OriginPolicy::Auto | OriginPolicy::View => None,
            OriginPolicy::Mouse => {
                let hit = probe.sample(
                    probe_opts.method,
                    host,
                    viewport,
                    cursor,
                    probe_opts.radius,
                    0,
                );
                Some(hit.world_point.filter(|_| hit.found).unwrap_or_else(
                    || {
                        cursor_at_focus_depth(
                            &pose,
                            viewport,
                            self.options.camera.fovy,
                            cursor,
                        )
                    },
                ))
            }
            OriginPolicy::Selection => host.selection_center(),
        };

        let euler = TurntableEuler::from_quat(pose.orientation);
        let mut modes = ModeStack::new(
            nav.default_mode,
            nav.transitions.iter().map(|t| (t.from, t.to)),
            true,
        );
        modes.set_mode(initial);
        let axis_lock = ModeStack::new(
            AxisLock::Free,
            [
                (AxisLock::Free, AxisLock::X),
                (AxisLock::Free, AxisLock::Y),
                (AxisLock::X, AxisLock::Free),
                (AxisLock::Y, AxisLock::Free),
                (AxisLock::X, AxisLock::Y),
                (AxisLock::Y, AxisLock::X),
            ],
            true,
        );
        let mut trackball = TrackballState::default();
        trackball.reset(cursor);
        let mut fps = FpsController::default();
        fps.reset(self.options.fps.use_gravity);

        log::debug!("navigation started in {initial:?}");
        self.session = Some(NavigationSession {
            phase: SessionPhase::Running,
            start_pose: pose,
            pose,
            viewport,
            modes,
            axis_lock,
            euler,
            orbit_entry: (pose.orientation, euler),
            trackball,
            snap: SnapEngine::default(),
            fps,
            probe,
            mode_state: FxHashMap::default(),
            explicit_orbit_origin,
            turntable: self.options.orbit.rotation_method
                == RotationMethod::Turntable,
            is_zbrush_gated: gated,
            unrotate_applied: false,
            prev_orbit_snap: false,
            elapsed: 0.0,
            tick: 0,
        });
        StartOutcome::Started
    }

    /// Advance the live session by one tick. No-op when idle.
    #[allow(clippy::too_many_lines)]
    pub fn advance(
        &mut self,
        input: &TickState,
        dt: f32,
        host: &mut dyn GeometryQuery,
    ) -> Advance {
        let Some(session) = self.session.as_mut() else {
            return Advance::Running;
        };
        session.tick += 1;
        session.elapsed += dt;
        let actions = &input.actions;

        if actions.was_pressed(Action::Confirm) {
            session.phase = SessionPhase::Confirmed;
            let pose = session.pose;
            self.session = None;
            log::debug!("navigation confirmed");
            return Advance::Confirmed(pose);
        }
        if actions.was_pressed(Action::Cancel) {
            session.phase = SessionPhase::Cancelled;
            let pose = session.start_pose;
            self.session = None;
            log::debug!("navigation cancelled");
            return Advance::Cancelled(pose);
        }

        if actions.was_pressed(Action::RotationToggle) {
            session.turntable = !session.turntable;
            if session.turntable {
                session.euler =
                    TurntableEuler::from_quat(session.pose.orientation);
            } else {
                session.trackball.reset(input.cursor);
            }
        }

        session.axis_lock.update(&[AxisLock::X, AxisLock::Y], |axis| {
            let action = match axis {
                AxisLock::X => Action::LockX,
                AxisLock::Y => Action::LockY,
                AxisLock::Free => return ModeSignal::Inactive,
            };
            if actions.was_pressed(action) {
                ModeSignal::Toggled
            } else {
                ModeSignal::Inactive
            }
        });

        let prev_mode = session.modes.mode();
        session.modes.update(&NavMode::ALL, |m| {
            let trigger = m.trigger();
            if actions.was_toggled(trigger) {
                ModeSignal::Toggled
            } else if actions.is_on(trigger) {
                ModeSignal::Active
            } else {
                ModeSignal::Inactive
            }
        });
        let mode = session.modes.mode();
        if mode != prev_mode {
            self.on_mode_change(prev_mode, mode, input.cursor);
        }
        let Some(session) = self.session.as_mut() else {
            return Advance::Running;
        };

        // In orthographic views a dolly cannot change parallax; it degrades
        // to a zoom.
        let mode = session.modes.mode();
        let effective = if session.pose.is_orthographic && mode == NavMode::Dolly
        {
            NavMode::Zoom
        } else {
            mode
        };

        let delta = session.filter_delta(input.pointer_delta);
        let flips = self.options.flips;
        let snap_on =
            effective == NavMode::Orbit && actions.is_on(Action::OrbitSnap);

        match effective {
            NavMode::Orbit => {
                let d = Vec2::new(
                    if flips.orbit_x { -delta.x } else { delta.x },
                    if flips.orbit_y { -delta.y } else { delta.y },
                );
                let pivot = session.explicit_orbit_origin;
                let use_turntable = session.turntable || snap_on;
                if use_turntable {
                    if !session.turntable && !session.prev_orbit_snap {
                        // Snap key forces turntable-style angles; pick them
                        // up from wherever the trackball left the view.
                        session.euler =
                            TurntableEuler::from_quat(session.pose.orientation);
                    }
                    let per_px = TURNTABLE_SPEED_COEF
                        * self.options.camera.rotation_speed
                        * PI
                        / session.viewport.height.max(1.0);
                    session.euler.rotate(
                        -d.x * per_px,
                        -d.y * per_px,
                        self.options.orbit.clamp_pitch,
                    );
                    apply_orientation(
                        &mut session.pose,
                        pivot,
                        session.euler.to_quat(),
                    );
                } else {
                    let speed = TRACKBALL_SPEED_COEF
                        * self.options.camera.rotation_speed
                        * PI
                        / session.viewport.height.max(1.0);
                    let dq = rotation_delta(
                        self.options.orbit.trackball_algorithm,
                        &mut session.trackball,
                        session.pose.orientation,
                        d,
                        input.cursor,
                        session.viewport,
                        speed,
                    );
                    let new_q = (dq * session.pose.orientation).normalize();
                    apply_orientation(&mut session.pose, pivot, new_q);
                }
                if snap_on {
                    let free = if use_turntable {
                        session.euler
                    } else {
                        TurntableEuler::from_quat(session.pose.orientation)
                    };
                    let snapped =
                        session.snap.snap(free, self.options.orbit.snap_subdivs);
                    apply_orientation(
                        &mut session.pose,
                        pivot,
                        snapped.to_quat(),
                    );
                    if self.options.orbit.snap_orthographic
                        || self.options.navigation.auto_perspective
                    {
                        session.pose.is_orthographic = true;
                    }
                } else if session.prev_orbit_snap {
                    session.snap.reset();
                    // Continue from the snapped orientation, no jump back.
                    session.euler =
                        TurntableEuler::from_quat(session.pose.orientation);
                    let projection = if self.options.navigation.auto_perspective
                    {
                        UnsnapProjection::Perspective
                    } else {
                        self.options.orbit.unsnap_projection
                    };
                    match projection {
                        UnsnapProjection::Keep => {}
                        UnsnapProjection::Perspective => {
                            session.pose.is_orthographic = false;
                        }
                        UnsnapProjection::SessionStart => {
                            session.pose.is_orthographic =
                                session.start_pose.is_orthographic;
                        }
                    }
                }
            }
            NavMode::Pan => {
                let wpp = session
                    .pose
                    .world_per_pixel(session.viewport, self.options.camera.fovy);
                let translation = session.pose.right() * (-delta.x * wpp)
                    + session.pose.up() * (delta.y * wpp);
                session.pose.focus_point += translation;
            }
            NavMode::Dolly => {
                let wpp = session
                    .pose
                    .world_per_pixel(session.viewport, self.options.camera.fovy);
                let dy = if flips.dolly_y { delta.y } else { -delta.y };
                session.pose.focus_point += session.pose.forward() * (dy * wpp);
            }
            NavMode::Zoom => {
                let dx = if flips.zoom_x { -delta.x } else { delta.x };
                let dy = if flips.zoom_y { -delta.y } else { delta.y };
                let drag = (dx + dy) / ZOOM_DRAG_STEP_PX;
                session.pose.zoom_by(
                    ZOOM_SPEED_COEF * self.options.camera.zoom_speed * drag,
                );
            }
            fps_mode @ (NavMode::Fly | NavMode::Walk) => {
                let per_px = TURNTABLE_SPEED_COEF
                    * self.options.camera.rotation_speed
                    * PI
                    / session.viewport.height.max(1.0);
                // Walk clamps the pitch so the ground stays down.
                session.euler.rotate(
                    -delta.x * per_px,
                    -delta.y * per_px,
                    fps_mode == NavMode::Walk || self.options.orbit.clamp_pitch,
                );
                session.pose.orientation = session.euler.to_quat();

                let move_input = MoveInput {
                    forward: actions.is_on(Action::Forward),
                    back: actions.is_on(Action::Back),
                    left: actions.is_on(Action::Left),
                    right: actions.is_on(Action::Right),
                    up: actions.is_on(Action::Up),
                    down: actions.is_on(Action::Down),
                    faster: actions.is_on(Action::Faster),
                    slower: actions.is_on(Action::Slower),
                    crouch: actions.is_on(Action::Crouch),
                    jump: actions.is_on(Action::Jump),
                };
                let displacement = session.fps.step(
                    move_input,
                    &self.options.fps,
                    self.options.camera.fps_speed,
                    session.pose.orientation,
                    dt,
                );
                session.pose.focus_point += displacement;

                if fps_mode == NavMode::Fly {
                    // Key motion overrides the cruise.
                    if move_input.axes() != Vec3::ZERO {
                        session.fps.stop_cruise();
                    }
                    session.fps.add_cruise_steps(input.wheel);
                    let cruise = session.fps.cruise_velocity();
                    if cruise != 0.0 {
                        session.pose.focus_point += session.pose.forward()
                            * (cruise * self.options.camera.fps_speed * dt);
                    }
                } else {
                    let fall = session.fps.integrate_gravity(
                        move_input,
                        &self.options.fps,
                        dt,
                    );
                    session.pose.focus_point.y += fall;
                    if session.fps.gravity_active() {
                        let eye_height = session
                            .fps
                            .eye_height(&self.options.fps, move_input.crouch);
                        if let Some(clearance) =
                            host.ground_clearance(session.pose.eye())
                        {
                            session.pose.focus_point.y +=
                                session.fps.ground(clearance, eye_height);
                        }
                    }
                }

                if actions.was_pressed(Action::Teleport) {
                    let hit = session.probe.sample(
                        self.options.probe.method,
                        host,
                        session.viewport,
                        input.cursor,
                        self.options.probe.radius,
                        session.tick,
                    );
                    let eye = session.pose.eye();
                    let eye_height = session
                        .fps
                        .eye_height(&self.options.fps, move_input.crouch);
                    if let Some(target) = teleport_target(hit, eye, eye_height)
                    {
                        session.pose.focus_point += target - eye;
                    } else {
                        log::debug!("teleport: no surface under the cursor");
                    }
                }
            }
        }

        // Wheel zooms in every mode except fly, where it steps the cruise.
        if input.wheel != 0 && effective != NavMode::Fly {
            #[allow(clippy::cast_precision_loss)]
            let steps = input.wheel as f32;
            let sign = if flips.zoom_wheel { -1.0 } else { 1.0 };
            session.pose.zoom_by(
                ZOOM_WHEEL_COEF * self.options.camera.zoom_speed * steps * sign,
            );
        }

        if dt > 0.0 && !snap_on {
            let walking = effective == NavMode::Walk;
            let wants_level = walking
                || (!session.turntable
                    && self.options.orbit.autolevel_trackball);
            if wants_level {
                let mut amount = self.options.camera.autolevel_speed * dt;
                if walking {
                    amount = amount.max(WALK_AUTOLEVEL_MIN * dt);
                }
                let leveled = level_orientation(
                    session.pose.orientation,
                    amount,
                    self.options.orbit.autolevel_up,
                    !walking,
                );
                session.pose.orientation = leveled;
                if session.turntable || walking {
                    session.euler = TurntableEuler::from_quat(leveled);
                }
            }
        }

        session.prev_orbit_snap = snap_on;
        session.pose.renormalize();
        Advance::Running
    }

    /// Bookkeeping for a mode switch: snapshots, ortho-unrotate and
    /// accumulator resets.
    fn on_mode_change(&mut self, prev: NavMode, mode: NavMode, cursor: Vec2) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        log::debug!("navigation mode {prev:?} -> {mode:?}");
        if self.options.navigation.independent_modes {
            let _ = session.mode_state.insert(
                prev,
                ModeSnapshot::capture(&session.pose, session.euler),
            );
            if let Some(saved) = session.mode_state.get(&mode) {
                session.pose.is_orthographic = saved.is_orthographic;
                session.pose.distance = saved.distance;
                session.pose.focus_point = saved.focus_point;
                session.pose.orientation = saved.orientation;
                session.euler = saved.euler;
            }
        }
        if prev == NavMode::Orbit
            && session.pose.is_orthographic
            && self.options.navigation.ortho_unrotate
            && !session.unrotate_applied
            && matches!(mode, NavMode::Pan | NavMode::Dolly | NavMode::Zoom)
        {
            // An orthographic session that leaves Orbit abandons the orbit
            // rotation and locks Orbit out for the rest of the session.
            session.pose.orientation = session.orbit_entry.0;
            session.euler = session.orbit_entry.1;
            session.modes.isolate(NavMode::Orbit);
            session.unrotate_applied = true;
        }
        if mode == NavMode::Orbit {
            session.orbit_entry = (session.pose.orientation, session.euler);
        }
        if mode.is_fps() && !prev.is_fps() {
            session.fps.reset(self.options.fps.use_gravity);
            session.euler = TurntableEuler::from_quat(session.pose.orientation);
        }
        if prev == NavMode::Fly {
            session.fps.stop_cruise();
        }
        session.trackball.reset(cursor);
        session.snap.reset();
        session.prev_orbit_snap = false;
    }
}

/// Apply a new orientation, pivoting the camera rig about the explicit orbit
/// origin when one is set: the focus point is re-derived from its
/// pivot-local position under the world-frame rotation delta.
fn apply_orientation(pose: &mut CameraPose, pivot: Option<Vec3>, new_orientation: Quat) {
    if let Some(p) = pivot {
        let world_delta = new_orientation * pose.orientation.inverse();
        pose.focus_point = p + world_delta * (pose.focus_point - p);
    }
    pose.orientation = new_orientation.normalize();
}

/// World-space point under the cursor at the focus-plane depth, from the
/// perspective frustum. Fallback orbit origin when the probe misses.
fn cursor_at_focus_depth(
    pose: &CameraPose,
    viewport: Viewport,
    fovy_deg: f32,
    cursor: Vec2,
) -> Vec3 {
    let ndc = viewport.ndc(cursor);
    let tan_half = (fovy_deg.to_radians() * 0.5).tan();
    let aspect = viewport.width.max(1.0) / viewport.height.max(1.0);
    let dir_cam = Vec3::new(ndc.x * tan_half * aspect, ndc.y * tan_half, -1.0);
    let dir = (pose.orientation * dir_cam).normalize();
    let along = dir.dot(pose.forward()).max(EPSILON);
    pose.eye() + dir * (pose.distance / along)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputEvent;
    use crate::options::{default_bindings, ModeTransition};
    use crate::probe::GeometryHit;

    struct FakeHost {
        hit: GeometryHit,
        ground: Option<f32>,
    }

    impl FakeHost {
        fn empty() -> Self {
            Self {
                hit: GeometryHit::MISS,
                ground: None,
            }
        }

        fn with_hit(distance_px: f32) -> Self {
            Self {
                hit: GeometryHit {
                    found: true,
                    distance_px,
                    world_point: Some(Vec3::ZERO),
                    normal: Some(Vec3::Y),
                },
                ground: None,
            }
        }
    }

    impl GeometryQuery for FakeHost {
        fn ray_cast(&self, _: Viewport, _: Vec2, _: f32) -> GeometryHit {
            self.hit
        }
        fn pick(&self, _: Viewport, _: Vec2) -> GeometryHit {
            self.hit
        }
        fn depth_sample(&mut self, _: Viewport, _: Vec2, _: f32) -> GeometryHit {
            self.hit
        }
        fn selection_center(&self) -> Option<Vec3> {
            None
        }
        fn ground_clearance(&self, _: Vec3) -> Option<f32> {
            self.ground
        }
    }

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    fn router() -> InputRouter {
        InputRouter::new(default_bindings())
    }

    fn press(r: &mut InputRouter, code: &str) {
        r.handle_event(&InputEvent::Key {
            code: code.to_owned(),
            pressed: true,
        });
    }

    fn release(r: &mut InputRouter, code: &str) {
        r.handle_event(&InputEvent::Key {
            code: code.to_owned(),
            pressed: false,
        });
    }

    fn drag(r: &mut InputRouter, from: Vec2, by: Vec2) {
        r.handle_event(&InputEvent::CursorMoved { x: from.x, y: from.y });
        r.handle_event(&InputEvent::CursorMoved {
            x: from.x + by.x,
            y: from.y + by.y,
        });
    }

    fn start(nav: &mut Navigator, router: &mut InputRouter, host: &mut FakeHost) {
        let outcome = nav.try_start(
            CameraPose::default(),
            viewport().center(),
            viewport(),
            router,
            host,
        );
        assert_eq!(outcome, StartOutcome::Started);
        // Edges accumulated before the session began are not the session's.
        let _ = router.take_tick();
    }

    #[test]
    fn cancel_restores_start_pose_exactly() {
        let mut nav = Navigator::new(Options::default());
        let mut host = FakeHost::empty();
        let mut router = router();
        let start_pose = CameraPose {
            focus_point: Vec3::new(1.0, 2.0, 3.0),
            distance: 7.5,
            orientation: Quat::from_euler(glam::EulerRot::YXZ, 0.4, -0.2, 0.1),
            is_orthographic: false,
        };
        assert_eq!(
            nav.try_start(start_pose, viewport().center(), viewport(), &router, &mut host),
            StartOutcome::Started
        );
        // Mangle the pose: orbit drags and wheel zoom over several ticks.
        for _ in 0..5 {
            drag(&mut router, viewport().center(), Vec2::new(37.0, -12.0));
            router.handle_event(&InputEvent::Scroll { steps: 2 });
            let tick = router.take_tick();
            assert_eq!(nav.advance(&tick, 0.016, &mut host), Advance::Running);
        }
        assert_ne!(nav.session().unwrap().pose, start_pose);
        press(&mut router, "Escape");
        let tick = router.take_tick();
        match nav.advance(&tick, 0.016, &mut host) {
            Advance::Cancelled(pose) => assert_eq!(pose, start_pose),
            other => panic!("expected cancel, got {other:?}"),
        }
        assert!(!nav.is_active());
    }

    #[test]
    fn confirm_keeps_the_manipulated_pose() {
        let mut nav = Navigator::new(Options::default());
        let mut host = FakeHost::empty();
        let mut router = router();
        start(&mut nav, &mut router, &mut host);
        router.handle_event(&InputEvent::Scroll { steps: -3 });
        let tick = router.take_tick();
        let _ = nav.advance(&tick, 0.016, &mut host);
        let zoomed = nav.session().unwrap().pose;
        assert!(zoomed.distance > CameraPose::default().distance);
        press(&mut router, "Enter");
        let tick = router.take_tick();
        match nav.advance(&tick, 0.016, &mut host) {
            Advance::Confirmed(pose) => assert_eq!(pose, zoomed),
            other => panic!("expected confirm, got {other:?}"),
        }
    }

    #[test]
    fn disallowed_transition_keeps_current_mode() {
        // Orbit -> Pan is the only allowed transition; once in Pan, neither
        // Orbit nor Dolly can take over.
        let mut options = Options::default();
        options.navigation.transitions =
            vec![ModeTransition::new(NavMode::Orbit, NavMode::Pan)];
        let mut nav = Navigator::new(options);
        let mut host = FakeHost::empty();
        let mut router = router();
        start(&mut nav, &mut router, &mut host);
        assert_eq!(nav.session().unwrap().modes.mode(), NavMode::Orbit);

        press(&mut router, "Shift");
        let tick = router.take_tick();
        let _ = nav.advance(&tick, 0.016, &mut host);
        assert_eq!(nav.session().unwrap().modes.mode(), NavMode::Pan);

        // Orbit trigger: not permitted from Pan.
        press(&mut router, "MouseMiddle");
        let tick = router.take_tick();
        let _ = nav.advance(&tick, 0.016, &mut host);
        assert_eq!(nav.session().unwrap().modes.mode(), NavMode::Pan);

        // Dolly trigger: not in the table at all.
        press(&mut router, "Control");
        let tick = router.take_tick();
        let _ = nav.advance(&tick, 0.016, &mut host);
        assert_eq!(nav.session().unwrap().modes.mode(), NavMode::Pan);
    }

    #[test]
    fn mode_falls_back_on_release() {
        let mut nav = Navigator::new(Options::default());
        let mut host = FakeHost::empty();
        let mut router = router();
        start(&mut nav, &mut router, &mut host);

        press(&mut router, "Shift");
        let tick = router.take_tick();
        let _ = nav.advance(&tick, 0.016, &mut host);
        assert_eq!(nav.session().unwrap().modes.mode(), NavMode::Pan);

        release(&mut router, "Shift");
        let tick = router.take_tick();
        let _ = nav.advance(&tick, 0.016, &mut host);
        assert_eq!(nav.session().unwrap().modes.mode(), NavMode::Orbit);
    }

    #[test]
    fn zbrush_always_suppresses_start_over_geometry() {
        let mut options = Options::default();
        options.navigation.zbrush = ZBrushMode::Always;
        options.probe.radius = 20.0;
        let mut nav = Navigator::new(options);
        // Geometry 5 px from the cursor: the press is a paint stroke.
        let mut host = FakeHost::with_hit(5.0);
        let router = router();
        let outcome = nav.try_start(
            CameraPose::default(),
            viewport().center(),
            viewport(),
            &router,
            &mut host,
        );
        assert_eq!(outcome, StartOutcome::PassThrough);
        assert!(!nav.is_active());

        // Far geometry: navigation proceeds.
        let mut host = FakeHost::with_hit(35.0);
        let outcome = nav.try_start(
            CameraPose::default(),
            viewport().center(),
            viewport(),
            &router,
            &mut host,
        );
        assert_eq!(outcome, StartOutcome::Started);
    }

    #[test]
    fn zbrush_simple_yields_to_held_mode_trigger() {
        let mut options = Options::default();
        options.navigation.zbrush = ZBrushMode::Simple;
        options.probe.radius = 20.0;
        let mut nav = Navigator::new(options);
        let mut host = FakeHost::with_hit(5.0);
        let mut router = router();

        // A bare press over geometry is a paint stroke.
        let outcome = nav.try_start(
            CameraPose::default(),
            viewport().center(),
            viewport(),
            &router,
            &mut host,
        );
        assert_eq!(outcome, StartOutcome::PassThrough);

        // A held mode trigger is an explicit ask to navigate; only a
        // default-mode start is gated.
        press(&mut router, "MouseMiddle");
        let outcome = nav.try_start(
            CameraPose::default(),
            viewport().center(),
            viewport(),
            &router,
            &mut host,
        );
        assert_eq!(outcome, StartOutcome::Started);
        assert_eq!(nav.session().unwrap().modes.mode(), NavMode::Orbit);
    }

    #[test]
    fn movement_keys_stop_fly_cruise() {
        let mut nav = Navigator::new(Options::default());
        let mut host = FakeHost::empty();
        let mut router = router();
        press(&mut router, "KeyF");
        start(&mut nav, &mut router, &mut host);
        assert_eq!(nav.session().unwrap().modes.mode(), NavMode::Fly);

        router.handle_event(&InputEvent::Scroll { steps: 3 });
        let tick = router.take_tick();
        let _ = nav.advance(&tick, 0.016, &mut host);
        let drifting = nav.session().unwrap().pose.focus_point;
        assert!(drifting.z < 0.0);

        // Holding a movement key overrides the cruise.
        press(&mut router, "KeyW");
        let tick = router.take_tick();
        let _ = nav.advance(&tick, 0.016, &mut host);
        release(&mut router, "KeyW");
        let tick = router.take_tick();
        let _ = nav.advance(&tick, 0.016, &mut host);
        let parked = nav.session().unwrap().pose.focus_point;

        // Key-free tick: no residual drift.
        let tick = router.take_tick();
        let _ = nav.advance(&tick, 0.016, &mut host);
        assert_eq!(nav.session().unwrap().pose.focus_point, parked);
    }

    #[test]
    fn zbrush_gating_bypassed_at_viewport_border() {
        let mut options = Options::default();
        options.navigation.zbrush = ZBrushMode::Always;
        let mut nav = Navigator::new(options);
        let mut host = FakeHost::with_hit(2.0);
        let router = router();
        let outcome = nav.try_start(
            CameraPose::default(),
            Vec2::new(5.0, 300.0),
            viewport(),
            &router,
            &mut host,
        );
        assert_eq!(outcome, StartOutcome::Started);
    }

    #[test]
    fn up_disables_gravity_for_session_remainder() {
        let mut options = Options::default();
        options.fps.use_gravity = true;
        let mut nav = Navigator::new(options);
        let mut host = FakeHost::empty();
        let mut router = router();
        // Walk is a toggle binding on Tab.
        press(&mut router, "Tab");
        release(&mut router, "Tab");
        start(&mut nav, &mut router, &mut host);
        assert_eq!(nav.session().unwrap().modes.mode(), NavMode::Walk);
        assert!(nav.session().unwrap().fps.gravity_active());

        press(&mut router, "KeyE");
        let tick = router.take_tick();
        let _ = nav.advance(&tick, 0.016, &mut host);
        assert!(!nav.session().unwrap().fps.gravity_active());

        release(&mut router, "KeyE");
        for _ in 0..10 {
            let tick = router.take_tick();
            let _ = nav.advance(&tick, 0.016, &mut host);
        }
        assert!(!nav.session().unwrap().fps.gravity_active());
    }

    #[test]
    fn ortho_dolly_degrades_to_zoom() {
        let mut nav = Navigator::new(Options::default());
        let mut host = FakeHost::empty();
        let mut router = router();
        let pose = CameraPose {
            is_orthographic: true,
            ..CameraPose::default()
        };
        press(&mut router, "Control");
        assert_eq!(
            nav.try_start(pose, viewport().center(), viewport(), &router, &mut host),
            StartOutcome::Started
        );
        assert_eq!(nav.session().unwrap().modes.mode(), NavMode::Dolly);
        let focus_before = nav.session().unwrap().pose.focus_point;
        let distance_before = nav.session().unwrap().pose.distance;
        drag(&mut router, viewport().center(), Vec2::new(0.0, 80.0));
        let tick = router.take_tick();
        let _ = nav.advance(&tick, 0.016, &mut host);
        let pose = nav.session().unwrap().pose;
        // Zoomed, not translated.
        assert_eq!(pose.focus_point, focus_before);
        assert_ne!(pose.distance, distance_before);
    }

    #[test]
    fn ortho_unrotate_abandons_orbit_rotation_and_locks_orbit_out() {
        let mut nav = Navigator::new(Options::default());
        let mut host = FakeHost::empty();
        let mut router = router();
        let pose = CameraPose {
            is_orthographic: true,
            ..CameraPose::default()
        };
        press(&mut router, "MouseMiddle");
        assert_eq!(
            nav.try_start(pose, viewport().center(), viewport(), &router, &mut host),
            StartOutcome::Started
        );
        // Rotate in orbit.
        drag(&mut router, viewport().center(), Vec2::new(60.0, 25.0));
        let tick = router.take_tick();
        let _ = nav.advance(&tick, 0.016, &mut host);
        assert!(!nav
            .session()
            .unwrap()
            .pose
            .orientation
            .abs_diff_eq(pose.orientation, 1e-6));

        // Switch to pan: the orbit rotation is abandoned.
        press(&mut router, "Shift");
        release(&mut router, "MouseMiddle");
        let tick = router.take_tick();
        let _ = nav.advance(&tick, 0.016, &mut host);
        let session = nav.session().unwrap();
        assert_eq!(session.modes.mode(), NavMode::Pan);
        assert!(session
            .pose
            .orientation
            .abs_diff_eq(pose.orientation, 1e-6));

        // And orbit cannot be re-entered this session.
        press(&mut router, "MouseMiddle");
        let tick = router.take_tick();
        let _ = nav.advance(&tick, 0.016, &mut host);
        assert_eq!(nav.session().unwrap().modes.mode(), NavMode::Pan);
    }

    #[test]
    fn axis_lock_restricts_pointer_motion() {
        let mut nav = Navigator::new(Options::default());
        let mut host = FakeHost::empty();
        let mut router = router();
        start(&mut nav, &mut router, &mut host);
        press(&mut router, "KeyX");
        drag(&mut router, viewport().center(), Vec2::new(0.0, 50.0));
        let tick = router.take_tick();
        let _ = nav.advance(&tick, 0.016, &mut host);
        // Vertical motion is filtered out under the X lock; the orientation
        // must be unchanged.
        assert!(nav
            .session()
            .unwrap()
            .pose
            .orientation
            .abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn orbit_snap_quantizes_to_right_angles() {
        let mut nav = Navigator::new(Options::default());
        let mut host = FakeHost::empty();
        let mut router = router();
        start(&mut nav, &mut router, &mut host);
        press(&mut router, "Alt");
        // Drag far enough that the free yaw passes 45 degrees.
        drag(&mut router, viewport().center(), Vec2::new(-260.0, 0.0));
        let tick = router.take_tick();
        let _ = nav.advance(&tick, 0.016, &mut host);
        let euler = TurntableEuler::from_quat(
            nav.session().unwrap().pose.orientation,
        );
        let quarter = std::f32::consts::FRAC_PI_2;
        let remainder = (euler.yaw / quarter).round() * quarter - euler.yaw;
        assert!(remainder.abs() < 1e-4);
        assert!(euler.yaw.abs() > 1e-3);
    }

    #[test]
    fn explicit_orbit_origin_pivots_the_focus() {
        let mut options = Options::default();
        options.navigation.origin = OriginPolicy::Mouse;
        let mut nav = Navigator::new(options);
        // Probe hit at the world origin becomes the pivot; the default pose
        // focuses (0,0,0) too, so offset the start pose.
        let mut host = FakeHost::with_hit(3.0);
        host.hit.world_point = Some(Vec3::new(2.0, 0.0, 0.0));
        let mut router = router();
        let pose = CameraPose::default();
        assert_eq!(
            nav.try_start(pose, viewport().center(), viewport(), &router, &mut host),
            StartOutcome::Started
        );
        assert_eq!(
            nav.session().unwrap().explicit_orbit_origin,
            Some(Vec3::new(2.0, 0.0, 0.0))
        );
        drag(&mut router, viewport().center(), Vec2::new(120.0, 0.0));
        let tick = router.take_tick();
        let _ = nav.advance(&tick, 0.016, &mut host);
        let session = nav.session().unwrap();
        // The focus point swings around the pivot instead of staying put.
        assert!(session.pose.focus_point.distance(pose.focus_point) > 1e-3);
        // Rigid pivot: the distance from the pivot to the focus is kept.
        let pivot = Vec3::new(2.0, 0.0, 0.0);
        assert!(
            (session.pose.focus_point.distance(pivot)
                - pose.focus_point.distance(pivot))
            .abs()
                < 1e-4
        );
    }

    #[test]
    fn walk_grounding_keeps_eye_height() {
        let mut options = Options::default();
        options.fps.use_gravity = true;
        let mut nav = Navigator::new(options);
        let mut host = FakeHost::empty();
        host.ground = Some(0.5); // surface half a unit below the eye
        let mut router = router();
        press(&mut router, "Tab");
        release(&mut router, "Tab");
        start(&mut nav, &mut router, &mut host);
        assert_eq!(nav.session().unwrap().modes.mode(), NavMode::Walk);
        let y_before = nav.session().unwrap().pose.eye().y;
        let tick = router.take_tick();
        let _ = nav.advance(&tick, 0.016, &mut host);
        let y_after = nav.session().unwrap().pose.eye().y;
        // Lifted to the configured view height above the surface.
        let expected = y_before + (nav.options().fps.view_height - 0.5)
            - 9.91 * 0.016 * 0.016; // one tick of fall before grounding
        assert!((y_after - expected).abs() < 1e-3);
    }

    #[test]
    fn independent_modes_restore_saved_view_state() {
        let mut options = Options::default();
        options.navigation.independent_modes = true;
        let mut nav = Navigator::new(options);
        let mut host = FakeHost::empty();
        let mut router = router();
        start(&mut nav, &mut router, &mut host);

        // Zoom while in orbit via the wheel, then switch to pan and back.
        router.handle_event(&InputEvent::Scroll { steps: 4 });
        let tick = router.take_tick();
        let _ = nav.advance(&tick, 0.016, &mut host);
        let orbit_distance = nav.session().unwrap().pose.distance;

        press(&mut router, "Shift");
        let tick = router.take_tick();
        let _ = nav.advance(&tick, 0.016, &mut host);
        router.handle_event(&InputEvent::Scroll { steps: -4 });
        let tick = router.take_tick();
        let _ = nav.advance(&tick, 0.016, &mut host);
        assert_ne!(nav.session().unwrap().pose.distance, orbit_distance);

        release(&mut router, "Shift");
        let tick = router.take_tick();
        let _ = nav.advance(&tick, 0.016, &mut host);
        assert_eq!(nav.session().unwrap().modes.mode(), NavMode::Orbit);
        assert!(
            (nav.session().unwrap().pose.distance - orbit_distance).abs()
                < 1e-6
        );
    }
}
