//! Geometry-under-cursor probing for paint-vs-navigate gating, orbit
//! origin resolution and walk-mode grounding.
//!
//! The probe is a thin adapter over whichever query primitive the host
//! exposes. The depth-buffer strategy is the only blocking one: it forces a
//! synchronous depth render on the host side, so it is debounced to at most
//! one host call per tick and its last hit is cached (tick-stamped, allowed
//! to be stale). Other consumers of the same redraw facility can still
//! interleave with it — that contention is a documented hazard the probe
//! cannot fully prevent, only survive.

use glam::{Vec2, Vec3};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::viewport::Viewport;

/// Raycast hit radius cap in pixels; larger radii are only meaningful for
/// the depth-buffer strategy.
const RAYCAST_RADIUS_MAX: f32 = 16.0;

/// Result of a single geometry query. Produced fresh per probe call and
/// never persisted beyond the tick that requested it (except the explicit
/// depth cache).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeometryHit {
    /// Whether any geometry was found near the cursor.
    pub found: bool,
    /// Screen-space distance from the cursor to the hit, in pixels.
    pub distance_px: f32,
    /// World-space hit position, when the strategy can produce one.
    pub world_point: Option<Vec3>,
    /// World-space surface normal at the hit, when available.
    pub normal: Option<Vec3>,
}

impl GeometryHit {
    /// A miss: no geometry near the cursor.
    pub const MISS: Self = Self {
        found: false,
        distance_px: f32::INFINITY,
        world_point: None,
        normal: None,
    };

    /// Demote anomalous readings (NaN or negative distance) to a miss.
    ///
    /// Depth-buffer reads that race another consumer of the redraw facility
    /// can return garbage; policy is to treat them as non-hits, never to
    /// propagate a fault.
    #[must_use]
    pub fn sanitized(self) -> Self {
        if self.found && (self.distance_px.is_nan() || self.distance_px < 0.0) {
            log::warn!(
                "anomalous probe reading (distance_px = {}), treating as miss",
                self.distance_px
            );
            return Self::MISS;
        }
        self
    }
}

/// Host-provided geometry query facility.
///
/// Implementations decide what "geometry" means (meshes, picking IDs, depth
/// pixels). Strategies that cannot test a given representation fail closed
/// by returning [`GeometryHit::MISS`].
pub trait GeometryQuery {
    /// Cast a ray through the cursor against ray-intersectable geometry,
    /// accepting hits within `radius_px` of the cursor.
    fn ray_cast(&self, viewport: Viewport, cursor: Vec2, radius_px: f32) -> GeometryHit;

    /// The host's object-picking query at the cursor.
    fn pick(&self, viewport: Viewport, cursor: Vec2) -> GeometryHit;

    /// Sample the rendered depth channel at the cursor and a `radius_px`
    /// neighborhood. Blocking: triggers a full viewport redraw.
    fn depth_sample(&mut self, viewport: Viewport, cursor: Vec2, radius_px: f32)
        -> GeometryHit;

    /// Center of the host's current selection, for the Selection origin
    /// policy. `None` when nothing is selected.
    fn selection_center(&self) -> Option<Vec3>;

    /// Distance from `position` straight down to the nearest surface, for
    /// walk-mode grounding. `None` when nothing is below.
    fn ground_clearance(&self, position: Vec3) -> Option<f32>;
}

/// Geometry detection strategy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ProbeMethod {
    /// Ray intersection against scene geometry.
    #[default]
    Raycast,
    /// The host's object-picking query.
    Selection,
    /// Depth-channel sampling. Expensive: forces a synchronous redraw, and
    /// therefore discouraged in non-blocking configurations.
    DepthBuffer,
}

#[derive(Debug, Clone, Copy)]
struct DepthCache {
    tick: u64,
    cursor: Vec2,
    hit: GeometryHit,
}

/// Strategy-dispatching probe with a debounced depth cache.
#[derive(Debug, Default)]
pub struct GeometryProbe {
    depth_cache: Option<DepthCache>,
}

impl GeometryProbe {
    /// Query the geometry under the cursor using the selected strategy.
    ///
    /// `tick` is the session tick counter; the depth-buffer strategy issues
    /// at most one host call per tick and otherwise serves the cached hit,
    /// which may be stale by up to one tick of cursor motion.
    pub fn sample(
        &mut self,
        method: ProbeMethod,
        host: &mut dyn GeometryQuery,
        viewport: Viewport,
        cursor: Vec2,
        radius_px: f32,
        tick: u64,
    ) -> GeometryHit {
        match method {
            ProbeMethod::Raycast => host
                .ray_cast(viewport, cursor, radius_px.min(RAYCAST_RADIUS_MAX))
                .sanitized(),
            ProbeMethod::Selection => host.pick(viewport, cursor).sanitized(),
            ProbeMethod::DepthBuffer => {
                if let Some(cache) = self.depth_cache {
                    if cache.tick == tick {
                        // Serve the stale hit, adjusted for cursor motion
                        // since the sample was taken.
                        let mut hit = cache.hit;
                        if hit.found {
                            hit.distance_px += (cursor - cache.cursor).length();
                        }
                        return hit;
                    }
                }
                let hit = host.depth_sample(viewport, cursor, radius_px).sanitized();
                self.depth_cache = Some(DepthCache { tick, cursor, hit });
                hit
            }
        }
    }

    /// Drop the depth cache (session end).
    pub fn invalidate(&mut self) {
        self.depth_cache = None;
    }
}

/// ZBrush gating decision: may navigation start, or should the event pass
/// through to paint/sculpt handling?
///
/// Navigation is allowed when no geometry was found within `radius_px` of
/// the cursor. Within `border_px` of a viewport edge gating is bypassed
/// entirely — navigation is always allowed there, so the cursor can never
/// get stuck unable to navigate at the screen edge.
#[must_use]
pub fn gate_allows_navigation(
    hit: GeometryHit,
    radius_px: f32,
    cursor: Vec2,
    viewport: Viewport,
    border_px: f32,
) -> bool {
    if viewport.edge_distance(cursor) <= border_px {
        return true;
    }
    !hit.found || hit.distance_px > radius_px
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scripted host: counts depth calls, returns configured hits.
    struct FakeHost {
        ray_hit: GeometryHit,
        depth_hit: GeometryHit,
        depth_calls: u32,
    }

    impl FakeHost {
        fn new() -> Self {
            Self {
                ray_hit: GeometryHit::MISS,
                depth_hit: GeometryHit::MISS,
                depth_calls: 0,
            }
        }
    }

    impl GeometryQuery for FakeHost {
        fn ray_cast(&self, _: Viewport, _: Vec2, _: f32) -> GeometryHit {
            self.ray_hit
        }
        fn pick(&self, _: Viewport, _: Vec2) -> GeometryHit {
            self.ray_hit
        }
        fn depth_sample(&mut self, _: Viewport, _: Vec2, _: f32) -> GeometryHit {
            self.depth_calls += 1;
            self.depth_hit
        }
        fn selection_center(&self) -> Option<Vec3> {
            None
        }
        fn ground_clearance(&self, _: Vec3) -> Option<f32> {
            None
        }
    }

    fn hit_at(distance_px: f32) -> GeometryHit {
        GeometryHit {
            found: true,
            distance_px,
            world_point: Some(Vec3::ZERO),
            normal: Some(Vec3::Y),
        }
    }

    #[test]
    fn depth_probe_is_debounced_per_tick() {
        let mut host = FakeHost::new();
        host.depth_hit = hit_at(3.0);
        let mut probe = GeometryProbe::default();
        let vp = Viewport::new(800.0, 600.0);
        let cursor = vp.center();
        let _ = probe.sample(ProbeMethod::DepthBuffer, &mut host, vp, cursor, 20.0, 7);
        let _ = probe.sample(ProbeMethod::DepthBuffer, &mut host, vp, cursor, 20.0, 7);
        assert_eq!(host.depth_calls, 1);
        let _ = probe.sample(ProbeMethod::DepthBuffer, &mut host, vp, cursor, 20.0, 8);
        assert_eq!(host.depth_calls, 2);
    }

    #[test]
    fn anomalous_depth_reading_becomes_miss() {
        let mut host = FakeHost::new();
        host.depth_hit = hit_at(-4.0);
        let mut probe = GeometryProbe::default();
        let vp = Viewport::new(800.0, 600.0);
        let hit =
            probe.sample(ProbeMethod::DepthBuffer, &mut host, vp, vp.center(), 20.0, 0);
        assert!(!hit.found);
    }

    #[test]
    fn raycast_radius_is_capped() {
        struct RadiusCheck;
        impl GeometryQuery for RadiusCheck {
            fn ray_cast(&self, _: Viewport, _: Vec2, radius_px: f32) -> GeometryHit {
                assert!(radius_px <= RAYCAST_RADIUS_MAX);
                GeometryHit::MISS
            }
            fn pick(&self, _: Viewport, _: Vec2) -> GeometryHit {
                GeometryHit::MISS
            }
            fn depth_sample(&mut self, _: Viewport, _: Vec2, _: f32) -> GeometryHit {
                GeometryHit::MISS
            }
            fn selection_center(&self) -> Option<Vec3> {
                None
            }
            fn ground_clearance(&self, _: Vec3) -> Option<f32> {
                None
            }
        }
        let mut probe = GeometryProbe::default();
        let vp = Viewport::new(800.0, 600.0);
        let _ = probe.sample(
            ProbeMethod::Raycast,
            &mut RadiusCheck,
            vp,
            vp.center(),
            64.0,
            0,
        );
    }

    #[test]
    fn gating_blocks_near_hits_and_allows_far_ones() {
        let vp = Viewport::new(800.0, 600.0);
        let cursor = vp.center();
        assert!(!gate_allows_navigation(hit_at(5.0), 20.0, cursor, vp, 16.0));
        assert!(gate_allows_navigation(hit_at(25.0), 20.0, cursor, vp, 16.0));
        assert!(gate_allows_navigation(GeometryHit::MISS, 20.0, cursor, vp, 16.0));
    }

    #[test]
    fn gating_is_bypassed_near_viewport_border() {
        let vp = Viewport::new(800.0, 600.0);
        let edge_cursor = Vec2::new(4.0, 300.0);
        // A close hit would normally suppress navigation, but not at the
        // border.
        assert!(gate_allows_navigation(hit_at(2.0), 20.0, edge_cursor, vp, 16.0));
    }
}
