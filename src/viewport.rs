//! Viewport dimensions and cursor-space helpers.

use glam::Vec2;

/// Viewport size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Construct from pixel dimensions.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Center of the viewport in pixels.
    #[must_use]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Half-diagonal length in pixels (trackball sphere sizing).
    #[must_use]
    pub fn half_diagonal(self) -> f32 {
        self.center().length()
    }

    /// Cursor position in normalized device coordinates, `[-1, 1]` on both
    /// axes with `+y` up.
    #[must_use]
    pub fn ndc(self, cursor: Vec2) -> Vec2 {
        let half = self.center();
        Vec2::new(
            (cursor.x - half.x) / half.x.max(1.0),
            (half.y - cursor.y) / half.y.max(1.0),
        )
    }

    /// Distance in pixels from the cursor to the nearest viewport edge.
    ///
    /// Negative when the cursor is outside the viewport.
    #[must_use]
    pub fn edge_distance(self, cursor: Vec2) -> f32 {
        let dx = cursor.x.min(self.width - cursor.x);
        let dy = cursor.y.min(self.height - cursor.y);
        dx.min(dy)
    }

    /// Whether the cursor is inside the viewport rectangle.
    #[must_use]
    pub fn contains(self, cursor: Vec2) -> bool {
        self.edge_distance(cursor) >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_maps_corners() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.ndc(Vec2::new(400.0, 300.0)), Vec2::ZERO);
        assert_eq!(vp.ndc(Vec2::new(800.0, 0.0)), Vec2::new(1.0, 1.0));
        // Pixel origin is the top-left corner; NDC +y is up.
        assert_eq!(vp.ndc(Vec2::ZERO), Vec2::new(-1.0, 1.0));
        assert_eq!(vp.ndc(Vec2::new(0.0, 600.0)), Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn edge_distance_tracks_nearest_border() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.edge_distance(Vec2::new(10.0, 300.0)), 10.0);
        assert_eq!(vp.edge_distance(Vec2::new(795.0, 300.0)), 5.0);
        assert_eq!(vp.edge_distance(Vec2::new(400.0, 598.0)), 2.0);
        assert!(vp.edge_distance(Vec2::new(-4.0, 300.0)) < 0.0);
    }
}
