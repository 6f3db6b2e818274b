//! Cursor repulsion.
//!
//! The pointer pushes nearby particles away in screen space. Distance is
//! measured between the particle's projected NDC position and the cursor's NDC
//! position; inside the influence radius the particle is displaced along the
//! screen-plane direction away from the cursor with a quadratic falloff:
//!
//! ```text
//! force = (1 - dist / radius)^2 * 4.5
//! ```
//!
//! A particle sitting exactly on the cursor has no direction to be pushed in;
//! it is pushed along +X.

use glam::{Vec2, Vec3};

/// Displacement at zero distance.
pub const MAX_REPULSION: f32 = 4.5;
/// Radii at or below this disable the interaction.
pub const MIN_INFLUENCE_RADIUS: f32 = 0.001;

/// Pointer position in normalized device coordinates.
///
/// Written by the input layer on every pointer or touch move; read once per
/// frame by the evaluator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CursorState {
    /// NDC position, x right and y up, both in [-1, 1] when on screen.
    pub ndc: Vec2,
}

impl CursorState {
    /// Cursor at an NDC position.
    pub fn new(ndc: Vec2) -> Self {
        Self { ndc }
    }

    /// Update from window pixel coordinates.
    ///
    /// A zero-sized viewport leaves the cursor where it was.
    pub fn set_from_pixels(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if let Some(ndc) = pixels_to_ndc(x, y, width, height) {
            self.ndc = ndc;
        }
    }
}

/// Convert window pixel coordinates (origin top-left) to NDC (origin center, y up).
pub fn pixels_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Option<Vec2> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some(Vec2::new((x / width) * 2.0 - 1.0, -(y / height) * 2.0 + 1.0))
}

/// Convert a pixel radius to an NDC radius, where half the viewport width is one unit.
///
/// Returns 0 (interaction disabled) for degenerate viewports.
pub fn influence_radius_ndc(radius_px: f32, viewport_width: f32) -> f32 {
    if viewport_width <= 0.0 || !radius_px.is_finite() {
        return 0.0;
    }
    (radius_px / (viewport_width * 0.5)).max(0.0)
}

/// Stateless repulsion model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorInteraction {
    /// Cursor position in NDC.
    pub cursor: Vec2,
    /// Influence radius in NDC.
    pub radius: f32,
}

impl CursorInteraction {
    /// Build from cursor state and an NDC radius.
    pub fn new(cursor: CursorState, radius: f32) -> Self {
        Self {
            cursor: cursor.ndc,
            radius,
        }
    }

    /// Whether the model does anything at all.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.radius > MIN_INFLUENCE_RADIUS
    }

    /// Screen-plane push for a particle projected to `projected_ndc`.
    ///
    /// Returns `None` when the particle is out of reach or the model is
    /// disabled. The returned vector is a world-space displacement with zero z.
    pub fn displacement(&self, projected_ndc: Vec2) -> Option<Vec3> {
        if !self.is_enabled() {
            return None;
        }

        let to_particle = projected_ndc - self.cursor;
        let dist = to_particle.length();
        if !(dist < self.radius) {
            return None;
        }

        let falloff = 1.0 - dist / self.radius;
        let force = falloff * falloff * MAX_REPULSION;
        let dir = to_particle.try_normalize().unwrap_or(Vec2::X);
        Some(Vec3::new(dir.x, dir.y, 0.0) * force)
    }

    /// Apply the push to a world position.
    #[inline]
    pub fn repel(&self, world: Vec3, projected_ndc: Vec2) -> Vec3 {
        match self.displacement(projected_ndc) {
            Some(push) => world + push,
            None => world,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(radius: f32) -> CursorInteraction {
        CursorInteraction::new(CursorState::new(Vec2::ZERO), radius)
    }

    #[test]
    fn test_pixels_to_ndc() {
        let center = pixels_to_ndc(400.0, 300.0, 800.0, 600.0).unwrap();
        assert_eq!(center, Vec2::ZERO);
        assert_eq!(pixels_to_ndc(0.0, 0.0, 800.0, 600.0), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(pixels_to_ndc(800.0, 600.0, 800.0, 600.0), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(pixels_to_ndc(10.0, 10.0, 0.0, 600.0), None);
    }

    #[test]
    fn test_cursor_ignores_degenerate_viewport() {
        let mut cursor = CursorState::new(Vec2::new(0.25, -0.5));
        cursor.set_from_pixels(5.0, 5.0, 0.0, 0.0);
        assert_eq!(cursor.ndc, Vec2::new(0.25, -0.5));
    }

    #[test]
    fn test_influence_radius_conversion() {
        assert!((influence_radius_ndc(120.0, 1200.0) - 0.2).abs() < 1e-6);
        assert_eq!(influence_radius_ndc(120.0, 0.0), 0.0);
        assert_eq!(influence_radius_ndc(-5.0, 800.0), 0.0);
    }

    #[test]
    fn test_disabled_radius_is_noop() {
        for r in [0.0, -1.0, MIN_INFLUENCE_RADIUS] {
            let m = model(r);
            assert!(!m.is_enabled());
            assert_eq!(m.displacement(Vec2::ZERO), None);
            assert_eq!(m.repel(Vec3::ONE, Vec2::ZERO), Vec3::ONE);
        }
    }

    #[test]
    fn test_zero_force_at_radius() {
        let m = model(0.2);
        assert_eq!(m.displacement(Vec2::new(0.2, 0.0)), None);
        assert_eq!(m.displacement(Vec2::new(0.0, 0.5)), None);
    }

    #[test]
    fn test_max_force_at_center_pushes_along_x() {
        let m = model(0.2);
        let push = m.displacement(Vec2::ZERO).unwrap();
        assert_eq!(push, Vec3::new(MAX_REPULSION, 0.0, 0.0));
    }

    #[test]
    fn test_quadratic_falloff_away_from_cursor() {
        let m = CursorInteraction::new(CursorState::new(Vec2::new(0.1, 0.1)), 0.4);
        let push = m.displacement(Vec2::new(0.1, 0.3)).unwrap();
        // dist 0.2 of 0.4 → (0.5)^2 * 4.5 straight up
        assert!((push - Vec3::new(0.0, 1.125, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_force_decreases_with_distance() {
        let m = model(0.5);
        let mut last = f32::INFINITY;
        for i in 0..50 {
            let d = i as f32 * 0.01;
            let f = m.displacement(Vec2::new(d, 0.0)).map(|p| p.length()).unwrap_or(0.0);
            assert!(f <= last);
            last = f;
        }
    }
}
