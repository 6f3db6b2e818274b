//! Fixed perspective camera.
//!
//! The void is viewed from a single static camera; the evaluator uses it to
//! project particles for cursor hit-testing, depth fading, and size
//! attenuation, and the renderer uses the same matrices to draw.

use glam::{Mat4, Vec2, Vec3, Vec4};

/// Clip-space `w` below this is treated as on the camera plane.
const MIN_CLIP_W: f32 = 1e-6;

/// Viewport size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Viewport of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height, 1.0 for degenerate sizes.
    pub fn aspect(&self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// A point after projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Normalized device coordinates, x right and y up.
    pub ndc: Vec2,
    /// Distance in front of the camera along its view axis.
    pub view_depth: f32,
}

/// Perspective camera looking at a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye position.
    pub position: Vec3,
    /// Point looked at.
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
    /// Width over height.
    pub aspect: f32,
}

impl Camera {
    /// The void's default camera: at z = 5 looking down -Z, 60 degree FOV.
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::new(0.0, 0.0, 0.0),
            fov_y: 60.0_f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            aspect,
        }
    }

    /// Update the aspect ratio from a viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    /// World to view transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// View to clip transform (wgpu depth range).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Combined world to clip transform.
    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world point with precomputed matrices.
    ///
    /// Returns `None` when the point lies on the camera plane.
    #[inline]
    pub fn project_with(view: &Mat4, proj: &Mat4, world: Vec3) -> Option<Projected> {
        let view_pos = *view * Vec4::new(world.x, world.y, world.z, 1.0);
        let clip = *proj * view_pos;
        if clip.w.abs() < MIN_CLIP_W || !clip.is_finite() {
            return None;
        }
        Some(Projected {
            ndc: Vec2::new(clip.x / clip.w, clip.y / clip.w),
            view_depth: -view_pos.z,
        })
    }

    /// Project a world point.
    pub fn project(&self, world: Vec3) -> Option<Projected> {
        Self::project_with(&self.view_matrix(), &self.projection_matrix(), world)
    }

    /// Distance in front of the camera along its view axis.
    #[inline]
    pub fn view_depth_with(view: &Mat4, world: Vec3) -> f32 {
        -view.transform_point3(world).z
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Viewport::default().aspect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_projects_to_center() {
        let cam = Camera::new(16.0 / 9.0);
        let p = cam.project(Vec3::ZERO).unwrap();
        assert!(p.ndc.length() < 1e-6);
        assert!((p.view_depth - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_depth_grows_away_from_camera() {
        let cam = Camera::default();
        let near = cam.project(Vec3::new(0.0, 0.0, -10.0)).unwrap();
        let far = cam.project(Vec3::new(0.0, 0.0, -50.0)).unwrap();
        assert!((near.view_depth - 15.0).abs() < 1e-4);
        assert!((far.view_depth - 55.0).abs() < 1e-4);
    }

    #[test]
    fn test_right_and_up_are_positive_ndc() {
        let cam = Camera::new(1.0);
        let p = cam.project(Vec3::new(1.0, 1.0, 0.0)).unwrap();
        assert!(p.ndc.x > 0.0 && p.ndc.y > 0.0);
        // tan(30°) * 5 ≈ 2.887 world units span half the screen height
        assert!((p.ndc.y - 1.0 / (5.0 * 30.0_f32.to_radians().tan())).abs() < 1e-4);
    }

    #[test]
    fn test_camera_plane_is_unprojectable() {
        let cam = Camera::default();
        assert_eq!(cam.project(Vec3::new(1.0, 0.0, 5.0)), None);
    }

    #[test]
    fn test_view_depth_matches_projection() {
        let cam = Camera::default();
        let world = Vec3::new(3.0, -2.0, -20.0);
        let depth = Camera::view_depth_with(&cam.view_matrix(), world);
        assert!((depth - cam.project(world).unwrap().view_depth).abs() < 1e-5);
    }

    #[test]
    fn test_viewport_aspect_guard() {
        assert_eq!(Viewport::new(0.0, 100.0).aspect(), 1.0);
        assert_eq!(Viewport::new(200.0, 100.0).aspect(), 2.0);
    }
}
