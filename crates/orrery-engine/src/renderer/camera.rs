use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};
use crate::core::ray::Ray;

/// Perspective camera for 3D rendering and picking.
/// Y-up, right-handed; always aimed at `target`.
#[derive(Debug, Clone)]
pub struct Camera3D {
    /// Eye position in world space.
    pub position: Vec3,
    target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Canvas size in CSS pixels.
    viewport: Vec2,
}

/// Camera pose as written to the shared buffer. 12 floats = 48 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct CameraPose {
    pub eye: [f32; 3],
    pub fov_y: f32,
    pub target: [f32; 3],
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub _pad: [f32; 2],
}

impl CameraPose {
    pub const FLOATS: usize = 12;
}

impl Camera3D {
    pub fn new(fov_y_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
            fov_y: fov_y_degrees.to_radians(),
            aspect: 16.0 / 9.0,
            near,
            far,
            viewport: Vec2::new(1600.0, 900.0),
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Re-aim the camera at a world point without moving it.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// The point the camera is aimed at.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Resize the viewport (e.g. on window resize). Zero-sized viewports are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.viewport = Vec2::new(width, height);
        self.aspect = width / height;
    }

    /// Unit vector from the eye towards the target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or(Vec3::NEG_Z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        let forward = self.forward();
        let up = if forward.cross(Vec3::Y).length_squared() < 1e-10 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        Mat4::look_to_rh(self.position, forward, up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Convert CSS pixel coordinates to normalized device coordinates (Y up).
    pub fn screen_to_ndc(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            screen.x / self.viewport.x * 2.0 - 1.0,
            -(screen.y / self.viewport.y) * 2.0 + 1.0,
        )
    }

    /// World-space picking ray through a CSS pixel position.
    pub fn screen_ray(&self, screen: Vec2) -> Ray {
        let ndc = self.screen_to_ndc(screen);
        let inv = (self.projection_matrix() * self.view_matrix()).inverse();
        let near = inv.project_point3(Vec3::new(ndc.x, ndc.y, -1.0));
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(self.position, far - near)
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            eye: self.position.to_array(),
            fov_y: self.fov_y,
            target: self.target.to_array(),
            aspect: self.aspect,
            near: self.near,
            far: self.far,
            _pad: [0.0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera3D {
        let mut cam = Camera3D::new(75.0, 1.0, 5000.0).with_position(Vec3::new(0.0, 80.0, 180.0));
        cam.resize(800.0, 600.0);
        cam.look_at(Vec3::ZERO);
        cam
    }

    #[test]
    fn pose_is_12_floats() {
        assert_eq!(std::mem::size_of::<CameraPose>(), CameraPose::FLOATS * 4);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut cam = camera();
        cam.resize(1920.0, 1080.0);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        cam.resize(0.0, 1080.0);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn center_ray_points_at_target() {
        let cam = camera();
        let ray = cam.screen_ray(Vec2::new(400.0, 300.0));
        assert!((ray.origin - cam.position).length() < 1e-4);
        assert!(ray.dir.dot(cam.forward()) > 0.9999);
    }

    #[test]
    fn corner_ndc() {
        let cam = camera();
        let ndc = cam.screen_to_ndc(Vec2::new(0.0, 0.0));
        assert_eq!(ndc, Vec2::new(-1.0, 1.0));
        let ndc = cam.screen_to_ndc(Vec2::new(800.0, 600.0));
        assert_eq!(ndc, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn view_matrix_is_finite_when_looking_straight_down() {
        let mut cam = Camera3D::new(75.0, 1.0, 5000.0).with_position(Vec3::new(0.0, 100.0, 0.0));
        cam.look_at(Vec3::ZERO);
        assert!(cam.view_matrix().is_finite());
    }

    #[test]
    fn pose_mirrors_camera() {
        let cam = camera();
        let pose = cam.pose();
        assert_eq!(pose.eye, [0.0, 80.0, 180.0]);
        assert_eq!(pose.target, [0.0, 0.0, 0.0]);
        assert_eq!(pose.far, 5000.0);
    }
}
