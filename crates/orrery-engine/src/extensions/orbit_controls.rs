// extensions/orbit_controls.rs
//
// Damped orbit-around-target camera controls (free mode).
// Games own an instance, forward pointer/wheel input while `enabled`,
// and call `update` once per frame.

use std::f32::consts::{PI, TAU};
use glam::{Vec2, Vec3};
use crate::core::spherical::Spherical;
use crate::renderer::camera::Camera3D;

/// Keeps the polar angle off the poles.
const POLAR_EPS: f32 = 1e-6;

#[derive(Debug, Clone, Copy)]
pub struct OrbitControlsConfig {
    /// Fraction of the pending rotation applied per update.
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// A drag across the full viewport height turns the camera `rotate_speed` full circles.
    pub rotate_speed: f32,
    /// Distance multiplier per wheel notch towards the target.
    pub dolly_scale: f32,
}

impl Default for OrbitControlsConfig {
    fn default() -> Self {
        Self {
            damping: 0.05,
            min_distance: 1.0,
            max_distance: 1500.0,
            rotate_speed: 1.0,
            dolly_scale: 0.95,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Disabled controls ignore input and leave the camera alone.
    pub enabled: bool,
    /// Point the camera orbits around.
    pub target: Vec3,
    config: OrbitControlsConfig,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    rotating: bool,
    last_pointer: Vec2,
}

impl OrbitControls {
    pub fn new(config: OrbitControlsConfig) -> Self {
        Self {
            enabled: true,
            target: Vec3::ZERO,
            config,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            rotating: false,
            last_pointer: Vec2::ZERO,
        }
    }

    pub fn config(&self) -> &OrbitControlsConfig {
        &self.config
    }

    pub fn is_rotating(&self) -> bool {
        self.rotating
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        if !self.enabled {
            return;
        }
        self.rotating = true;
        self.last_pointer = pos;
    }

    pub fn pointer_move(&mut self, pos: Vec2, viewport_height: f32) {
        if !self.enabled || !self.rotating || viewport_height <= 0.0 {
            return;
        }
        let delta = pos - self.last_pointer;
        self.last_pointer = pos;
        let per_pixel = TAU * self.config.rotate_speed / viewport_height;
        self.delta_theta -= delta.x * per_pixel;
        self.delta_phi -= delta.y * per_pixel;
    }

    pub fn pointer_up(&mut self) {
        self.rotating = false;
    }

    /// Queue a dolly step. Returns true when the wheel event was consumed.
    pub fn wheel(&mut self, delta_y: f32) -> bool {
        if !self.enabled {
            return false;
        }
        if delta_y < 0.0 {
            self.scale *= self.config.dolly_scale;
        } else if delta_y > 0.0 {
            self.scale /= self.config.dolly_scale;
        }
        true
    }

    /// Apply pending rotation/dolly to the camera. Returns false while disabled.
    pub fn update(&mut self, camera: &mut Camera3D) -> bool {
        if !self.enabled {
            return false;
        }
        let mut s = Spherical::from_vec3(camera.position - self.target);
        s.theta += self.delta_theta * self.config.damping;
        s.phi += self.delta_phi * self.config.damping;
        s.phi = s.phi.clamp(POLAR_EPS, PI - POLAR_EPS);
        s.radius *= self.scale;
        s.clamp_radius(self.config.min_distance, self.config.max_distance);

        camera.position = self.target + s.to_vec3();
        camera.look_at(self.target);

        self.delta_theta *= 1.0 - self.config.damping;
        self.delta_phi *= 1.0 - self.config.damping;
        self.scale = 1.0;
        true
    }

    /// Drop pending motion and orbit around `target` again.
    pub fn reset(&mut self, target: Vec3) {
        self.target = target;
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.scale = 1.0;
        self.rotating = false;
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(OrbitControlsConfig::default())
    }
}
