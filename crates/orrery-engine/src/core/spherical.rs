//! Spherical coordinates, Y-up.
//!
//! `phi` is the polar angle measured from +Y, `theta` the azimuth measured
//! from +Z towards +X. Matches the convention of common web 3D libraries so
//! offsets computed here line up with the host renderer's camera.

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    /// Polar angle from +Y, in [0, π].
    pub phi: f32,
    /// Azimuth around +Y, in (-π, π] when derived from a vector.
    pub theta: f32,
}

impl Default for Spherical {
    fn default() -> Self {
        Self { radius: 1.0, phi: 0.0, theta: 0.0 }
    }
}

impl Spherical {
    pub fn new(radius: f32, phi: f32, theta: f32) -> Self {
        Self { radius, phi, theta }
    }

    /// Spherical form of a Cartesian offset. A zero vector maps to all zeros.
    pub fn from_vec3(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self { radius: 0.0, phi: 0.0, theta: 0.0 };
        }
        Self {
            radius,
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
            theta: v.x.atan2(v.z),
        }
    }

    /// Cartesian offset for these coordinates.
    pub fn to_vec3(&self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    /// Clamp `phi` into `[margin, π - margin]`.
    pub fn clamp_phi(&mut self, margin: f32) {
        self.phi = self.phi.clamp(margin, std::f32::consts::PI - margin);
    }

    pub fn clamp_radius(&mut self, min: f32, max: f32) {
        self.radius = self.radius.clamp(min, max);
    }
}

/// Difference of two angles wrapped into (-π, π].
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}
