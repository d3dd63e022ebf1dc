/// Circular orbit model: angular state advanced by simulation time.
///
/// Pure math, no engine dependencies. Positions are in the parent's frame
/// (heliocentric for planets, planet-local for moons).

use glam::Vec3;

/// Angular state of one orbiting body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    /// Accumulated phase in radians.
    pub angle: f32,
    /// Live orbit radius.
    pub radius: f32,
    /// Radius restored on reset.
    pub restore_radius: f32,
    /// Angular speed in radians per simulated second (before the global multiplier).
    pub speed: f32,
    /// Replaces `speed` when set; derived speeds never touch it.
    pub speed_override: Option<f32>,
}

impl OrbitState {
    pub fn new(radius: f32, speed: f32) -> Self {
        Self {
            angle: 0.0,
            radius,
            restore_radius: radius,
            speed,
            speed_override: None,
        }
    }

    pub fn effective_speed(&self) -> f32 {
        self.speed_override.unwrap_or(self.speed)
    }

    /// Advance the phase by `dt` seconds scaled by the global multiplier.
    pub fn advance(&mut self, dt: f32, multiplier: f32) {
        self.angle += dt * self.effective_speed() * multiplier;
    }

    /// Position on the orbit in the parent's frame (y = 0 plane).
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.angle.cos() * self.radius, 0.0, self.angle.sin() * self.radius)
    }

    /// Back to phase 0 on the restore radius. Speeds are kept.
    pub fn reset(&mut self) {
        self.angle = 0.0;
        self.radius = self.restore_radius;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn starts_on_positive_x() {
        let orbit = OrbitState::new(156.0, 0.01);
        assert_eq!(orbit.position(), Vec3::new(156.0, 0.0, 0.0));
    }

    #[test]
    fn advance_scales_with_speed_and_multiplier() {
        let mut orbit = OrbitState::new(10.0, 0.5);
        orbit.advance(2.0, 1.5);
        assert!((orbit.angle - 1.5).abs() < 1e-6);

        orbit.angle = FRAC_PI_2;
        let p = orbit.position();
        assert!(p.x.abs() < 1e-5);
        assert!((p.z - 10.0).abs() < 1e-5);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn override_wins_over_derived_speed() {
        let mut orbit = OrbitState::new(2.5, 0.05);
        orbit.speed_override = Some(0.2);
        orbit.speed = 0.1;
        orbit.advance(1.0, 1.0);
        assert!((orbit.angle - 0.2).abs() < 1e-6);
    }

    #[test]
    fn reset_restores_phase_and_radius() {
        let mut orbit = OrbitState::new(80.0, 0.025);
        orbit.advance(100.0, 2.0);
        orbit.radius = 90.0;
        orbit.reset();
        assert_eq!(orbit.angle, 0.0);
        assert_eq!(orbit.radius, 80.0);
        assert_eq!(orbit.speed, 0.025);
    }
}
