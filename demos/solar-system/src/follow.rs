/// Camera-follow controller.
///
/// Two modes share the one camera:
/// - **Free**: the damped `OrbitControls` own the camera and orbit a fixed target.
/// - **Follow**: the camera chases a selected body. Each frame it is translated
///   by the body's displacement, so the camera-to-body offset only changes
///   when the user drags (re-orients around the body) or zooms.
///
/// Invariants: following implies the tracked body is not stationary, and
/// dragging implies following.

use glam::{Vec2, Vec3};
use orrery_engine::{Camera3D, OrbitControls, Spherical};

use crate::bodies::BodyId;

/// World-space queries the controller needs from whatever owns the bodies.
pub trait FollowTargets {
    fn world_position(&self, id: BodyId) -> Option<Vec3>;
    /// Stationary bodies (the Sun) are viewed in free mode instead of followed.
    fn is_stationary(&self, id: BodyId) -> bool;
}

#[derive(Debug, Clone, Copy)]
pub struct FollowConfig {
    /// Azimuth change per pixel of horizontal drag.
    pub theta_per_pixel: f32,
    /// Polar change per pixel of vertical drag.
    pub phi_per_pixel: f32,
    /// Fractional radius change per wheel event.
    pub zoom_step: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Polar angle stays inside `[polar_margin, π - polar_margin]`.
    pub polar_margin: f32,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            theta_per_pixel: 0.01,
            phi_per_pixel: 0.01,
            zoom_step: 0.05,
            min_radius: 2.0,
            max_radius: 1000.0,
            polar_margin: 0.1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CameraFollow {
    config: FollowConfig,
    tracked: Option<BodyId>,
    following: bool,
    /// Camera position relative to the tracked body.
    offset: Vec3,
    /// Spherical form of `offset`, refreshed on every drag/zoom.
    spherical: Spherical,
    /// Tracked body's position at the last chase update.
    previous_target: Vec3,
    dragging: bool,
    previous_pointer: Vec2,
}

impl CameraFollow {
    pub fn new(config: FollowConfig) -> Self {
        Self {
            config,
            tracked: None,
            following: false,
            offset: Vec3::ZERO,
            spherical: Spherical::default(),
            previous_target: Vec3::ZERO,
            dragging: false,
            previous_pointer: Vec2::ZERO,
        }
    }

    pub fn tracked(&self) -> Option<BodyId> {
        self.tracked
    }

    pub fn is_following(&self) -> bool {
        self.following
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn spherical(&self) -> Spherical {
        self.spherical
    }

    pub fn config(&self) -> &FollowConfig {
        &self.config
    }

    /// Track `id`. Non-stationary bodies enter follow mode from the current
    /// camera pose; stationary ones fall back to free mode around them.
    pub fn select(
        &mut self,
        id: BodyId,
        targets: &impl FollowTargets,
        camera: &Camera3D,
        controls: &mut OrbitControls,
    ) {
        let Some(target) = targets.world_position(id) else {
            log::warn!("cannot track body {}: no position", id.0);
            return;
        };
        self.tracked = Some(id);

        if targets.is_stationary(id) {
            self.release(target, controls);
            return;
        }

        self.following = true;
        self.previous_target = target;
        self.offset = camera.position - target;
        self.spherical = Spherical::from_vec3(self.offset);
        controls.enabled = false;
        log::debug!("follow mode on body {} (offset {:?})", id.0, self.offset);
    }

    /// Track a stationary `home` body (the Sun) in free mode centered on the origin.
    pub fn go_home(&mut self, home: BodyId, controls: &mut OrbitControls) {
        self.tracked = Some(home);
        self.release(Vec3::ZERO, controls);
    }

    /// Back to the initial state: home tracked, free mode, nothing pending.
    pub fn reset(&mut self, home: BodyId, controls: &mut OrbitControls) {
        self.go_home(home, controls);
        self.offset = Vec3::ZERO;
        self.spherical = Spherical::default();
        self.previous_pointer = Vec2::ZERO;
    }

    fn release(&mut self, target: Vec3, controls: &mut OrbitControls) {
        if self.following {
            log::debug!("follow mode off");
        }
        self.following = false;
        self.dragging = false;
        self.previous_target = Vec3::ZERO;
        controls.enabled = true;
        controls.target = target;
    }

    /// Translate the camera by the tracked body's displacement since the last call.
    pub fn chase(&mut self, targets: &impl FollowTargets, camera: &mut Camera3D) {
        let Some(id) = self.active_target() else { return };
        if targets.is_stationary(id) {
            return;
        }
        let Some(current) = targets.world_position(id) else { return };

        camera.position += current - self.previous_target;
        self.previous_target = current;
        camera.look_at(current);
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        if self.active_target().is_none() {
            return;
        }
        self.dragging = true;
        self.previous_pointer = pos;
        self.spherical = Spherical::from_vec3(self.offset);
    }

    /// Re-orient around the tracked body. No-op unless dragging in follow mode.
    pub fn pointer_move(&mut self, pos: Vec2, targets: &impl FollowTargets, camera: &mut Camera3D) {
        if !self.dragging {
            return;
        }
        let Some(id) = self.active_target() else { return };

        let delta = pos - self.previous_pointer;
        self.previous_pointer = pos;

        self.spherical = Spherical::from_vec3(self.offset);
        self.spherical.theta -= delta.x * self.config.theta_per_pixel;
        self.spherical.phi -= delta.y * self.config.phi_per_pixel;
        self.spherical.clamp_phi(self.config.polar_margin);
        self.offset = self.spherical.to_vec3();

        if let Some(target) = targets.world_position(id) {
            camera.position = target + self.offset;
            camera.look_at(target);
        }
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    /// Dolly towards/away from the tracked body. Returns true when the event
    /// was consumed and the host should suppress page scrolling.
    pub fn wheel(&mut self, delta_y: f32, targets: &impl FollowTargets, camera: &mut Camera3D) -> bool {
        let Some(id) = self.active_target() else { return false };
        let Some(target) = targets.world_position(id) else { return false };

        self.spherical = Spherical::from_vec3(self.offset);
        self.spherical.radius *= 1.0 + sign(delta_y) * self.config.zoom_step;
        self.spherical.clamp_radius(self.config.min_radius, self.config.max_radius);
        self.offset = self.spherical.to_vec3();

        camera.position = target + self.offset;
        camera.look_at(target);
        true
    }

    fn active_target(&self) -> Option<BodyId> {
        if self.following { self.tracked } else { None }
    }
}

impl Default for CameraFollow {
    fn default() -> Self {
        Self::new(FollowConfig::default())
    }
}

/// -1, 0 or 1. Unlike `f32::signum`, zero stays zero.
fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;
    use crate::bodies::{BodyRegistry, SUN};
    use orrery_engine::{wrap_angle, OrbitControlsConfig};

    fn camera() -> Camera3D {
        let mut cam = Camera3D::new(75.0, 1.0, 5000.0).with_position(Vec3::new(0.0, 80.0, 180.0));
        cam.resize(1600.0, 900.0);
        cam.look_at(Vec3::ZERO);
        cam
    }

    struct Fixture {
        bodies: BodyRegistry,
        camera: Camera3D,
        controls: OrbitControls,
        follow: CameraFollow,
    }

    fn fixture() -> Fixture {
        Fixture {
            bodies: BodyRegistry::solar_system(),
            camera: camera(),
            controls: OrbitControls::new(OrbitControlsConfig::default()),
            follow: CameraFollow::default(),
        }
    }

    impl Fixture {
        fn select(&mut self, name: &str) -> BodyId {
            let id = self.bodies.find(name).unwrap();
            self.follow.select(id, &self.bodies, &self.camera, &mut self.controls);
            id
        }

        fn frame(&mut self, dt: f32) {
            self.bodies.advance(dt, 1.0);
            self.follow.chase(&self.bodies, &mut self.camera);
        }
    }

    #[test]
    fn chase_keeps_offset_for_every_body() {
        for (_, body) in BodyRegistry::solar_system().iter() {
            if body.name == "Sun" || body.name == "Saturn Rings" {
                continue;
            }
            let mut f = fixture();
            let id = f.select(body.name);
            assert!(f.follow.is_following());
            let start = f.camera.position - f.bodies.world_position(id).unwrap();

            for _ in 0..120 {
                f.frame(0.5);
            }
            let now = f.camera.position - f.bodies.world_position(id).unwrap();
            assert!((now - start).length() < 5e-2, "{}: offset drifted {:?} -> {:?}", body.name, start, now);
            assert!((f.camera.target() - f.bodies.world_position(id).unwrap()).length() < 1e-3);
        }
    }

    #[test]
    fn entering_follow_disables_controls() {
        let mut f = fixture();
        let earth = f.select("Earth");
        assert_eq!(f.follow.tracked(), Some(earth));
        assert!(!f.controls.enabled);
        assert_eq!(f.follow.offset(), Vec3::new(-156.0, 80.0, 180.0));
    }

    #[test]
    fn horizontal_drag_changes_theta_only() {
        let mut f = fixture();
        f.select("Mars");
        f.follow.pointer_down(Vec2::new(100.0, 100.0));
        let before = f.follow.spherical();

        f.follow.pointer_move(Vec2::new(137.0, 100.0), &f.bodies, &mut f.camera);
        let after = f.follow.spherical();

        let expected = before.theta - 37.0 * 0.01;
        assert!(wrap_angle(after.theta - expected).abs() < 1e-4);
        assert!((after.phi - before.phi).abs() < 1e-5);
        assert!((after.radius - before.radius).abs() < 1e-3);

        let target = f.bodies.world_position(f.bodies.find("Mars").unwrap()).unwrap();
        assert!((f.camera.position - (target + f.follow.offset())).length() < 1e-3);
        assert_eq!(f.camera.target(), target);
    }

    #[test]
    fn phi_stays_clamped() {
        let mut f = fixture();
        f.select("Venus");
        f.follow.pointer_down(Vec2::ZERO);
        let margin = f.follow.config().polar_margin;

        for step in 1..=50 {
            f.follow.pointer_move(Vec2::new(0.0, step as f32 * 40.0), &f.bodies, &mut f.camera);
            let phi = f.follow.spherical().phi;
            assert!(phi >= margin - 1e-5 && phi <= PI - margin + 1e-5, "phi {phi}");
        }
        // Dragging down tips the camera towards the pole above the body.
        assert!((f.follow.spherical().phi - margin).abs() < 1e-4);

        for step in 1..=100 {
            f.follow.pointer_move(Vec2::new(0.0, 2000.0 - step as f32 * 40.0), &f.bodies, &mut f.camera);
        }
        assert!((f.follow.spherical().phi - (PI - margin)).abs() < 1e-4);
    }

    #[test]
    fn drag_requires_button_and_follow_mode() {
        let mut f = fixture();
        let before = f.camera.position;
        f.follow.pointer_down(Vec2::ZERO);
        assert!(!f.follow.is_dragging());
        f.follow.pointer_move(Vec2::new(50.0, 50.0), &f.bodies, &mut f.camera);
        assert_eq!(f.camera.position, before);

        f.select("Earth");
        f.follow.pointer_move(Vec2::new(90.0, 50.0), &f.bodies, &mut f.camera);
        assert_eq!(f.camera.position, before);

        f.follow.pointer_down(Vec2::ZERO);
        assert!(f.follow.is_dragging());
        f.follow.pointer_up();
        assert!(!f.follow.is_dragging());
    }

    #[test]
    fn zoom_scales_radius() {
        let mut f = fixture();
        f.select("Jupiter");
        let r0 = f.follow.offset().length();

        assert!(f.follow.wheel(120.0, &f.bodies, &mut f.camera));
        assert!((f.follow.spherical().radius - r0 * 1.05).abs() < 1e-2);

        f.follow.wheel(-3.0, &f.bodies, &mut f.camera);
        assert!((f.follow.spherical().radius - r0 * 1.05 * 0.95).abs() < 1e-2);

        f.follow.wheel(0.0, &f.bodies, &mut f.camera);
        assert!((f.follow.spherical().radius - r0 * 1.05 * 0.95).abs() < 1e-2);
    }

    #[test]
    fn zoom_out_stops_at_max_radius() {
        let mut f = fixture();
        f.select("Neptune");
        // Put the camera 999 units out along the current direction.
        let target = f.bodies.world_position(f.bodies.find("Neptune").unwrap()).unwrap();
        let dir = f.follow.offset().normalize();
        f.camera.position = target + dir * 999.0;
        f.select("Neptune");

        for _ in 0..5 {
            f.follow.wheel(1.0, &f.bodies, &mut f.camera);
            assert!(f.follow.spherical().radius <= 1000.0 + 1e-3);
        }
        assert!((f.follow.spherical().radius - 1000.0).abs() < 1e-2);
        assert!(((f.camera.position - target).length() - 1000.0).abs() < 1e-1);
    }

    #[test]
    fn zoom_in_stops_at_min_radius() {
        let mut f = fixture();
        f.select("Mercury");
        for _ in 0..200 {
            f.follow.wheel(-1.0, &f.bodies, &mut f.camera);
        }
        assert!((f.follow.spherical().radius - 2.0).abs() < 1e-4);
    }

    #[test]
    fn wheel_ignored_in_free_mode() {
        let mut f = fixture();
        let before = f.camera.position;
        assert!(!f.follow.wheel(1.0, &f.bodies, &mut f.camera));
        assert_eq!(f.camera.position, before);
    }

    #[test]
    fn selecting_sun_returns_to_free_mode() {
        let mut f = fixture();
        f.select("Saturn");
        f.controls.target = Vec3::new(5.0, 5.0, 5.0);
        f.follow.pointer_down(Vec2::ZERO);

        f.select("Sun");
        assert_eq!(f.follow.tracked(), Some(SUN));
        assert!(!f.follow.is_following());
        assert!(!f.follow.is_dragging());
        assert!(f.controls.enabled);
        assert_eq!(f.controls.target, Vec3::ZERO);

        // Also from free mode.
        f.controls.target = Vec3::ONE;
        f.select("Sun");
        assert_eq!(f.controls.target, Vec3::ZERO);
        assert!(!f.follow.is_following());
    }

    #[test]
    fn chase_is_noop_in_free_mode() {
        let mut f = fixture();
        let before = f.camera.position;
        f.frame(10.0);
        assert_eq!(f.camera.position, before);
    }

    #[test]
    fn go_home_resets_target() {
        let mut f = fixture();
        f.select("Uranus");
        f.follow.go_home(SUN, &mut f.controls);
        assert_eq!(f.follow.tracked(), Some(SUN));
        assert!(!f.follow.is_following());
        assert!(f.controls.enabled);
        assert_eq!(f.controls.target, Vec3::ZERO);
    }

    #[test]
    fn sign_keeps_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(3.0), 1.0);
        assert_eq!(sign(-0.2), -1.0);
    }
}
