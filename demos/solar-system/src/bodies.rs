/// Body registry and static solar-system data.
///
/// Distances and radii are scene units, not to scale. Speeds are radians per
/// simulated second before the global multiplier.

use glam::{Quat, Vec3};
use orrery_engine::{Color, EntityId};

use crate::follow::FollowTargets;
use crate::orbit::OrbitState;

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_RADIUS: f32 = 54.0;
pub const SUN_COLOR: Color = Color::new(1.0, 1.0, 1.0);
pub const SUN_EMISSIVE: f32 = 1.0;

// ── Self-rotation rates (rad/s) ─────────────────────────────────────

pub const SUN_SPIN_RATE: f32 = 0.01;
pub const PLANET_SPIN_RATE: f32 = 0.1;
pub const MOON_SPIN_RATE: f32 = 0.5;

// ── Planets ──────────────────────────────────────────────────────────

/// Static description of one planet.
pub struct PlanetSpec {
    pub name: &'static str,
    pub radius: f32,
    pub distance: f32,
    pub speed: f32,
    pub texture: &'static str,
    pub has_moon: bool,
    pub has_ring: bool,
}

pub const PLANET_COLOR: Color = Color::new(0.667, 0.667, 0.667);

pub const PLANETS: [PlanetSpec; 8] = [
    PlanetSpec { name: "Mercury", radius: 0.5, distance: 80.0, speed: 0.025, texture: "mercury", has_moon: false, has_ring: false },
    PlanetSpec { name: "Venus", radius: 0.9, distance: 112.0, speed: 0.018, texture: "venus", has_moon: false, has_ring: false },
    PlanetSpec { name: "Earth", radius: 1.0, distance: 156.0, speed: 0.010, texture: "earth", has_moon: true, has_ring: false },
    PlanetSpec { name: "Mars", radius: 0.7, distance: 200.0, speed: 0.008, texture: "mars", has_moon: false, has_ring: false },
    PlanetSpec { name: "Jupiter", radius: 4.0, distance: 340.0, speed: 0.004, texture: "jupiter", has_moon: false, has_ring: false },
    PlanetSpec { name: "Saturn", radius: 3.5, distance: 500.0, speed: 0.003, texture: "saturn", has_moon: false, has_ring: true },
    PlanetSpec { name: "Uranus", radius: 2.0, distance: 740.0, speed: 0.002, texture: "uranus", has_moon: false, has_ring: false },
    PlanetSpec { name: "Neptune", radius: 1.9, distance: 1120.0, speed: 0.001, texture: "neptune", has_moon: false, has_ring: false },
];

// ── Moon ─────────────────────────────────────────────────────────────

pub const MOON_RADIUS_FACTOR: f32 = 0.27;
/// Gap between the parent's surface and the moon's orbit.
pub const MOON_ORBIT_GAP: f32 = 1.5;
/// Default moon speed relative to its parent planet.
pub const MOON_SPEED_FACTOR: f32 = 5.0;
pub const MOON_COLOR: Color = Color::new(0.867, 0.867, 0.867);

// ── Rings ────────────────────────────────────────────────────────────

pub const RING_INNER_FACTOR: f32 = 1.2;
pub const RING_OUTER_FACTOR: f32 = 2.2;
/// Ring plane rotation about the parent's local X axis.
pub const RING_TILT: f32 = 0.45;
pub const RING_OPACITY: f32 = 0.85;

// ── Registry ─────────────────────────────────────────────────────────

/// Index of a body in the registry. Stable for the registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub usize);

/// The Sun is always registered first.
pub const SUN: BodyId = BodyId(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Sun,
    Planet,
    Moon,
    Ring,
}

#[derive(Debug, Clone)]
pub struct BodyRecord {
    pub name: &'static str,
    pub kind: BodyKind,
    pub parent: Option<BodyId>,
    /// Sphere radius, or outer radius for rings.
    pub radius: f32,
    /// Inner radius for rings, 0 otherwise.
    pub inner_radius: f32,
    /// Fixed rotation about the local X axis.
    pub tilt: f32,
    pub orbit: Option<OrbitState>,
    /// Accumulated self-rotation about local Y.
    pub spin: f32,
    pub spin_rate: f32,
    pub texture: &'static str,
    pub color: Color,
    pub emissive: f32,
    pub opacity: f32,
    /// Scene entity mirroring this body, once spawned.
    pub entity: Option<EntityId>,
}

impl BodyRecord {
    fn new(name: &'static str, kind: BodyKind, radius: f32, texture: &'static str, color: Color) -> Self {
        Self {
            name,
            kind,
            parent: None,
            radius,
            inner_radius: 0.0,
            tilt: 0.0,
            orbit: None,
            spin: 0.0,
            spin_rate: 0.0,
            texture,
            color,
            emissive: 0.0,
            opacity: 1.0,
            entity: None,
        }
    }
}

/// Ordered collection of bodies, built once. Parents precede their children.
#[derive(Debug, Clone)]
pub struct BodyRegistry {
    bodies: Vec<BodyRecord>,
}

impl BodyRegistry {
    /// Sun, then each planet followed by its moon and ring.
    pub fn solar_system() -> Self {
        let mut bodies = Vec::with_capacity(1 + PLANETS.len() + 2);

        let mut sun = BodyRecord::new("Sun", BodyKind::Sun, SUN_RADIUS, "sun", SUN_COLOR);
        sun.spin_rate = SUN_SPIN_RATE;
        sun.emissive = SUN_EMISSIVE;
        bodies.push(sun);

        for spec in &PLANETS {
            let planet_id = BodyId(bodies.len());
            let mut planet = BodyRecord::new(spec.name, BodyKind::Planet, spec.radius, spec.texture, PLANET_COLOR);
            planet.orbit = Some(OrbitState::new(spec.distance, spec.speed));
            planet.spin_rate = PLANET_SPIN_RATE;
            bodies.push(planet);

            if spec.has_moon {
                let mut moon = BodyRecord::new(
                    "Moon",
                    BodyKind::Moon,
                    spec.radius * MOON_RADIUS_FACTOR,
                    "moon",
                    MOON_COLOR,
                );
                moon.parent = Some(planet_id);
                moon.orbit = Some(OrbitState::new(spec.radius + MOON_ORBIT_GAP, spec.speed * MOON_SPEED_FACTOR));
                moon.spin_rate = MOON_SPIN_RATE;
                bodies.push(moon);
            }

            if spec.has_ring {
                let mut ring = BodyRecord::new(
                    "Saturn Rings",
                    BodyKind::Ring,
                    spec.radius * RING_OUTER_FACTOR,
                    "saturn_ring",
                    Color::WHITE,
                );
                ring.parent = Some(planet_id);
                ring.inner_radius = spec.radius * RING_INNER_FACTOR;
                ring.tilt = RING_TILT;
                ring.opacity = RING_OPACITY;
                bodies.push(ring);
            }
        }

        Self { bodies }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn get(&self, id: BodyId) -> Option<&BodyRecord> {
        self.bodies.get(id.0)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut BodyRecord> {
        self.bodies.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &BodyRecord)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i), b))
    }

    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.bodies.iter().position(|b| b.name == name).map(BodyId)
    }

    pub fn name(&self, id: BodyId) -> Option<&'static str> {
        self.get(id).map(|b| b.name)
    }

    pub fn kind(&self, id: BodyId) -> Option<BodyKind> {
        self.get(id).map(|b| b.kind)
    }

    /// Planet ids in table order.
    pub fn planets(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.iter().filter(|(_, b)| b.kind == BodyKind::Planet).map(|(id, _)| id)
    }

    /// Rotation from the body's local frame to world space.
    pub fn orientation(&self, id: BodyId) -> Quat {
        let Some(body) = self.get(id) else { return Quat::IDENTITY };
        let parent = body.parent.map_or(Quat::IDENTITY, |p| self.orientation(p));
        parent * Quat::from_rotation_y(body.spin) * Quat::from_rotation_x(body.tilt)
    }

    /// Sum of Y rotations from the root down to this body.
    pub fn world_spin(&self, id: BodyId) -> f32 {
        let Some(body) = self.get(id) else { return 0.0 };
        body.spin + body.parent.map_or(0.0, |p| self.world_spin(p))
    }

    /// World position: orbit offset carried through the parent's spinning frame.
    pub fn world_position(&self, id: BodyId) -> Option<Vec3> {
        let body = self.get(id)?;
        let local = body.orbit.map_or(Vec3::ZERO, |o| o.position());
        match body.parent {
            None => Some(local),
            Some(parent_id) => {
                Some(self.world_position(parent_id)? + self.orientation(parent_id) * local)
            }
        }
    }

    /// Normal of a ring's plane in world space.
    pub fn ring_normal(&self, id: BodyId) -> Vec3 {
        self.orientation(id) * Vec3::Y
    }

    /// Advance orbits and self-rotation by `dt` seconds.
    /// The global multiplier scales orbits only.
    pub fn advance(&mut self, dt: f32, multiplier: f32) {
        for body in &mut self.bodies {
            if let Some(orbit) = &mut body.orbit {
                orbit.advance(dt, multiplier);
            }
            body.spin += body.spin_rate * dt;
        }
    }

    /// Every orbit back to phase 0 and every spin back to 0. Speeds are kept.
    pub fn reset(&mut self) {
        for body in &mut self.bodies {
            if let Some(orbit) = &mut body.orbit {
                orbit.reset();
            }
            body.spin = 0.0;
        }
    }

    /// Effective orbital speed, or None for bodies that do not orbit.
    pub fn speed(&self, id: BodyId) -> Option<f32> {
        self.get(id)?.orbit.map(|o| o.effective_speed())
    }

    /// Set a body's base speed and re-derive the default speed of its moons.
    pub fn set_speed(&mut self, id: BodyId, speed: f32) -> bool {
        let Some(orbit) = self.get_mut(id).and_then(|b| b.orbit.as_mut()) else {
            return false;
        };
        orbit.speed = speed;

        for body in &mut self.bodies {
            if body.kind == BodyKind::Moon && body.parent == Some(id) {
                if let Some(moon_orbit) = &mut body.orbit {
                    moon_orbit.speed = speed * MOON_SPEED_FACTOR;
                }
            }
        }
        true
    }

    /// Pin (or unpin with `None`) a body's speed regardless of its parent.
    pub fn override_speed(&mut self, id: BodyId, speed: Option<f32>) -> bool {
        match self.get_mut(id).and_then(|b| b.orbit.as_mut()) {
            Some(orbit) => {
                orbit.speed_override = speed;
                true
            }
            None => false,
        }
    }
}

impl FollowTargets for BodyRegistry {
    fn world_position(&self, id: BodyId) -> Option<Vec3> {
        BodyRegistry::world_position(self, id)
    }

    fn is_stationary(&self, id: BodyId) -> bool {
        self.kind(id) == Some(BodyKind::Sun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn registry_layout() {
        let reg = BodyRegistry::solar_system();
        // Sun + 8 planets + moon + ring
        assert_eq!(reg.len(), 11);
        assert_eq!(reg.kind(SUN), Some(BodyKind::Sun));
        assert_eq!(reg.planets().count(), 8);

        let earth = reg.find("Earth").unwrap();
        let moon = reg.find("Moon").unwrap();
        assert_eq!(reg.get(moon).unwrap().parent, Some(earth));
        assert_eq!(moon.0, earth.0 + 1);

        let saturn = reg.find("Saturn").unwrap();
        let ring = reg.find("Saturn Rings").unwrap();
        let ring_rec = reg.get(ring).unwrap();
        assert_eq!(ring_rec.parent, Some(saturn));
        assert!((ring_rec.inner_radius - 4.2).abs() < 1e-5);
        assert!((ring_rec.radius - 7.7).abs() < 1e-5);
        assert!(ring_rec.orbit.is_none());
    }

    #[test]
    fn initial_positions() {
        let reg = BodyRegistry::solar_system();
        assert_eq!(reg.world_position(SUN), Some(Vec3::ZERO));
        let earth = reg.find("Earth").unwrap();
        assert_eq!(reg.world_position(earth), Some(Vec3::new(156.0, 0.0, 0.0)));
        let moon = reg.find("Moon").unwrap();
        let m = reg.world_position(moon).unwrap();
        assert!((m - Vec3::new(158.5, 0.0, 0.0)).length() < 1e-4);
        let ring = reg.find("Saturn Rings").unwrap();
        assert_eq!(reg.world_position(ring), Some(Vec3::new(500.0, 0.0, 0.0)));
    }

    #[test]
    fn moon_rides_parent_spin() {
        let mut reg = BodyRegistry::solar_system();
        let earth = reg.find("Earth").unwrap();
        let moon = reg.find("Moon").unwrap();
        reg.get_mut(earth).unwrap().spin = FRAC_PI_2;

        // rotY(π/2) maps local +X to world -Z
        let m = reg.world_position(moon).unwrap();
        assert!((m - Vec3::new(156.0, 0.0, -2.5)).length() < 1e-4);
    }

    #[test]
    fn ring_normal_is_tilted() {
        let reg = BodyRegistry::solar_system();
        let ring = reg.find("Saturn Rings").unwrap();
        let n = reg.ring_normal(ring);
        assert!((n.y - RING_TILT.cos()).abs() < 1e-5);
        assert!((n.z - RING_TILT.sin()).abs() < 1e-5);
    }

    #[test]
    fn advance_scales_orbits_not_spin() {
        let mut reg = BodyRegistry::solar_system();
        let earth = reg.find("Earth").unwrap();
        reg.advance(10.0, 2.0);

        let rec = reg.get(earth).unwrap();
        assert!((rec.orbit.unwrap().angle - 0.2).abs() < 1e-6);
        assert!((rec.spin - 1.0).abs() < 1e-6);
        assert!((reg.get(SUN).unwrap().spin - 0.1).abs() < 1e-6);
        assert!(reg.get(SUN).unwrap().orbit.is_none());
    }

    #[test]
    fn reset_restores_initial_state() {
        let fresh = BodyRegistry::solar_system();
        let mut reg = fresh.clone();
        reg.advance(123.0, 3.0);
        reg.reset();
        for ((_, a), (_, b)) in reg.iter().zip(fresh.iter()) {
            assert_eq!(a.orbit, b.orbit);
            assert_eq!(a.spin, b.spin);
        }
    }

    #[test]
    fn earth_speed_rederives_moon_speed() {
        let mut reg = BodyRegistry::solar_system();
        let earth = reg.find("Earth").unwrap();
        let moon = reg.find("Moon").unwrap();

        assert!(reg.set_speed(earth, 0.02));
        assert_eq!(reg.speed(earth), Some(0.02));
        assert!((reg.speed(moon).unwrap() - 0.1).abs() < 1e-6);

        assert!(reg.override_speed(moon, Some(0.3)));
        reg.set_speed(earth, 0.03);
        assert_eq!(reg.speed(moon), Some(0.3));

        reg.override_speed(moon, None);
        assert!((reg.speed(moon).unwrap() - 0.15).abs() < 1e-6);
    }

    #[test]
    fn speed_of_non_orbiting_body() {
        let mut reg = BodyRegistry::solar_system();
        assert_eq!(reg.speed(SUN), None);
        assert!(!reg.set_speed(SUN, 0.01));
        let ring = reg.find("Saturn Rings").unwrap();
        assert!(!reg.override_speed(ring, Some(1.0)));
    }
}
