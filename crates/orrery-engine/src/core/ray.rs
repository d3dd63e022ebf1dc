use glam::Vec3;

/// A half-line used for picking. `dir` is normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// Distance along the ray to the nearest sphere surface in front of the origin.
    /// An origin inside the sphere reports the exit point.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.dir);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_d = disc.sqrt();
        let near = -b - sqrt_d;
        if near >= 0.0 {
            return Some(near);
        }
        let far = -b + sqrt_d;
        (far >= 0.0).then_some(far)
    }

    /// Distance along the ray to a flat annulus (double sided).
    pub fn intersect_annulus(
        &self,
        center: Vec3,
        normal: Vec3,
        inner_radius: f32,
        outer_radius: f32,
    ) -> Option<f32> {
        let denom = normal.dot(self.dir);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = (center - self.origin).dot(normal) / denom;
        if t < 0.0 {
            return None;
        }
        let dist_sq = (self.at(t) - center).length_squared();
        (dist_sq >= inner_radius * inner_radius && dist_sq <= outer_radius * outer_radius)
            .then_some(t)
    }
}
