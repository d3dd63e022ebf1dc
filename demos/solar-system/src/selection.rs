/// Ray picking against the body registry and the click/hover precedence rules.

use orrery_engine::Ray;

use crate::bodies::{BodyId, BodyKind, BodyRegistry};

/// One body crossed by a picking ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub body: BodyId,
    /// Distance from the ray origin.
    pub distance: f32,
}

/// Outcome of a click: the body to follow and the body to describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub track: BodyId,
    pub info: BodyId,
}

/// Every body the ray crosses, nearest first.
pub fn raycast(ray: &Ray, bodies: &BodyRegistry) -> Vec<Hit> {
    let mut hits: Vec<Hit> = bodies
        .iter()
        .filter_map(|(id, body)| {
            let center = bodies.world_position(id)?;
            let distance = match body.kind {
                BodyKind::Ring => ray.intersect_annulus(
                    center,
                    bodies.ring_normal(id),
                    body.inner_radius,
                    body.radius,
                ),
                BodyKind::Sun | BodyKind::Planet | BodyKind::Moon => {
                    ray.intersect_sphere(center, body.radius)
                }
            }?;
            Some(Hit { body: id, distance })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Apply click precedence to distance-ordered hits. The nearest hit decides:
/// - ring: follow its planet, describe the ring
/// - planet: follow it; describe its ring if that ring was also hit anywhere
/// - moon: follow its planet, describe the moon
/// - sun: track the sun
pub fn resolve_click(hits: &[Hit], bodies: &BodyRegistry) -> Option<Selection> {
    let first = hits.first()?;
    let body = bodies.get(first.body)?;

    let selection = match body.kind {
        BodyKind::Sun => Selection { track: first.body, info: first.body },
        BodyKind::Ring | BodyKind::Moon => {
            let parent = body.parent.unwrap_or(first.body);
            Selection { track: parent, info: first.body }
        }
        BodyKind::Planet => {
            let ring = hits.iter().find(|h| {
                bodies
                    .get(h.body)
                    .is_some_and(|b| b.kind == BodyKind::Ring && b.parent == Some(first.body))
            });
            Selection {
                track: first.body,
                info: ring.map_or(first.body, |h| h.body),
            }
        }
    };
    Some(selection)
}

/// Body named by the hover tooltip: the nearest hit of any kind.
pub fn resolve_hover(hits: &[Hit]) -> Option<BodyId> {
    hits.first().map(|h| h.body)
}
