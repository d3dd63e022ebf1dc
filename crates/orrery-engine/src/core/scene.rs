use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Entities in spawn order. Bodies are spawned once at init and never
/// removed, so lookups scan a short Vec.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(32),
        }
    }

    /// Add an entity. Returns false (and keeps the existing one) on a duplicate ID.
    pub fn spawn(&mut self, entity: Entity) -> bool {
        if self.get(entity.id).is_some() {
            log::warn!("entity {:?} already spawned, ignoring `{}`", entity.id, entity.tag);
            return false;
        }
        self.entities.push(entity);
        true
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// All entities, in the order the host draws them.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn spawn_then_move_in_place() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        assert!(scene.spawn(Entity::new(id).with_pos(Vec3::new(156.0, 0.0, 0.0))));
        scene.get_mut(id).unwrap().spin = 0.5;

        let e = scene.get(id).unwrap();
        assert_eq!(e.pos, Vec3::new(156.0, 0.0, 0.0));
        assert_eq!(e.spin, 0.5);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(4)).with_tag("Mars"));
        assert!(!scene.spawn(Entity::new(EntityId(4)).with_tag("Phobos")));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(EntityId(4)).unwrap().tag, "Mars");
    }

    #[test]
    fn spawn_order_is_kept() {
        let mut scene = Scene::new();
        for (i, name) in ["Sun", "Mercury", "Venus"].iter().enumerate() {
            scene.spawn(Entity::new(EntityId(i as u32 + 1)).with_tag(*name));
        }
        let tags: Vec<&str> = scene.iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, ["Sun", "Mercury", "Venus"]);
        assert_eq!(scene.find_by_tag("Venus").unwrap().id, EntityId(3));
        assert!(scene.find_by_tag("Pluto").is_none());
    }
}
