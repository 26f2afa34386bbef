use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Every entity of the running level, in spawn order.
///
/// A level plus one ragdoll is a few dozen entities, so lookups are linear
/// scans. The scene never removes single entities: a restart drains it whole.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self { entities: Vec::with_capacity(32) }
    }

    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// True when `id` is live and tagged `tag`.
    pub fn has_tag(&self, id: EntityId, tag: &str) -> bool {
        self.get(id).is_some_and(|e| e.tag == tag)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    /// Used by the physics sync to copy body transforms back.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Entity> {
        self.entities.iter_mut()
    }

    pub fn ids_with_tag(&self, tag: &str) -> Vec<EntityId> {
        self.iter().filter(|e| e.tag == tag).map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Take every entity out, leaving the scene empty. Callers release the
    /// physics bodies the entities carry.
    pub fn drain(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.entities)
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
    use glam::Vec2;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id).with_pos(Vec2::new(150.0, 520.0)));
        assert_eq!(scene.get(id).unwrap().pos, Vec2::new(150.0, 520.0));
    }

    #[test]
    fn iteration_keeps_spawn_order() {
        let mut scene = Scene::new();
        for n in [3, 1, 2] {
            scene.spawn(Entity::new(EntityId(n)));
        }
        let ids: Vec<EntityId> = scene.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EntityId(3), EntityId(1), EntityId(2)]);
        assert!(scene.get(EntityId(4)).is_none());
    }

    #[test]
    fn tag_queries() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("spike"));
        scene.spawn(Entity::new(EntityId(2)).with_tag("goal"));
        scene.spawn(Entity::new(EntityId(3)).with_tag("spike"));

        assert_eq!(scene.ids_with_tag("spike"), vec![EntityId(1), EntityId(3)]);
        assert!(scene.has_tag(EntityId(2), "goal"));
        assert!(!scene.has_tag(EntityId(2), "spike"));
        assert!(!scene.has_tag(EntityId(9), "goal"));
    }

    #[test]
    fn drain_empties_scene() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)));
        scene.spawn(Entity::new(EntityId(2)));
        assert_eq!(scene.drain().len(), 2);
        assert_eq!(scene.len(), 0);
    }
}
