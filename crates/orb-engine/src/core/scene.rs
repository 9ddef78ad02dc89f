use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::sprite::RenderLayer;

/// Flat entity storage for a single game screen.
/// Sized for a handful of nodes per phase, not thousands.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(64),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove an entity by ID. Returns the removed entity if found.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    /// Remove every entity carrying `tag`, returning them in spawn order.
    pub fn despawn_by_tag(&mut self, tag: &str) -> Vec<Entity> {
        let mut removed = Vec::new();
        let mut i = 0;
        while i < self.entities.len() {
            if self.entities[i].tag == tag {
                removed.push(self.entities.remove(i));
            } else {
                i += 1;
            }
        }
        removed
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.iter().any(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    /// Active entities whose box contains `point`, front-most first.
    ///
    /// Front-most means higher render layer, then later spawn within a layer.
    pub fn nodes_at(&self, point: Vec2) -> Vec<&Entity> {
        let mut hits: Vec<(usize, &Entity)> = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.active && e.contains(point))
            .collect();
        hits.sort_by(|(ia, a), (ib, b)| {
            let la = a.sprite.as_ref().map_or(RenderLayer::Objects, |s| s.layer);
            let lb = b.sprite.as_ref().map_or(RenderLayer::Objects, |s| s.layer);
            lb.cmp(&la).then(ib.cmp(ia))
        });
        hits.into_iter().map(|(_, e)| e).collect()
    }

    /// Whether any active entity tagged `tag` is under `point`.
    pub fn hit_tag(&self, point: Vec2, tag: &str) -> bool {
        self.nodes_at(point).iter().any(|e| e.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Clear all entities.
    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
