use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::emitter::EmitterComponent;
use crate::components::sprite::SpriteComponent;
#[cfg(feature = "physics")]
use crate::core::physics::PhysicsBody;

/// One node of the scene: a position and box plus whatever parts it needs.
/// Parts are plain optional fields rather than ECS storages.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    /// Lookup key for `Scene::find_by_tag` and button hit-tests.
    pub tag: String,
    /// Inactive entities are not drawn, emit nothing and are skipped by hit-tests.
    pub active: bool,
    pub pos: Vec2,
    /// Radians. Copied back from the body for dynamic entities.
    pub rotation: f32,
    /// Size in world units, centered on `pos`.
    pub scale: Vec2,
    pub sprite: Option<SpriteComponent>,
    pub emitter: Option<EmitterComponent>,
    #[cfg(feature = "physics")]
    pub body: Option<PhysicsBody>,
}

impl Entity {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            sprite: None,
            emitter: None,
            #[cfg(feature = "physics")]
            body: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteComponent) -> Self {
        self.sprite = Some(sprite);
        self
    }

    pub fn with_emitter(mut self, emitter: EmitterComponent) -> Self {
        self.emitter = Some(emitter);
        self
    }

    #[cfg(feature = "physics")]
    pub fn with_body(mut self, body: PhysicsBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Whether `point` lies inside the entity's box (`pos` ± `scale / 2`).
    pub fn contains(&self, point: Vec2) -> bool {
        let half = self.scale.abs() * 0.5;
        let d = (point - self.pos).abs();
        d.x <= half.x && d.y <= half.y
    }
}
