use crate::api::types::EntityId;
use crate::core::scene::Scene;
use crate::systems::effects::EffectsState;

/// Tick all emitters attached to active entities, spawning particles into the effects state.
/// Returns entities that only existed to host a burst which has now fired
/// (no sprite, no body) so the caller can despawn them.
pub fn tick_emitters(scene: &mut Scene, effects: &mut EffectsState, dt: f32) -> Vec<EntityId> {
    let mut spent = Vec::new();
    for entity in scene.iter_mut() {
        if !entity.active {
            continue;
        }
        let Some(emitter) = entity.emitter.as_mut() else {
            continue;
        };
        let count = emitter.tick(dt);
        if count > 0 {
            effects.spawn_from(entity.pos, count, emitter);
        }
        if emitter.is_spent() && entity.sprite.is_none() && !has_body(entity) {
            spent.push(entity.id);
        }
    }
    spent
}

#[cfg(feature = "physics")]
fn has_body(entity: &crate::components::entity::Entity) -> bool {
    entity.body.is_some()
}

#[cfg(not(feature = "physics"))]
fn has_body(_entity: &crate::components::entity::Entity) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::emitter::EmitterComponent;
    use crate::components::entity::Entity;
    use crate::components::sprite::SpriteComponent;
    use glam::Vec2;

    #[test]
    fn burst_spawns_at_entity_pos_and_reports_spent() {
        let mut scene = Scene::new();
        let emitter = EmitterComponent::burst(5);
        scene.spawn(
            Entity::new(EntityId(1))
                .with_pos(Vec2::new(100.0, 200.0))
                .with_emitter(emitter),
        );

        let mut effects = EffectsState::new(42);
        let spent = tick_emitters(&mut scene, &mut effects, 0.016);

        assert_eq!(effects.particles.len(), 5);
        assert!(effects.particles.iter().all(|p| p.position == Vec2::new(100.0, 200.0)));
        assert_eq!(spent, vec![EntityId(1)]);
    }

    #[test]
    fn trail_on_visible_entity_is_never_spent() {
        let mut scene = Scene::new();
        scene.spawn(
            Entity::new(EntityId(1))
                .with_sprite(SpriteComponent::default())
                .with_emitter(EmitterComponent::stream(60.0)),
        );
        let mut effects = EffectsState::new(42);
        let spent = tick_emitters(&mut scene, &mut effects, 0.5);
        assert_eq!(effects.particles.len(), 30);
        assert!(spent.is_empty());
    }

    #[test]
    fn inactive_entity_is_skipped() {
        let mut scene = Scene::new();
        let emitter = EmitterComponent::burst(5);
        let mut entity = Entity::new(EntityId(1)).with_emitter(emitter);
        entity.active = false;
        scene.spawn(entity);

        let mut effects = EffectsState::new(42);
        tick_emitters(&mut scene, &mut effects, 0.016);
        assert!(effects.particles.is_empty());
    }
}
