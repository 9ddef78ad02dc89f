//! Target placement and spawning.

use glam::Vec2;
use orb_engine::{
    BodyDesc, ColliderDesc, ColliderMaterial, EngineContext, Entity, EntityId, Tween, TweenLoop,
};
use rand::Rng;

use crate::collision::target_filter;
use crate::settings::Settings;
use crate::sprites::Sprites;

pub const TARGET_TAG: &str = "target";

/// Random point anywhere across the width, in the upper two thirds of the height.
pub fn sample_position<R: Rng>(rng: &mut R, world: Vec2) -> Vec2 {
    Vec2::new(
        rng.random_range(0.0..=world.x),
        rng.random_range(world.y / 3.0..=world.y),
    )
}

/// Spawn a pulsing sensor target at a random position.
pub fn spawn_target(ctx: &mut EngineContext, settings: &Settings, sprites: &Sprites) -> EntityId {
    let pos = sample_position(&mut ctx.rng, settings.world_size());
    spawn_target_at(ctx, pos, settings, sprites)
}

pub fn spawn_target_at(
    ctx: &mut EngineContext,
    pos: Vec2,
    settings: &Settings,
    sprites: &Sprites,
) -> EntityId {
    let r = settings.projectile_radius;
    let entity = Entity::new(ctx.next_id())
        .with_tag(TARGET_TAG)
        .with_scale(Vec2::new(r * 2.0, r * 4.0))
        .with_sprite(sprites.target.clone());
    let id = ctx.spawn_with_body(
        entity,
        BodyDesc::fixed(ColliderDesc::CapsuleY {
            half_height: r,
            radius: r,
        })
        .with_position(pos)
        .with_sensor(true)
        .with_filter(target_filter()),
        ColliderMaterial::default(),
    );
    ctx.tweens.add(
        id,
        Tween::alpha(1.0, 0.5, settings.target_pulse_period).with_loop(TweenLoop::PingPong),
    );
    log::debug!("target {} at ({:.1}, {:.1})", id.0, pos.x, pos.y);
    id
}
