//! Oscillating obstacles.

use glam::Vec2;
use orb_engine::{
    BodyDesc, ColliderDesc, ColliderMaterial, EngineContext, Entity, EntityId, Tween, TweenLoop,
};

use crate::collision::barrier_filter;
use crate::settings::Settings;
use crate::sprites::Sprites;

pub const BARRIER_TAG: &str = "barrier";

/// Where a barrier starts and which way it sweeps first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarrierSpec {
    pub origin: Vec2,
    /// +1 sweeps right first, -1 left.
    pub direction: f32,
}

/// Three staggered rows: center, left, right.
pub fn layout(settings: &Settings) -> [BarrierSpec; 3] {
    let w = settings.world_width;
    [
        BarrierSpec {
            origin: Vec2::new(w / 2.0, 250.0),
            direction: 1.0,
        },
        BarrierSpec {
            origin: Vec2::new(100.0, 400.0),
            direction: -1.0,
        },
        BarrierSpec {
            origin: Vec2::new(w - 100.0, 550.0),
            direction: 1.0,
        },
    ]
}

/// Spawn every barrier in the layout, sweeping back and forth forever.
pub fn spawn_barriers(ctx: &mut EngineContext, settings: &Settings, sprites: &Sprites) -> Vec<EntityId> {
    layout(settings)
        .iter()
        .map(|spec| spawn_barrier(ctx, spec, settings, sprites))
        .collect()
}

fn spawn_barrier(
    ctx: &mut EngineContext,
    spec: &BarrierSpec,
    settings: &Settings,
    sprites: &Sprites,
) -> EntityId {
    let radius = settings.projectile_radius * 2.0;
    let entity = Entity::new(ctx.next_id())
        .with_tag(BARRIER_TAG)
        .with_scale(Vec2::splat(radius * 2.0))
        .with_sprite(sprites.barrier.clone());
    let id = ctx.spawn_with_body(
        entity,
        BodyDesc::kinematic(ColliderDesc::Ball { radius })
            .with_position(spec.origin)
            .with_filter(barrier_filter()),
        ColliderMaterial::default(),
    );
    ctx.tweens.add(
        id,
        Tween::offset_x(spec.direction * settings.barrier_amplitude, settings.barrier_period)
            .with_loop(TweenLoop::PingPong),
    );
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_the_playfield() {
        let specs = layout(&Settings::default());
        assert_eq!(specs[0].origin, Vec2::new(187.5, 250.0));
        assert_eq!(specs[1].origin, Vec2::new(100.0, 400.0));
        assert_eq!(specs[2].origin, Vec2::new(275.0, 550.0));
        assert_eq!(specs[1].direction, -1.0);
    }

    #[test]
    fn barriers_sweep_and_return() {
        let mut ctx = EngineContext::new();
        let settings = Settings::default();
        let ids = spawn_barriers(&mut ctx, &settings, &Sprites::default());
        assert_eq!(ids.len(), 3);

        let dt = 1.0 / 60.0;
        for _ in 0..60 {
            ctx.step_systems(dt);
        }
        let right = ctx.scene.get(ids[0]).unwrap().pos.x;
        let left = ctx.scene.get(ids[1]).unwrap().pos.x;
        assert!((right - 257.5).abs() < 0.5, "center barrier at {right}");
        assert!((left - 30.0).abs() < 0.5, "left barrier at {left}");

        for _ in 0..60 {
            ctx.step_systems(dt);
        }
        let back = ctx.scene.get(ids[0]).unwrap().pos.x;
        assert!((back - 187.5).abs() < 0.5, "center barrier back at {back}");
    }
}
