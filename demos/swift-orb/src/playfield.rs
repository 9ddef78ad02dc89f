//! Bodies that make up the play area: ground, walls, the orb and its marker.

use glam::Vec2;
use orb_engine::{
    BodyDesc, ColliderDesc, ColliderMaterial, EmitterComponent, EngineContext,
    Entity, EntityId, ParticleColorMode, SegmentColor, Tween, TweenLoop,
};

use crate::collision::{edge_filter, orb_filter, surface_filter};
use crate::settings::Settings;
use crate::sprites::Sprites;

pub const ORB_TAG: &str = "orb";
pub const MARKER_TAG: &str = "orb_marker";
pub const GROUND_TAG: &str = "ground";
pub const WALL_TAG: &str = "wall";
pub const EXPLOSION_TAG: &str = "explosion";

const GROUND_Y: f32 = 0.1;
const GROUND_THICKNESS: f32 = 1.0;
const WALL_THICKNESS: f32 = 20.0;

// Resting values of a default scene body.
const ORB_RESTITUTION: f32 = 0.2;
const ORB_FRICTION: f32 = 0.2;
const ORB_LINEAR_DAMPING: f32 = 0.1;

const MARKER_FADE_SECONDS: f32 = 1.0;

/// Ground strip along the bottom plus a wall loop around the frame.
pub fn spawn_arena(ctx: &mut EngineContext, settings: &Settings) {
    let (w, h) = (settings.world_width, settings.world_height);

    let ground = Entity::new(ctx.next_id()).with_tag(GROUND_TAG);
    ctx.spawn_with_body(
        ground,
        BodyDesc::fixed(ColliderDesc::Cuboid {
            half_width: w * 1.5,
            half_height: GROUND_THICKNESS / 2.0,
        })
        .with_position(Vec2::new(w / 2.0, GROUND_Y))
        .with_filter(surface_filter()),
        ColliderMaterial::default(),
    );

    let t = WALL_THICKNESS / 2.0;
    let walls = [
        (Vec2::new(-t, h / 2.0), t, h),
        (Vec2::new(w + t, h / 2.0), t, h),
        (Vec2::new(w / 2.0, -t), w, t),
        (Vec2::new(w / 2.0, h + t), w, t),
    ];
    for (center, half_width, half_height) in walls {
        let wall = Entity::new(ctx.next_id()).with_tag(WALL_TAG);
        ctx.spawn_with_body(
            wall,
            BodyDesc::fixed(ColliderDesc::Cuboid {
                half_width,
                half_height,
            })
            .with_position(center)
            .with_filter(edge_filter()),
            ColliderMaterial::default(),
        );
    }
}

/// Fresh orb at rest with gravity off. Its trail stays dark until launch.
pub fn spawn_orb(ctx: &mut EngineContext, settings: &Settings, sprites: &Sprites) -> EntityId {
    let r = settings.projectile_radius;
    let trail = EmitterComponent::stream(45.0)
        .with_speed_range(5.0, 30.0)
        .with_width(2.0)
        .with_lifetime(0.35)
        .with_color_mode(ParticleColorMode::Fixed(SegmentColor::Cyan))
        .paused();

    let orb = Entity::new(ctx.next_id())
        .with_tag(ORB_TAG)
        .with_scale(Vec2::splat(r * 2.0))
        .with_sprite(sprites.orb.clone())
        .with_emitter(trail);
    ctx.spawn_with_body(
        orb,
        BodyDesc::dynamic(ColliderDesc::Ball { radius: r })
            .with_position(settings.rest())
            .with_gravity_scale(0.0)
            .with_ccd(true)
            .with_linear_damping(ORB_LINEAR_DAMPING)
            .with_filter(orb_filter()),
        ColliderMaterial {
            restitution: ORB_RESTITUTION,
            friction: ORB_FRICTION,
            density: settings.orb_density,
        },
    )
}

/// Switch the orb's trail on or off.
pub fn set_trail(ctx: &mut EngineContext, orb: EntityId, on: bool) {
    if let Some(emitter) = ctx.scene.get_mut(orb).and_then(|e| e.emitter.as_mut()) {
        emitter.active = on;
    }
}

/// Pulsing ghost of the orb at its rest position.
pub fn spawn_marker(ctx: &mut EngineContext, settings: &Settings, sprites: &Sprites) -> EntityId {
    let id = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(id)
            .with_tag(MARKER_TAG)
            .with_pos(settings.rest())
            .with_scale(Vec2::splat(settings.projectile_radius * 2.0))
            .with_sprite(sprites.marker.clone()),
    );
    ctx.tweens.add(
        id,
        Tween::alpha(1.0, 0.0, MARKER_FADE_SECONDS).with_loop(TweenLoop::PingPong),
    );
    id
}

/// One-shot spark burst. The host entity despawns itself once spent.
pub fn spawn_explosion(ctx: &mut EngineContext, at: Vec2) -> EntityId {
    let burst = EmitterComponent::burst(28)
        .with_speed_range(80.0, 260.0)
        .with_width(3.0)
        .with_lifetime(0.6)
        .with_drag(2.5)
        .with_color_mode(ParticleColorMode::Palette(vec![
            SegmentColor::Yellow,
            SegmentColor::Orange,
            SegmentColor::White,
        ]));
    let id = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(id)
            .with_tag(EXPLOSION_TAG)
            .with_pos(at)
            .with_emitter(burst),
    );
    id
}
