use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::api::types::{EntityId, GameEvent};
use crate::assets::manifest::{AssetError, AssetManifest};
use crate::core::scene::Scene;
use crate::core::time::{TimerFired, TimerId, Timers};
use crate::extensions::tween::TweenState;
use crate::input::queue::InputQueue;
use crate::systems::effects::EffectsState;
use crate::systems::emitter::tick_emitters;
use crate::systems::text::{set_label, FontConfig, Label};
use crate::components::entity::Entity;
#[cfg(feature = "physics")]
use crate::core::physics::{BodyDesc, ColliderMaterial, CollisionPair, PhysicsWorld};

/// Engine configuration, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    pub max_instances: usize,
    /// Maximum (layer, blend) batches per frame.
    pub max_batches: usize,
    pub max_effects_vertices: usize,
    /// Maximum game events per frame; extra events are dropped.
    pub max_events: usize,
    /// World gravity. Y-up: negative Y pulls down.
    #[cfg(feature = "physics")]
    pub gravity: Vec2,
    /// Physics time multiplier; each step simulates `fixed_dt * physics_speed`.
    #[cfg(feature = "physics")]
    pub physics_speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 375.0,
            world_height: 667.0,
            max_instances: 512,
            max_batches: 16,
            max_effects_vertices: 16384,
            max_events: 32,
            #[cfg(feature = "physics")]
            gravity: Vec2::ZERO,
            #[cfg(feature = "physics")]
            physics_speed: 1.0,
        }
    }
}

/// The contract every game fulfills.
pub trait Game {
    /// Engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Spawn the first screen.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step: react to input, fired timers and last step's collisions.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Resolve named sprites once the host has loaded the asset manifest.
    /// An error here aborts startup.
    fn load_assets(&mut self, _manifest: &AssetManifest, _ctx: &mut EngineContext) -> Result<(), AssetError> {
        Ok(())
    }
}

/// Mutable access to engine state, passed to `Game::init` and `Game::update`.
pub struct EngineContext {
    pub scene: Scene,
    pub effects: EffectsState,
    pub tweens: TweenState,
    pub timers: Timers,
    pub events: Vec<GameEvent>,
    pub font: FontConfig,
    /// Seeded game randomness (target placement and the like).
    pub rng: Pcg32,
    world_size: Vec2,
    max_events: usize,
    fired: Vec<TimerFired>,
    next_id: u32,
    #[cfg(feature = "physics")]
    pub physics: PhysicsWorld,
    #[cfg(feature = "physics")]
    collision_events: Vec<CollisionPair>,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default(), 42)
    }

    /// Build a context sized and tuned by `config`, with all randomness derived from `seed`.
    pub fn with_config(config: &GameConfig, seed: u64) -> Self {
        #[cfg(feature = "physics")]
        let physics = {
            let mut world = PhysicsWorld::new(config.gravity);
            world.set_dt(config.fixed_dt * config.physics_speed);
            world
        };
        Self {
            scene: Scene::new(),
            effects: EffectsState::with_capacity(seed, config.max_effects_vertices),
            tweens: TweenState::new(),
            timers: Timers::new(),
            events: Vec::with_capacity(config.max_events),
            font: FontConfig::default(),
            rng: Pcg32::seed_from_u64(seed),
            world_size: Vec2::new(config.world_width, config.world_height),
            max_events: config.max_events,
            fired: Vec::new(),
            next_id: 1,
            #[cfg(feature = "physics")]
            physics,
            #[cfg(feature = "physics")]
            collision_events: Vec::new(),
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn world_size(&self) -> Vec2 {
        self.world_size
    }

    /// Emit a game event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() >= self.max_events {
            log::warn!("game event buffer full, dropping kind {}", event.kind);
            return;
        }
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    // -- Timers --

    /// Advance timers and queue their messages for the coming `Game::update`.
    pub fn tick_timers(&mut self, dt: f32) {
        self.fired.clear();
        self.timers.tick(dt, &mut self.fired);
    }

    /// Timer messages produced since the previous update.
    pub fn fired_timers(&self) -> &[TimerFired] {
        &self.fired
    }

    /// Cancel a timer and drop any message it already queued for this step.
    pub fn cancel_timer(&mut self, id: TimerId) {
        self.timers.cancel(id);
        self.fired.retain(|f| f.id != id);
    }

    // -- Labels --

    /// Replace the label tagged `label.tag`.
    pub fn set_label(&mut self, label: &Label) {
        let mut next = self.next_id;
        set_label(&mut self.scene, label, &self.font, &mut || {
            let id = EntityId(next);
            next += 1;
            id
        });
        self.next_id = next;
    }

    // -- Entities --

    /// Despawn an entity with its tweens and (if present) its physics body.
    pub fn despawn(&mut self, id: EntityId) {
        self.tweens.remove_entity(id);
        if let Some(entity) = self.scene.despawn(id) {
            self.release_body(&entity);
        }
    }

    /// Despawn every entity tagged `tag`. Returns how many went away.
    pub fn despawn_by_tag(&mut self, tag: &str) -> usize {
        let removed = self.scene.despawn_by_tag(tag);
        for entity in &removed {
            self.tweens.remove_entity(entity.id);
            self.release_body(entity);
        }
        removed.len()
    }

    #[cfg(feature = "physics")]
    fn release_body(&mut self, entity: &Entity) {
        if let Some(body) = &entity.body {
            self.physics.remove_body(body);
        }
    }

    #[cfg(not(feature = "physics"))]
    fn release_body(&mut self, _entity: &Entity) {}

    // -- Physics convenience methods --

    /// Spawn an entity with a physics body placed at `desc.position`.
    #[cfg(feature = "physics")]
    pub fn spawn_with_body(&mut self, entity: Entity, desc: BodyDesc, material: ColliderMaterial) -> EntityId {
        let id = entity.id;
        let body = self.physics.create_body(id, &desc, material);
        self.scene.spawn(entity.with_pos(desc.position).with_body(body));
        id
    }

    #[cfg(feature = "physics")]
    pub fn apply_impulse(&mut self, id: EntityId, impulse: Vec2) {
        if let Some(body) = self.scene.get(id).and_then(|e| e.body) {
            self.physics.apply_impulse(&body, impulse);
        }
    }

    #[cfg(feature = "physics")]
    pub fn set_velocity(&mut self, id: EntityId, vel: Vec2) {
        if let Some(body) = self.scene.get(id).and_then(|e| e.body) {
            self.physics.set_velocity(&body, vel);
        }
    }

    #[cfg(feature = "physics")]
    pub fn velocity(&self, id: EntityId) -> Vec2 {
        self.scene
            .get(id)
            .and_then(|e| e.body.as_ref())
            .map(|body| self.physics.velocity(body))
            .unwrap_or(Vec2::ZERO)
    }

    /// 0 makes a body ignore world gravity, 1 restores it.
    #[cfg(feature = "physics")]
    pub fn set_gravity_scale(&mut self, id: EntityId, scale: f32) {
        if let Some(body) = self.scene.get(id).and_then(|e| e.body) {
            self.physics.set_gravity_scale(&body, scale);
        }
    }

    /// Move an entity (and its body) to `pos`, stopping it.
    #[cfg(feature = "physics")]
    pub fn teleport(&mut self, id: EntityId, pos: Vec2) {
        let Some(entity) = self.scene.get_mut(id) else {
            return;
        };
        entity.pos = pos;
        if let Some(body) = entity.body {
            self.physics.set_position(&body, pos);
        }
    }

    /// Collision events from the most recent physics step.
    #[cfg(feature = "physics")]
    pub fn collisions(&self) -> &[CollisionPair] {
        &self.collision_events
    }

    /// Step the simulation. Kinematic bodies follow their entity (tweens write
    /// `Entity::pos`); every other body writes its pose back to its entity.
    #[cfg(feature = "physics")]
    pub fn step_physics(&mut self) {
        for entity in self.scene.iter() {
            if let Some(body) = entity.body.filter(|b| b.is_kinematic()) {
                self.physics.set_kinematic_position(&body, entity.pos, entity.rotation);
            }
        }

        self.collision_events.clear();
        self.physics.step_into(&mut self.collision_events);

        for entity in self.scene.iter_mut() {
            if let Some(body) = entity.body.filter(|b| !b.is_kinematic()) {
                let (pos, rot) = self.physics.body_position(&body);
                entity.pos = pos;
                entity.rotation = rot;
            }
        }
    }

    /// Run everything that follows `Game::update` in one fixed step:
    /// tweens, physics, emitters, particles.
    pub fn step_systems(&mut self, dt: f32) {
        self.tweens.tick(dt, &mut self.scene);
        #[cfg(feature = "physics")]
        self.step_physics();
        for id in tick_emitters(&mut self.scene, &mut self.effects, dt) {
            self.despawn(id);
        }
        self.effects.tick(dt);
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
#[cfg(feature = "physics")]
mod physics_tests {
    use super::*;
    use crate::core::physics::{BodyDesc, ColliderDesc, ColliderMaterial};
    use crate::extensions::tween::{Tween, TweenLoop};

    #[test]
    fn spawn_with_body_creates_entity_and_physics() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 10.0 })
            .with_position(Vec2::new(100.0, 200.0));

        ctx.spawn_with_body(Entity::new(id), desc, ColliderMaterial::default());

        assert_eq!(ctx.scene.len(), 1);
        assert_eq!(ctx.physics.body_count(), 1);
        let e = ctx.scene.get(id).unwrap();
        assert!(e.body.is_some());
        assert_eq!(e.pos, Vec2::new(100.0, 200.0));
    }

    #[test]
    fn despawn_cleans_up_physics() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 10.0 });
        ctx.spawn_with_body(Entity::new(id).with_tag("orb"), desc, ColliderMaterial::default());

        assert_eq!(ctx.despawn_by_tag("orb"), 1);
        assert_eq!(ctx.scene.len(), 0);
        assert_eq!(ctx.physics.body_count(), 0);
    }

    #[test]
    fn step_physics_syncs_positions() {
        let config = GameConfig {
            gravity: Vec2::new(0.0, -100.0),
            ..Default::default()
        };
        let mut ctx = EngineContext::with_config(&config, 1);
        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 5.0 })
            .with_position(Vec2::new(100.0, 300.0));
        ctx.spawn_with_body(Entity::new(id), desc, ColliderMaterial::default());

        for _ in 0..10 {
            ctx.step_physics();
        }
        let y = ctx.scene.get(id).unwrap().pos.y;
        assert!(y < 300.0, "entity should fall: y={y}");
    }

    #[test]
    fn physics_speed_scales_step() {
        let config = GameConfig {
            physics_speed: 1.5,
            ..Default::default()
        };
        let ctx = EngineContext::with_config(&config, 1);
        assert!((ctx.physics.dt() - 1.5 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn tweened_kinematic_body_follows_entity() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        let desc = BodyDesc::kinematic(ColliderDesc::Ball { radius: 20.0 })
            .with_position(Vec2::new(100.0, 250.0));
        ctx.spawn_with_body(Entity::new(id), desc, ColliderMaterial::default());
        ctx.tweens.add(id, Tween::offset_x(70.0, 1.0).with_loop(TweenLoop::PingPong));

        for _ in 0..30 {
            ctx.step_systems(1.0 / 60.0);
        }
        let body = ctx.scene.get(id).unwrap().body.unwrap();
        let (pos, _) = ctx.physics.body_position(&body);
        assert!((pos.x - 135.0).abs() < 1.5, "body x = {}", pos.x);
        assert!((ctx.scene.get(id).unwrap().pos.x - 135.0).abs() < 0.5);
    }

    #[test]
    fn teleport_stops_body() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 10.0 })
            .with_velocity(Vec2::new(50.0, 50.0));
        ctx.spawn_with_body(Entity::new(id), desc, ColliderMaterial::default());
        ctx.teleport(id, Vec2::new(187.5, 100.0));
        assert_eq!(ctx.velocity(id), Vec2::ZERO);
        ctx.step_physics();
        assert!((ctx.scene.get(id).unwrap().pos - Vec2::new(187.5, 100.0)).length() < 1e-3);
    }
}
