pub mod api;
pub mod assets;
pub mod bridge;
pub mod components;
pub mod core;
pub mod extensions;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{EngineContext, Game, GameConfig};
pub use api::types::{EntityId, GameEvent};
pub use assets::manifest::{AssetError, AssetManifest};
pub use assets::registry::SpriteRegistry;
pub use bridge::protocol::{FrameCounts, ProtocolLayout};
pub use components::emitter::{Emission, EmitterComponent, ParticleColorMode};
pub use components::entity::Entity;
pub use components::sprite::{AtlasId, BlendMode, RenderLayer, SpriteComponent};
pub use crate::core::scene::Scene;
pub use crate::core::time::{FixedTimestep, TimerFired, TimerId, Timers};
pub use input::queue::{InputEvent, InputQueue, PrimaryPointer};
pub use renderer::instance::{LayerBatch, RenderBuffer, RenderInstance};
pub use systems::effects::{EffectsState, Particle, SegmentColor};
pub use systems::text::{Align, FontConfig, Label};

#[cfg(feature = "physics")]
pub use crate::core::physics::{
    BodyDesc, BodyType, ColliderDesc, ColliderMaterial, CollisionFilter, CollisionPair,
    PhysicsBody, PhysicsWorld,
};

pub use extensions::{Tween, TweenId, TweenLoop, TweenState, TweenTarget};
