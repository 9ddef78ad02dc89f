//! SwiftOrb: drag the orb back, let go, hit the pulsing target before time runs out.

use orb_engine::{
    AssetError, AssetManifest, EngineContext, Game, GameConfig, InputEvent, InputQueue,
    PrimaryPointer,
};

use crate::playfield::spawn_arena;
use crate::session::{Session, Stage};
use crate::settings::Settings;
use crate::sprites::{font_from_manifest, Sprites};

const FIXED_DT: f32 = 1.0 / 60.0;

pub struct SwiftOrb {
    settings: Settings,
    sprites: Sprites,
    session: Session,
    pointer: PrimaryPointer,
}

impl Default for SwiftOrb {
    fn default() -> Self {
        Self::new()
    }
}

impl SwiftOrb {
    /// Game tuned by the bundled `settings.json`.
    pub fn new() -> Self {
        let settings = Settings::bundled().unwrap_or_else(|e| {
            log::error!("bundled settings rejected, using defaults: {e}");
            Settings::default()
        });
        Self::with_settings(settings)
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            sprites: Sprites::default(),
            session: Session::new(),
            pointer: PrimaryPointer::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl Game for SwiftOrb {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: FIXED_DT,
            world_width: self.settings.world_width,
            world_height: self.settings.world_height,
            gravity: self.settings.gravity(),
            physics_speed: self.settings.physics_speed,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        spawn_arena(ctx, &self.settings);
        let mut stage = Stage {
            ctx,
            settings: &self.settings,
            sprites: &self.sprites,
        };
        self.session.open(&mut stage);
        log::info!(
            "swift-orb ready: {}x{} world, {}s rounds",
            self.settings.world_width,
            self.settings.world_height,
            self.settings.round_seconds
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let Self {
            settings,
            sprites,
            session,
            pointer,
        } = self;
        let mut stage = Stage {
            ctx,
            settings,
            sprites,
        };

        for event in input.iter() {
            let Some(event) = pointer.filter(*event) else {
                continue;
            };
            let at = event.position();
            match event {
                InputEvent::PointerDown { .. } => session.pointer_down(&mut stage, at),
                InputEvent::PointerMove { .. } => session.pointer_move(&mut stage, at),
                // A cancelled touch lets go of the orb like a lift does.
                InputEvent::PointerUp { .. } | InputEvent::PointerCancel { .. } => {
                    session.pointer_up(&mut stage, at)
                }
            }
        }

        session.tick(&mut stage, FIXED_DT);
    }

    fn load_assets(&mut self, manifest: &AssetManifest, ctx: &mut EngineContext) -> Result<(), AssetError> {
        self.sprites = Sprites::from_manifest(manifest)?;
        if let Some(font) = font_from_manifest(manifest) {
            ctx.font = font;
        }
        Ok(())
    }
}
