use orb_engine::bridge::protocol::{write_header, HEADER_FLOATS};
use orb_engine::systems::render::build_render_buffer;
use orb_engine::{
    AssetError, AssetManifest, EngineContext, FixedTimestep, FrameCounts, Game, GameConfig,
    InputEvent, InputQueue, ProtocolLayout, RenderBuffer,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner through
/// `export_game!`, because wasm-bindgen cannot export generic structs.
///
/// Per fixed step: timers fire, the game updates, then tweens, physics,
/// emitters and particles advance. Rendering data is rebuilt once per frame.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    idle_input: InputQueue,
    render_buffer: RenderBuffer,
    header: [f32; HEADER_FLOATS],
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    frame: u32,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        Self::with_seed(game, entropy_seed())
    }

    /// Runner with deterministic randomness; used by headless tests.
    pub fn with_seed(game: G, seed: u64) -> Self {
        let config = game.config();
        Self {
            ctx: EngineContext::with_config(&config, seed),
            input: InputQueue::new(),
            idle_input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            header: [0.0; HEADER_FLOATS],
            timestep: FixedTimestep::new(config.fixed_dt),
            layout: ProtocolLayout::from_config(&config),
            config,
            initialized: false,
            frame: 0,
            game,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.publish();
    }

    /// Hand the parsed asset manifest to the game. Fails if a sprite it needs is missing.
    pub fn load_manifest(&mut self, json: &str) -> Result<(), AssetError> {
        let manifest = AssetManifest::from_json(json)?;
        self.game.load_assets(&manifest, &mut self.ctx)?;
        log::info!(
            "asset manifest loaded: {} atlases, {} sprites",
            manifest.atlases.len(),
            manifest.sprites.len()
        );
        Ok(())
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: as many fixed steps as `dt` covers, then rebuild render data.
    /// Input is delivered to the first step of the frame only; if the frame runs
    /// no step, it waits for the next one.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        let step_dt = self.timestep.dt();
        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            self.ctx.tick_timers(step_dt);
            let input = if step == 0 { &self.input } else { &self.idle_input };
            self.game.update(&mut self.ctx, input);
            self.ctx.step_systems(step_dt);
            if step == 0 {
                self.input.clear();
            }
        }

        self.publish();
    }

    fn publish(&mut self) {
        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer);
        self.ctx.effects.rebuild_effects_buffer();
        self.frame = self.frame.wrapping_add(1);
        write_header(
            &mut self.header,
            &self.layout,
            &self.config,
            self.frame,
            FrameCounts {
                instances: self.render_buffer.instances.len(),
                batches: self.render_buffer.batches.len(),
                effects_vertices: self.ctx.effects.effects_vertex_count(),
                events: self.ctx.events.len(),
            },
        );
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn ctx(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    // Shared-buffer pointers. Counts, capacities and world size live in the header.

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn batches_ptr(&self) -> *const f32 {
        self.render_buffer.batches_ptr()
    }

    pub fn effects_ptr(&self) -> *const f32 {
        self.ctx.effects.effects_buffer_ptr()
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    /// Total floats a host must map to read every region at full capacity.
    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

/// Seed for game randomness. Wall-clock mixed with `Math.random` in the
/// browser; a constant elsewhere so native runs are reproducible.
pub fn entropy_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        let now = js_sys::Date::now() as u64;
        let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
        now ^ (noise << 21)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        0x5eed_0f_0b
    }
}
