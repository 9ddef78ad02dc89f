//! Particle effects: emitter-driven particles plus the vertex buffer the
//! TypeScript renderer draws them from.

mod geometry;
mod particle;
mod segment_color;

pub use geometry::{push_segment, VERTEX_FLOATS};
pub use particle::Particle;
pub use segment_color::SegmentColor;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::components::emitter::{EmitterComponent, ParticleColorMode};

/// Container for live particles and their vertex buffer.
pub struct EffectsState {
    pub particles: Vec<Particle>,
    pub effects_buffer: Vec<f32>,
    pub rng: Pcg32,
    max_vertices: usize,
}

impl EffectsState {
    /// Create a new EffectsState with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        Self::with_capacity(seed, 16384)
    }

    /// Create a new EffectsState with a pre-allocated buffer capacity.
    pub fn with_capacity(seed: u64, max_vertices: usize) -> Self {
        EffectsState {
            particles: Vec::new(),
            effects_buffer: Vec::with_capacity(max_vertices * VERTEX_FLOATS),
            rng: Pcg32::seed_from_u64(seed.wrapping_add(7919)),
            max_vertices,
        }
    }

    /// Spawn `count` particles at `center` using an emitter's settings.
    pub fn spawn_from(&mut self, center: Vec2, count: usize, emitter: &EmitterComponent) {
        for _ in 0..count {
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let (lo, hi) = emitter.speed_range;
            let speed = if hi > lo { self.rng.random_range(lo..hi) } else { lo };
            let color = match &emitter.color_mode {
                ParticleColorMode::Fixed(c) => *c,
                ParticleColorMode::Palette(colors) if !colors.is_empty() => {
                    colors[self.rng.random_range(0..colors.len())]
                }
                ParticleColorMode::Palette(_) => SegmentColor::random(&mut self.rng),
            };
            let mut particle = Particle::new(
                center,
                Vec2::from_angle(angle) * speed,
                emitter.width,
                color,
                emitter.lifetime,
            );
            particle.drag = emitter.drag;
            self.particles.push(particle);
        }
    }

    /// Advance all particles, dropping expired ones.
    pub fn tick(&mut self, dt: f32) {
        self.particles.retain_mut(|p| p.tick(dt));
    }

    /// Rebuild the effects vertex buffer (triangle list, 5 floats per vertex).
    /// Particles beyond the vertex capacity are not drawn.
    pub fn rebuild_effects_buffer(&mut self) {
        self.effects_buffer.clear();
        let limit = self.max_vertices * VERTEX_FLOATS;
        for p in &self.particles {
            if self.effects_buffer.len() + 6 * VERTEX_FLOATS > limit {
                break;
            }
            p.push_vertices(&mut self.effects_buffer);
        }
    }

    /// Clear all effects.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.effects_buffer.clear();
    }

    pub fn effects_vertex_count(&self) -> usize {
        self.effects_buffer.len() / VERTEX_FLOATS
    }

    pub fn effects_buffer_ptr(&self) -> *const f32 {
        self.effects_buffer.as_ptr()
    }
}
