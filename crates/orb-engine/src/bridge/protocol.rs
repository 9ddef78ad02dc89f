//! Shared-buffer layout read by the TypeScript renderer (`protocol.ts`).
//!
//! All values are f32:
//! ```text
//! [Header: 16 floats]
//! [Instances: max_instances × 10 floats]
//! [Batches: max_batches × 4 floats]
//! [Effects: max_effects_vertices × 5 floats]
//! [Events: max_events × 4 floats]
//! ```
//! Capacities go into the header so TypeScript computes offsets itself.

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::renderer::instance::{LayerBatch, RenderInstance};
use crate::systems::effects::VERTEX_FLOATS;

pub const HEADER_FLOATS: usize = 16;

pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_WORLD_WIDTH: usize = 3;
pub const HEADER_WORLD_HEIGHT: usize = 4;
pub const HEADER_MAX_INSTANCES: usize = 5;
pub const HEADER_INSTANCE_COUNT: usize = 6;
pub const HEADER_MAX_BATCHES: usize = 7;
pub const HEADER_BATCH_COUNT: usize = 8;
pub const HEADER_MAX_EFFECTS_VERTICES: usize = 9;
pub const HEADER_EFFECTS_VERTEX_COUNT: usize = 10;
pub const HEADER_MAX_EVENTS: usize = 11;
pub const HEADER_EVENT_COUNT: usize = 12;

pub const PROTOCOL_VERSION: f32 = 2.0;

pub const INSTANCE_FLOATS: usize = RenderInstance::FLOATS;
pub const BATCH_FLOATS: usize = LayerBatch::FLOATS;
pub const EFFECTS_VERTEX_FLOATS: usize = VERTEX_FLOATS;
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Buffer layout computed from capacities.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_batches: usize,
    pub max_effects_vertices: usize,
    pub max_events: usize,

    pub instance_data_offset: usize,
    pub batch_data_offset: usize,
    pub effects_data_offset: usize,
    pub event_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_instances: usize, max_batches: usize, max_effects_vertices: usize, max_events: usize) -> Self {
        let instance_data_offset = HEADER_FLOATS;
        let batch_data_offset = instance_data_offset + max_instances * INSTANCE_FLOATS;
        let effects_data_offset = batch_data_offset + max_batches * BATCH_FLOATS;
        let event_data_offset = effects_data_offset + max_effects_vertices * EFFECTS_VERTEX_FLOATS;
        let buffer_total_floats = event_data_offset + max_events * EVENT_FLOATS;

        Self {
            max_instances,
            max_batches,
            max_effects_vertices,
            max_events,
            instance_data_offset,
            batch_data_offset,
            effects_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_instances,
            config.max_batches,
            config.max_effects_vertices,
            config.max_events,
        )
    }
}

/// Per-frame counts written into the header next to the static capacities.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameCounts {
    pub instances: usize,
    pub batches: usize,
    pub effects_vertices: usize,
    pub events: usize,
}

/// Fill a header block. Counts are clamped to the layout's capacities.
pub fn write_header(
    header: &mut [f32; HEADER_FLOATS],
    layout: &ProtocolLayout,
    config: &GameConfig,
    frame: u32,
    counts: FrameCounts,
) {
    header.fill(0.0);
    header[HEADER_FRAME_COUNTER] = frame as f32;
    header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    header[HEADER_WORLD_WIDTH] = config.world_width;
    header[HEADER_WORLD_HEIGHT] = config.world_height;
    header[HEADER_MAX_INSTANCES] = layout.max_instances as f32;
    header[HEADER_INSTANCE_COUNT] = counts.instances.min(layout.max_instances) as f32;
    header[HEADER_MAX_BATCHES] = layout.max_batches as f32;
    header[HEADER_BATCH_COUNT] = counts.batches.min(layout.max_batches) as f32;
    header[HEADER_MAX_EFFECTS_VERTICES] = layout.max_effects_vertices as f32;
    header[HEADER_EFFECTS_VERTEX_COUNT] = counts.effects_vertices.min(layout.max_effects_vertices) as f32;
    header[HEADER_MAX_EVENTS] = layout.max_events as f32;
    header[HEADER_EVENT_COUNT] = counts.events.min(layout.max_events) as f32;
}
