use bytemuck::{Pod, Zeroable};

use crate::components::sprite::{BlendMode, RenderLayer};

/// Per-instance render data written to the shared buffer for the TypeScript renderer.
/// 10 floats = 40 bytes stride; must match `protocol.ts`.
///
/// `width`/`height` are the world-space rendered size in game units.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    pub x: f32,
    pub y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
    pub sprite_col: f32,
    pub atlas_row: f32,
    /// UV cell span (1.0 = single cell).
    pub cell_span: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Atlas index.
    pub atlas: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 10;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// A contiguous run of instances sharing a layer and blend mode.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LayerBatch {
    pub layer: f32,
    /// 0 = alpha, 1 = additive.
    pub blend: f32,
    pub start: f32,
    pub end: f32,
}

impl LayerBatch {
    pub const FLOATS: usize = 4;

    pub fn new(layer: RenderLayer, blend: BlendMode, start: u32, end: u32) -> Self {
        Self {
            layer: layer as u8 as f32,
            blend: match blend {
                BlendMode::Alpha => 0.0,
                BlendMode::Additive => 1.0,
            },
            start: start as f32,
            end: end as f32,
        }
    }

    pub fn len(&self) -> u32 {
        (self.end - self.start) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sprite instances for one frame, sorted back-to-front and split into batches.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
    pub batches: Vec<LayerBatch>,
    capacity: usize,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    /// Buffer that never holds more than `capacity` instances.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            batches: Vec::with_capacity(8),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.batches.clear();
    }

    /// Append an instance. Returns false (and drops it) when the buffer is full.
    pub fn push(&mut self, instance: RenderInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn push_batch(&mut self, batch: LayerBatch) {
        if !batch.is_empty() {
            self.batches.push(batch);
        }
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for shared-buffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn batches_ptr(&self) -> *const f32 {
        self.batches.as_ptr() as *const f32
    }

    /// Instances as a flat float slice.
    pub fn instance_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn batch_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.batches)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_instance_is_10_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), 40);
        assert_eq!(std::mem::size_of::<LayerBatch>(), LayerBatch::FLOATS * 4);
    }

    #[test]
    fn push_respects_capacity() {
        let mut buf = RenderBuffer::with_capacity(2);
        assert!(buf.push(RenderInstance::default()));
        assert!(buf.push(RenderInstance::default()));
        assert!(!buf.push(RenderInstance::default()));
        assert_eq!(buf.instance_count(), 2);
        assert_eq!(buf.instance_floats().len(), 20);
    }

    #[test]
    fn empty_batches_are_skipped() {
        let mut buf = RenderBuffer::new();
        buf.push_batch(LayerBatch::new(RenderLayer::UI, BlendMode::Alpha, 3, 3));
        assert_eq!(buf.batches.len(), 0);
        buf.push_batch(LayerBatch::new(RenderLayer::UI, BlendMode::Additive, 3, 5));
        assert_eq!(buf.batch_floats(), &[3.0, 1.0, 3.0, 5.0]);
    }
}
