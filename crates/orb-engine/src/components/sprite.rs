/// Position of an atlas in the manifest's `atlases` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AtlasId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    Alpha,
    /// src-alpha, one. Overlaps brighten.
    Additive,
}

/// Draw order. Layers are drawn back-to-front: Background first, UI last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum RenderLayer {
    Background = 0,
    #[default]
    Objects = 1,
    Foreground = 2,
    UI = 3,
}

/// Atlas cell drawn over the entity's box.
#[derive(Debug, Clone)]
pub struct SpriteComponent {
    pub atlas: AtlasId,
    pub col: f32,
    pub row: f32,
    /// Cells covered along each axis, starting at (`col`, `row`).
    pub cell_span: f32,
    /// Multiplies the texel alpha. Tweens write this for fades and pulses.
    pub alpha: f32,
    pub blend: BlendMode,
    pub layer: RenderLayer,
}

impl SpriteComponent {
    /// Single-cell sprite from atlas 0 on the default layer.
    pub fn cell(col: u32, row: u32) -> Self {
        Self {
            col: col as f32,
            row: row as f32,
            ..Default::default()
        }
    }

    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }
}

impl Default for SpriteComponent {
    fn default() -> Self {
        Self {
            atlas: AtlasId(0),
            col: 0.0,
            row: 0.0,
            cell_span: 1.0,
            alpha: 1.0,
            blend: BlendMode::Alpha,
            layer: RenderLayer::Objects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_order_back_to_front() {
        assert!(RenderLayer::Background < RenderLayer::Objects);
        assert!(RenderLayer::Objects < RenderLayer::Foreground);
        assert!(RenderLayer::Foreground < RenderLayer::UI);
    }

    #[test]
    fn cell_builder() {
        let s = SpriteComponent::cell(3, 1)
            .with_blend(BlendMode::Additive)
            .with_layer(RenderLayer::UI);
        assert_eq!((s.col, s.row), (3.0, 1.0));
        assert_eq!(s.alpha, 1.0);
        assert_eq!(s.blend, BlendMode::Additive);
        assert_eq!(s.layer, RenderLayer::UI);
        assert_eq!(s.atlas, AtlasId(0));
    }
}
