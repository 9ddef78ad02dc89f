//! Bitmap-font labels.
//!
//! Each glyph is an Entity with a SpriteComponent pointing at a cell of the font
//! atlas. All glyphs of one label share the label's tag, so replacing a label
//! is "despawn by tag, spawn again".

use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::sprite::{AtlasId, RenderLayer, SpriteComponent};
use crate::core::scene::Scene;

/// Grid layout of a bitmap font atlas, glyphs in ASCII order from `start_char`.
#[derive(Debug, Clone)]
pub struct FontConfig {
    pub atlas: AtlasId,
    pub cols: u32,
    pub rows: u32,
    /// First ASCII code in the atlas (typically 32 = space).
    pub start_char: u8,
    /// Horizontal advance as a fraction of glyph size.
    pub spacing: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            atlas: AtlasId(1), // atlas 0 = game sprites, atlas 1 = font
            cols: 16,
            rows: 6,
            start_char: 32,
            spacing: 0.55,
        }
    }
}

impl FontConfig {
    pub fn new(atlas: AtlasId) -> Self {
        Self {
            atlas,
            ..Default::default()
        }
    }

    pub fn with_grid(mut self, cols: u32, rows: u32) -> Self {
        self.cols = cols;
        self.rows = rows;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Width in world units of `text` rendered at glyph `size`.
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * self.spacing
    }
}

/// Convert a character to its (col, row) cell in the font atlas.
/// Returns `None` for characters the atlas does not hold.
pub fn char_to_grid(c: char, font: &FontConfig) -> Option<(f32, f32)> {
    let index = (c as u32).checked_sub(font.start_char as u32)?;
    if index >= font.cols * font.rows {
        return None;
    }
    Some(((index % font.cols) as f32, (index / font.cols) as f32))
}

/// Horizontal anchoring of a label relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

/// A line of text to place in the scene.
#[derive(Debug, Clone)]
pub struct Label {
    pub tag: String,
    pub text: String,
    /// Anchor point; `y` is the vertical center of the line.
    pub pos: Vec2,
    /// Glyph size in world units.
    pub size: f32,
    pub align: Align,
    pub layer: RenderLayer,
}

impl Label {
    pub fn new(tag: impl Into<String>, text: impl Into<String>, pos: Vec2) -> Self {
        Self {
            tag: tag.into(),
            text: text.into(),
            pos,
            size: 24.0,
            align: Align::Center,
            layer: RenderLayer::UI,
        }
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// Build glyph entities for a label. Unprintable characters still advance the cursor.
pub fn build_label_entities<F>(label: &Label, font: &FontConfig, id_gen: &mut F) -> Vec<Entity>
where
    F: FnMut() -> EntityId,
{
    let advance = label.size * font.spacing;
    let width = font.measure(&label.text, label.size);
    let left = match label.align {
        Align::Left => label.pos.x,
        Align::Center => label.pos.x - width / 2.0,
        Align::Right => label.pos.x - width,
    };

    label
        .text
        .chars()
        .enumerate()
        .filter_map(|(i, c)| {
            let (col, row) = char_to_grid(c, font)?;
            let x = left + i as f32 * advance + advance / 2.0;
            let sprite = SpriteComponent {
                atlas: font.atlas,
                col,
                row,
                ..Default::default()
            }
            .with_layer(label.layer);
            Some(
                Entity::new(id_gen())
                    .with_tag(label.tag.as_str())
                    .with_pos(Vec2::new(x, label.pos.y))
                    .with_scale(Vec2::splat(label.size))
                    .with_sprite(sprite),
            )
        })
        .collect()
}

/// Replace whatever is tagged `label.tag` with freshly laid-out glyphs.
pub fn set_label<F>(scene: &mut Scene, label: &Label, font: &FontConfig, id_gen: &mut F)
where
    F: FnMut() -> EntityId,
{
    scene.despawn_by_tag(&label.tag);
    for glyph in build_label_entities(label, font, id_gen) {
        scene.spawn(glyph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> impl FnMut() -> EntityId {
        let mut next = 0u32;
        move || {
            next += 1;
            EntityId(next)
        }
    }

    #[test]
    fn char_to_grid_basic() {
        let font = FontConfig::default();
        // 'A' = 65, index 33
        assert_eq!(char_to_grid('A', &font), Some((1.0, 2.0)));
        assert_eq!(char_to_grid(' ', &font), Some((0.0, 0.0)));
        assert_eq!(char_to_grid('~', &font), Some((14.0, 5.0)));
    }

    #[test]
    fn char_to_grid_out_of_range() {
        let font = FontConfig::default();
        assert!(char_to_grid('\t', &font).is_none());
        assert!(char_to_grid('\u{80}', &font).is_none());
    }

    #[test]
    fn left_aligned_starts_at_pos() {
        let font = FontConfig::default().with_spacing(1.0);
        let label = Label::new("score", "Hi", Vec2::new(10.0, 50.0))
            .with_size(20.0)
            .with_align(Align::Left);
        let glyphs = build_label_entities(&label, &font, &mut ids());
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].pos, Vec2::new(20.0, 50.0));
        assert_eq!(glyphs[1].pos, Vec2::new(40.0, 50.0));
        assert!(glyphs.iter().all(|g| g.tag == "score"));
    }

    #[test]
    fn right_aligned_ends_at_pos() {
        let font = FontConfig::default().with_spacing(1.0);
        let label = Label::new("timer", "20", Vec2::new(375.0, 0.0))
            .with_size(10.0)
            .with_align(Align::Right);
        let glyphs = build_label_entities(&label, &font, &mut ids());
        assert_eq!(glyphs[1].pos.x, 370.0);
    }

    #[test]
    fn centered_label_is_symmetric() {
        let font = FontConfig::default().with_spacing(1.0);
        let label = Label::new("title", "ab", Vec2::new(100.0, 0.0)).with_size(10.0);
        let glyphs = build_label_entities(&label, &font, &mut ids());
        assert_eq!(glyphs[0].pos.x, 95.0);
        assert_eq!(glyphs[1].pos.x, 105.0);
    }

    #[test]
    fn set_label_replaces_previous_text() {
        let font = FontConfig::default();
        let mut scene = Scene::new();
        let mut gen = ids();
        set_label(&mut scene, &Label::new("score", "Score: 10", Vec2::ZERO), &font, &mut gen);
        let before = scene.len();
        set_label(&mut scene, &Label::new("score", "Score: 9", Vec2::ZERO), &font, &mut gen);
        assert_eq!(scene.len(), before - 1);
    }
}
