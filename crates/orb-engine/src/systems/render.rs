use crate::components::entity::Entity;
use crate::components::sprite::{BlendMode, RenderLayer};
use crate::renderer::instance::{LayerBatch, RenderBuffer, RenderInstance};

/// Build the render buffer from a set of entities.
///
/// Instances are ordered by layer (back to front), then alpha before additive
/// within a layer, keeping spawn order inside each group. One `LayerBatch` is
/// recorded per non-empty (layer, blend) group.
pub fn build_render_buffer<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut RenderBuffer) {
    buffer.clear();

    let mut keyed: Vec<((RenderLayer, u8), RenderInstance)> = entities
        .filter(|e| e.active)
        .filter_map(|e| {
            let sprite = e.sprite.as_ref()?;
            if sprite.alpha <= 0.0 {
                return None;
            }
            let blend_rank = match sprite.blend {
                BlendMode::Alpha => 0,
                BlendMode::Additive => 1,
            };
            let instance = RenderInstance {
                x: e.pos.x,
                y: e.pos.y,
                rotation: e.rotation,
                width: e.scale.x,
                height: e.scale.y,
                sprite_col: sprite.col,
                atlas_row: sprite.row,
                cell_span: sprite.cell_span,
                alpha: sprite.alpha,
                atlas: sprite.atlas.0 as f32,
            };
            Some(((sprite.layer, blend_rank), instance))
        })
        .collect();

    // stable: spawn order is preserved within a group
    keyed.sort_by_key(|(key, _)| *key);

    let mut current: Option<(RenderLayer, u8)> = None;
    let mut start = 0u32;
    for (key, instance) in keyed {
        if current != Some(key) {
            if let Some((layer, rank)) = current {
                buffer.push_batch(LayerBatch::new(layer, blend_of(rank), start, buffer.instance_count()));
            }
            current = Some(key);
            start = buffer.instance_count();
        }
        if !buffer.push(instance) {
            log::warn!("render buffer full, dropping remaining sprites");
            break;
        }
    }
    if let Some((layer, rank)) = current {
        buffer.push_batch(LayerBatch::new(layer, blend_of(rank), start, buffer.instance_count()));
    }
}

fn blend_of(rank: u8) -> BlendMode {
    if rank == 0 {
        BlendMode::Alpha
    } else {
        BlendMode::Additive
    }
}
