//! Named sprites the game draws, resolved from the asset manifest.

use orb_engine::{
    AssetError, AssetManifest, AtlasId, BlendMode, FontConfig, RenderLayer, SpriteComponent,
    SpriteRegistry,
};

pub const ORB: &str = "orb";
pub const ORB_MARKER: &str = "orb_marker";
pub const TARGET: &str = "target";
pub const BARRIER: &str = "barrier";

/// Startup fails if any of these is missing from the manifest.
pub const REQUIRED: &[&str] = &[ORB, ORB_MARKER, TARGET, BARRIER];

/// Atlas holding the bitmap font, if the manifest names one.
const FONT_ATLAS: &str = "font";

#[derive(Debug, Clone)]
pub struct Sprites {
    pub orb: SpriteComponent,
    pub marker: SpriteComponent,
    pub target: SpriteComponent,
    pub barrier: SpriteComponent,
}

impl Default for Sprites {
    /// Atlas 0, one cell per sprite in manifest order.
    fn default() -> Self {
        Self::layered(
            SpriteComponent::cell(0, 0),
            SpriteComponent::cell(1, 0),
            SpriteComponent::cell(2, 0),
            SpriteComponent::cell(3, 0),
        )
    }
}

impl Sprites {
    pub fn from_manifest(manifest: &AssetManifest) -> Result<Self, AssetError> {
        let registry = SpriteRegistry::from_manifest(manifest, REQUIRED)?;
        Ok(Self::layered(
            registry.sprite_or_default(ORB),
            registry.sprite_or_default(ORB_MARKER),
            registry.sprite_or_default(TARGET),
            registry.sprite_or_default(BARRIER),
        ))
    }

    fn layered(
        orb: SpriteComponent,
        marker: SpriteComponent,
        target: SpriteComponent,
        barrier: SpriteComponent,
    ) -> Self {
        Self {
            orb: orb.with_layer(RenderLayer::Foreground),
            marker: marker.with_layer(RenderLayer::Objects),
            target: target
                .with_layer(RenderLayer::Objects)
                .with_blend(BlendMode::Additive),
            barrier: barrier.with_layer(RenderLayer::Objects),
        }
    }
}

/// Font laid out on the manifest's `font` atlas, when there is one.
pub fn font_from_manifest(manifest: &AssetManifest) -> Option<FontConfig> {
    let index = manifest.atlases.iter().position(|a| a.name == FONT_ATLAS)?;
    let atlas = &manifest.atlases[index];
    Some(FontConfig::new(AtlasId(index as u32)).with_grid(atlas.cols, atlas.rows))
}
