use std::collections::HashMap;

use crate::assets::manifest::{AssetError, AssetManifest};
use crate::components::sprite::{AtlasId, SpriteComponent};

/// Named sprites resolved from an AssetManifest, ready to attach to entities.
#[derive(Debug, Default)]
pub struct SpriteRegistry {
    sprites: HashMap<String, SpriteComponent>,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `required` sprites from the manifest, failing on the first one
    /// that is missing. Other sprites in the manifest are registered too.
    pub fn from_manifest(manifest: &AssetManifest, required: &[&str]) -> Result<Self, AssetError> {
        for name in required {
            manifest.require_sprite(name)?;
        }
        let sprites = manifest
            .sprites
            .iter()
            .map(|(name, desc)| {
                let sprite = SpriteComponent {
                    atlas: AtlasId(desc.atlas),
                    col: desc.col as f32,
                    row: desc.row as f32,
                    cell_span: desc.span as f32,
                    ..Default::default()
                };
                (name.clone(), sprite)
            })
            .collect();
        Ok(Self { sprites })
    }

    pub fn get(&self, name: &str) -> Option<&SpriteComponent> {
        self.sprites.get(name)
    }

    /// Sprite by name, or an untextured default cell when unknown.
    pub fn sprite_or_default(&self, name: &str) -> SpriteComponent {
        self.sprites.get(name).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r#"{
        "atlases": [ { "name": "s", "cols": 4, "rows": 4, "path": "s.png" } ],
        "sprites": { "orb": { "atlas": 0, "col": 3, "row": 2, "span": 2 } }
    }"#;

    #[test]
    fn loads_from_manifest() {
        let manifest = AssetManifest::from_json(JSON).unwrap();
        let reg = SpriteRegistry::from_manifest(&manifest, &["orb"]).unwrap();
        let orb = reg.get("orb").expect("orb should exist");
        assert_eq!(orb.atlas, AtlasId(0));
        assert_eq!((orb.col, orb.row, orb.cell_span), (3.0, 2.0, 2.0));
        assert_eq!(orb.alpha, 1.0);
    }

    #[test]
    fn missing_required_sprite_fails() {
        let manifest = AssetManifest::from_json(JSON).unwrap();
        let err = SpriteRegistry::from_manifest(&manifest, &["orb", "target"]).unwrap_err();
        assert!(matches!(err, AssetError::MissingSprite(_)));
    }

    #[test]
    fn unknown_falls_back_to_default() {
        let reg = SpriteRegistry::new();
        assert!(reg.get("nonexistent").is_none());
        assert_eq!(reg.sprite_or_default("nonexistent").col, 0.0);
    }
}
