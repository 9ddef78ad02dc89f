use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures while loading or resolving game assets.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("invalid asset manifest: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("sprite `{0}` is not in the asset manifest")]
    MissingSprite(String),
    #[error("sprite `{name}` refers to atlas {atlas}, but only {count} atlases are declared")]
    BadAtlas { name: String, atlas: u32, count: usize },
}

/// Atlases and named sprites for a game, loaded from JSON at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    pub atlases: Vec<AtlasDescriptor>,
    /// Named sprite lookup: name → atlas index + cell coordinates.
    #[serde(default)]
    pub sprites: HashMap<String, SpriteDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasDescriptor {
    pub name: String,
    pub cols: u32,
    pub rows: u32,
    /// Relative path to the PNG file.
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteDescriptor {
    /// Index into `atlases`.
    pub atlas: u32,
    pub col: u32,
    pub row: u32,
    /// Cells spanned (default 1).
    #[serde(default = "default_span")]
    pub span: u32,
}

fn default_span() -> u32 {
    1
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Look up a sprite that the game cannot run without.
    pub fn require_sprite(&self, name: &str) -> Result<&SpriteDescriptor, AssetError> {
        let desc = self
            .sprites
            .get(name)
            .ok_or_else(|| AssetError::MissingSprite(name.to_string()))?;
        if desc.atlas as usize >= self.atlases.len() {
            return Err(AssetError::BadAtlas {
                name: name.to_string(),
                atlas: desc.atlas,
                count: self.atlases.len(),
            });
        }
        Ok(desc)
    }
}
