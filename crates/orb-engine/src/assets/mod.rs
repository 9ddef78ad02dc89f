pub mod manifest;
pub mod registry;

pub use manifest::{AssetError, AssetManifest};
pub use registry::SpriteRegistry;
