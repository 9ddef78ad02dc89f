use wasm_bindgen::prelude::*;
use orb_engine::*;

pub mod barriers;
pub mod collision;
pub mod countdown;
pub mod game;
pub mod geometry;
pub mod hud;
pub mod launch;
pub mod playfield;
pub mod session;
pub mod settings;
pub mod sprites;
pub mod targets;

pub use game::SwiftOrb;
pub use settings::{Settings, SettingsError};

orb_web::export_game!(SwiftOrb, "swift-orb");
