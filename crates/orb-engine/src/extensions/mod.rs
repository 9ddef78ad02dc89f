// extensions/mod.rs
//
// Opt-in animation helpers layered on top of Scene.

pub mod tween;

pub use tween::{Tween, TweenId, TweenLoop, TweenState, TweenTarget};
