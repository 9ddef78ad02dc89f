pub mod effects;
pub mod emitter;
pub mod render;
pub mod text;
