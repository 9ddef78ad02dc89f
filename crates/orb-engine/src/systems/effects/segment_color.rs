//! Particle colors. The discriminant is written into the vertex `z` slot and
//! indexes the color strip in the effects texture on the TypeScript side.

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SegmentColor {
    Red = 0,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Magenta,
    White,
}

impl SegmentColor {
    pub const ALL: [SegmentColor; 8] = [
        Self::Red, Self::Orange, Self::Yellow, Self::Green,
        Self::Cyan, Self::Blue, Self::Magenta, Self::White,
    ];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn as_z(self) -> f32 {
        self as u8 as f32
    }
}
