//! Short-lived streak particles (trails, explosions).

use glam::Vec2;

use super::geometry::push_segment;
use super::segment_color::SegmentColor;

/// A single particle with motion and rendering state.
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    /// World units per second.
    pub velocity: Vec2,
    pub width: f32,
    pub color: SegmentColor,
    /// Seconds left to live.
    pub lifetime: f32,
    /// Fraction of velocity lost per second.
    pub drag: f32,
}

impl Particle {
    /// Seconds of motion the streak tail represents.
    const STREAK_SECONDS: f32 = 0.05;

    pub fn new(position: Vec2, velocity: Vec2, width: f32, color: SegmentColor, lifetime: f32) -> Self {
        Self {
            position,
            velocity,
            width,
            color,
            lifetime,
            drag: 0.0,
        }
    }

    /// Advance particle motion. Returns false when expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            return false;
        }
        self.velocity *= (1.0 - self.drag * dt).max(0.0);
        self.position += self.velocity * dt;
        true
    }

    /// Append this particle's triangles to an effects buffer.
    pub fn push_vertices(&self, out: &mut Vec<f32>) {
        let tail = self.position - self.velocity * Self::STREAK_SECONDS;
        push_segment(
            out,
            [tail.x, tail.y],
            [self.position.x, self.position.y],
            self.width,
            self.color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_expires() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::X, 4.0, SegmentColor::Red, 0.1);
        assert!(!p.tick(0.2), "particle should expire");
    }

    #[test]
    fn particle_moves_by_velocity() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(100.0, 0.0), 2.0, SegmentColor::Red, 1.0);
        assert!(p.tick(0.5));
        assert!((p.position.x - 50.0).abs() < 1e-4);
    }

    #[test]
    fn drag_slows_particle() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(100.0, 0.0), 2.0, SegmentColor::Red, 1.0);
        p.drag = 1.0;
        p.tick(0.5);
        assert!(p.velocity.x < 100.0);
    }
}
