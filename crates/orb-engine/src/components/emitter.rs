use crate::systems::effects::SegmentColor;

/// How an emitter releases particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Emission {
    /// Steady flow, e.g. a trail behind a moving body.
    Stream { per_second: f32 },
    /// Everything at once on the first tick, then nothing.
    Burst { count: u32 },
}

/// How particle colors are chosen.
#[derive(Debug, Clone)]
pub enum ParticleColorMode {
    Fixed(SegmentColor),
    /// Random pick per particle.
    Palette(Vec<SegmentColor>),
}

/// Spawns particles at its entity's position every tick it is active.
#[derive(Debug, Clone)]
pub struct EmitterComponent {
    pub active: bool,
    pub emission: Emission,
    /// Min/max initial speed in world units per second.
    pub speed_range: (f32, f32),
    pub width: f32,
    /// Seconds.
    pub lifetime: f32,
    pub color_mode: ParticleColorMode,
    /// Fraction of speed lost per second.
    pub drag: f32,
    carry: f32,
    spent: bool,
}

impl EmitterComponent {
    fn with_emission(emission: Emission) -> Self {
        Self {
            active: true,
            emission,
            speed_range: (20.0, 80.0),
            width: 3.0,
            lifetime: 0.5,
            color_mode: ParticleColorMode::Fixed(SegmentColor::White),
            drag: 1.5,
            carry: 0.0,
            spent: false,
        }
    }

    pub fn stream(per_second: f32) -> Self {
        Self::with_emission(Emission::Stream { per_second })
    }

    pub fn burst(count: u32) -> Self {
        Self::with_emission(Emission::Burst { count })
    }

    pub fn with_speed_range(mut self, min: f32, max: f32) -> Self {
        self.speed_range = (min, max);
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn with_lifetime(mut self, lifetime: f32) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn with_color_mode(mut self, mode: ParticleColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    pub fn with_drag(mut self, drag: f32) -> Self {
        self.drag = drag;
        self
    }

    /// Starts switched off; flip `active` to begin emitting.
    pub fn paused(mut self) -> Self {
        self.active = false;
        self
    }

    /// A burst that has already gone off. Streams are never spent.
    pub fn is_spent(&self) -> bool {
        self.spent
    }

    /// Advance by `dt` seconds and return how many particles to spawn now.
    pub fn tick(&mut self, dt: f32) -> usize {
        if !self.active || self.spent {
            return 0;
        }
        match self.emission {
            Emission::Stream { per_second } => {
                self.carry += per_second * dt;
                let whole = self.carry.floor();
                self.carry -= whole;
                whole as usize
            }
            Emission::Burst { count } => {
                self.spent = true;
                count as usize
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_carries_fractions() {
        let mut e = EmitterComponent::stream(60.0);
        assert_eq!(e.tick(1.0 / 60.0), 1);
        assert_eq!(e.tick(0.5 / 60.0), 0);
        assert_eq!(e.tick(0.5 / 60.0), 1);
        assert!(!e.is_spent());
    }

    #[test]
    fn burst_fires_once() {
        let mut e = EmitterComponent::burst(10);
        assert!(!e.is_spent());
        assert_eq!(e.tick(0.016), 10);
        assert_eq!(e.tick(0.016), 0);
        assert!(e.is_spent());
    }

    #[test]
    fn paused_emitter_is_silent_until_activated() {
        let mut e = EmitterComponent::stream(1000.0).paused();
        assert_eq!(e.tick(1.0), 0);
        e.active = true;
        assert_eq!(e.tick(0.01), 10);
    }

    #[test]
    fn paused_burst_waits() {
        let mut e = EmitterComponent::burst(3).paused();
        assert_eq!(e.tick(0.1), 0);
        assert!(!e.is_spent());
    }
}
