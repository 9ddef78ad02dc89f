/// What one elapsed second did to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    Running(u32),
    /// Hit zero on this tick. Reported once per round.
    Expired,
    /// Already stopped; nothing changed.
    Stopped,
}

/// Whole-second round clock. Never goes below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    remaining: u32,
    running: bool,
}

impl Countdown {
    pub fn start(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            running: seconds > 0,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tick(&mut self) -> CountdownTick {
        if !self.running {
            return CountdownTick::Stopped;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            CountdownTick::Expired
        } else {
            CountdownTick::Running(self.remaining)
        }
    }

    /// Abort without expiring.
    pub fn stop(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_then_expires_once() {
        let mut c = Countdown::start(3);
        assert_eq!(c.tick(), CountdownTick::Running(2));
        assert_eq!(c.tick(), CountdownTick::Running(1));
        assert_eq!(c.tick(), CountdownTick::Expired);
        assert!(!c.is_running());
        for _ in 0..5 {
            assert_eq!(c.tick(), CountdownTick::Stopped);
        }
        assert_eq!(c.remaining(), 0);
    }

    #[test]
    fn stopped_clock_keeps_its_value() {
        let mut c = Countdown::start(20);
        c.tick();
        c.stop();
        assert_eq!(c.tick(), CountdownTick::Stopped);
        assert_eq!(c.remaining(), 19);
    }

    #[test]
    fn zero_length_round_never_runs() {
        let mut c = Countdown::start(0);
        assert!(!c.is_running());
        assert_eq!(c.tick(), CountdownTick::Stopped);
    }
}
