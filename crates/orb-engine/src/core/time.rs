//! Frame timing: the fixed-step accumulator that drives simulation ticks, and
//! repeating timers that fire as messages between ticks.

/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Handle to a scheduled timer. Ids are never reused within one `Timers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

/// Message produced when a timer period elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub id: TimerId,
}

#[derive(Debug, Clone)]
struct TimerEntry {
    id: TimerId,
    interval: f32,
    elapsed: f32,
    repeating: bool,
}

/// Repeating / one-shot timers advanced by simulation time.
///
/// Firing produces `TimerFired` messages instead of invoking callbacks, so the
/// owner decides what a message means and can drop messages for timers it no
/// longer tracks.
#[derive(Debug, Default)]
pub struct Timers {
    entries: Vec<TimerEntry>,
    next_id: u32,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a timer that fires every `interval` seconds until cancelled.
    pub fn schedule_repeating(&mut self, interval: f32) -> TimerId {
        self.schedule(interval, true)
    }

    /// Schedule a timer that fires once after `delay` seconds.
    pub fn schedule_once(&mut self, delay: f32) -> TimerId {
        self.schedule(delay, false)
    }

    fn schedule(&mut self, interval: f32, repeating: bool) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(TimerEntry {
            id,
            interval: interval.max(f32::EPSILON),
            elapsed: 0.0,
            repeating,
        });
        id
    }

    /// Cancel a timer. Returns false if it was not scheduled (already fired or cancelled).
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|t| t.id != id);
        self.entries.len() != before
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.iter().any(|t| t.id == id)
    }

    /// Advance all timers by `dt`, appending one message per elapsed period.
    pub fn tick(&mut self, dt: f32, fired: &mut Vec<TimerFired>) {
        for timer in &mut self.entries {
            timer.elapsed += dt;
            while timer.elapsed >= timer.interval {
                timer.elapsed -= timer.interval;
                fired.push(TimerFired { id: timer.id });
                if !timer.repeating {
                    break;
                }
            }
        }
        self.entries
            .retain(|t| t.repeating || !fired.iter().any(|f| f.id == t.id));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(1.0 / 60.0);
        assert_eq!(steps, 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(0.008); // half a frame
        assert_eq!(steps, 0);
        let steps = ts.accumulate(0.010); // over one frame total
        assert_eq!(steps, 1);
    }

    #[test]
    fn caps_at_ten_steps() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(1.0);
        assert_eq!(steps, 10);
    }

    #[test]
    fn repeating_timer_fires_each_period() {
        let mut timers = Timers::new();
        let id = timers.schedule_repeating(1.0);
        let mut fired = Vec::new();

        timers.tick(0.5, &mut fired);
        assert!(fired.is_empty());
        timers.tick(0.5, &mut fired);
        assert_eq!(fired, vec![TimerFired { id }]);

        fired.clear();
        timers.tick(2.0, &mut fired);
        assert_eq!(fired.len(), 2, "long frame should catch up");
        assert!(timers.is_scheduled(id));
    }

    #[test]
    fn one_shot_timer_is_removed_after_firing() {
        let mut timers = Timers::new();
        let id = timers.schedule_once(0.25);
        let mut fired = Vec::new();

        timers.tick(1.0, &mut fired);
        assert_eq!(fired.len(), 1);
        assert!(!timers.is_scheduled(id));
        assert!(timers.is_empty());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timers = Timers::new();
        let id = timers.schedule_repeating(1.0);
        let mut fired = Vec::new();

        timers.tick(0.9, &mut fired);
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        timers.tick(5.0, &mut fired);
        assert!(fired.is_empty());
    }

    #[test]
    fn ids_are_not_reused() {
        let mut timers = Timers::new();
        let a = timers.schedule_repeating(1.0);
        timers.cancel(a);
        let b = timers.schedule_repeating(1.0);
        assert_ne!(a, b);
    }
}
