use std::time::Duration;

/// Decides when the snake moves, on macroquad's clock (`get_time()`
/// seconds). Frames run at whatever rate `next_frame()` gives; a tick is due
/// once `interval` has passed since the previous one.
pub struct TickClock {
    interval: f64,
    last_tick: f64,
    last_frame: f64,
}

impl TickClock {
    pub fn new(interval: Duration, now: f64) -> Self {
        Self {
            interval: interval.as_secs_f64(),
            last_tick: now,
            last_frame: now,
        }
    }

    /// Seconds since the previous frame.
    pub fn frame(&mut self, now: f64) -> f32 {
        let dt = (now - self.last_frame).max(0.0);
        self.last_frame = now;
        dt as f32
    }

    /// Seconds left until the next tick, zero when it is due.
    pub fn remaining(&self, now: f64) -> f64 {
        (self.interval - (now - self.last_tick)).max(0.0)
    }

    pub fn tick_due(&mut self, now: f64) -> bool {
        if self.remaining(now) > 0.0 {
            return false;
        }
        self.last_tick = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_once_per_interval() {
        let mut clock = TickClock::new(Duration::from_millis(250), 10.0);
        assert_eq!(clock.remaining(10.0), 0.25);
        assert!(!clock.tick_due(10.125));
        assert_eq!(clock.remaining(10.125), 0.125);
        assert!(clock.tick_due(10.25));
        assert!(!clock.tick_due(10.25));
        assert!(!clock.tick_due(10.375));
        assert!(clock.tick_due(10.75));
        assert_eq!(clock.remaining(11.5), 0.0);
    }

    #[test]
    fn frame_delta() {
        let mut clock = TickClock::new(Duration::from_millis(100), 1.0);
        assert_eq!(clock.frame(1.5), 0.5);
        assert_eq!(clock.frame(1.75), 0.25);
        // A clock that steps backwards never yields a negative delta.
        assert_eq!(clock.frame(1.0), 0.0);
    }
}
