//! Tick timing.
//!
//! One clock drives the whole simulation: the turbulence phase, the ambient
//! camera sway and the tick counter all read from it. Hosts that need
//! reproducible runs pin a fixed delta; interactive hosts let it follow
//! wall time.

use std::time::{Duration, Instant};

/// Clock for the tick loop.
#[derive(Debug)]
pub struct Clock {
    start: Instant,
    last_tick: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    tick_count: u64,
    paused: bool,
    pause_elapsed: Duration,
    fixed_delta: Option<f32>,
}

impl Clock {
    /// Create a clock starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            tick_count: 0,
            paused: false,
            pause_elapsed: Duration::ZERO,
            fixed_delta: None,
        }
    }

    /// Advance the clock. Called once at the top of each tick.
    ///
    /// Returns `(elapsed, delta)` in seconds. While paused, delta is 0 and
    /// elapsed stops increasing.
    pub fn update(&mut self) -> (f32, f32) {
        if self.paused {
            self.delta_secs = 0.0;
            return (self.elapsed_secs, 0.0);
        }
        let now = Instant::now();

        match self.fixed_delta {
            Some(dt) => {
                self.delta_secs = dt;
                self.elapsed_secs += dt;
            }
            None => {
                self.delta_secs = now.duration_since(self.last_tick).as_secs_f32();
                self.elapsed_secs =
                    (now.duration_since(self.start) - self.pause_elapsed).as_secs_f32();
            }
        }
        self.last_tick = now;
        self.tick_count += 1;

        (self.elapsed_secs, self.delta_secs)
    }

    /// Elapsed simulation time in seconds.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Seconds consumed by the last tick.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Ticks completed since start.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.tick_count
    }

    /// Whether the clock is paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop time. Subsequent updates return delta 0.
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
        }
    }

    /// Resume after a pause. The paused span does not count as elapsed.
    pub fn resume(&mut self) {
        if self.paused {
            let now = Instant::now();
            self.pause_elapsed += now.duration_since(self.last_tick);
            self.last_tick = now;
            self.paused = false;
        }
    }

    /// Pin a fixed per-tick delta for deterministic runs, or `None` to
    /// follow wall time again.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_new_clock() {
        let clock = Clock::new();
        assert_eq!(clock.ticks(), 0);
        assert_eq!(clock.elapsed(), 0.0);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_update_advances() {
        let mut clock = Clock::new();
        thread::sleep(Duration::from_millis(5));
        let (elapsed, delta) = clock.update();
        assert!(elapsed > 0.0);
        assert!(delta > 0.0);
        assert_eq!(clock.ticks(), 1);
    }

    #[test]
    fn test_fixed_delta_ignores_wall_time() {
        let mut clock = Clock::new();
        clock.set_fixed_delta(Some(1.0 / 60.0));
        thread::sleep(Duration::from_millis(20));
        clock.update();
        clock.update();
        assert!((clock.delta() - 1.0 / 60.0).abs() < 1e-6);
        assert!((clock.elapsed() - 2.0 / 60.0).abs() < 1e-6);
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn test_pause_freezes_elapsed() {
        let mut clock = Clock::new();
        clock.update();
        clock.pause();
        let before = clock.elapsed();
        thread::sleep(Duration::from_millis(5));
        let (elapsed, delta) = clock.update();
        assert_eq!(elapsed, before);
        assert_eq!(delta, 0.0);
    }

    #[test]
    fn test_resume_excludes_paused_span() {
        let mut clock = Clock::new();
        clock.set_fixed_delta(Some(0.1));
        clock.update();
        clock.pause();
        thread::sleep(Duration::from_millis(10));
        clock.resume();
        clock.update();
        // Two real ticks at 0.1s each, pause excluded.
        assert!((clock.elapsed() - 0.2).abs() < 1e-6);
    }
}
