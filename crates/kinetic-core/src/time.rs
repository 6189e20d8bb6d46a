//! Time Management
//!
//! Simulation time is an explicit millisecond timestamp handed to every
//! tracker. Only the clocks in this module look at the wall clock:
//! - [`SystemClock`] for interactive frame loops
//! - [`ManualClock`] for deterministic stepping and tests
//! - [`FrameClock`] to drive a frame loop from either

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Source of monotonic timestamps in milliseconds
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall clock measured from its creation
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Time since the clock was created
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Jump to an absolute timestamp
    pub fn set(&self, now: f64) {
        self.now.set(now);
    }

    /// Move forward by `millis`
    pub fn advance(&self, millis: f64) {
        self.now.set(self.now.get() + millis);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

/// Frame loop bookkeeping on top of a [`Clock`]
pub struct FrameClock<C: Clock> {
    clock: C,
    /// Timestamp of the first frame
    start_time: Option<f64>,
    /// Timestamp of the last frame
    last_frame_time: Option<f64>,
    /// Milliseconds between the last two frames
    delta_time: f64,
    /// Frame count
    frame_count: u64,
    /// Frame time history for FPS smoothing
    frame_times: [f64; 60],
    /// Current index in frame time history
    frame_time_index: usize,
    /// Number of valid entries in the history
    frame_time_samples: usize,
}

impl<C: Clock> FrameClock<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            start_time: None,
            last_frame_time: None,
            delta_time: 0.0,
            frame_count: 0,
            frame_times: [0.0; 60],
            frame_time_index: 0,
            frame_time_samples: 0,
        }
    }

    /// Begin a frame and return its timestamp
    pub fn tick(&mut self) -> f64 {
        let now = self.clock.now();
        self.start_time.get_or_insert(now);

        if let Some(last) = self.last_frame_time {
            self.delta_time = (now - last).max(0.0);
            self.frame_times[self.frame_time_index] = self.delta_time;
            self.frame_time_index = (self.frame_time_index + 1) % self.frame_times.len();
            self.frame_time_samples = (self.frame_time_samples + 1).min(self.frame_times.len());
        }

        self.last_frame_time = Some(now);
        self.frame_count += 1;
        now
    }

    /// Milliseconds between the last two frames
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Milliseconds since the first frame
    pub fn elapsed(&self) -> f64 {
        match (self.start_time, self.last_frame_time) {
            (Some(start), Some(last)) => last - start,
            _ => 0.0,
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second averaged over recent frames
    pub fn fps(&self) -> f64 {
        if self.frame_time_samples == 0 {
            return 0.0;
        }
        let total: f64 = self.frame_times[..self.frame_time_samples].iter().sum();
        let average = total / self.frame_time_samples as f64;
        if average > 0.0 { 1000.0 / average } else { 0.0 }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(10.0);
        assert_eq!(clock.now(), 10.0);
        clock.advance(5.5);
        assert_eq!(clock.now(), 15.5);
        clock.set(1.0);
        assert_eq!(clock.now(), 1.0);
    }

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now();
        std::thread::sleep(Duration::from_millis(5));
        let second = clock.now();
        assert!(second >= first + 4.0);
    }

    #[test]
    fn test_frame_clock() {
        let mut frames = FrameClock::new(ManualClock::new(100.0));
        assert_eq!(frames.tick(), 100.0);
        assert_eq!(frames.delta_time(), 0.0);
        assert_eq!(frames.fps(), 0.0);

        frames.clock().advance(20.0);
        assert_eq!(frames.tick(), 120.0);
        assert_eq!(frames.delta_time(), 20.0);
        assert!((frames.fps() - 50.0).abs() < 1e-9);

        frames.clock().advance(20.0);
        frames.tick();
        assert_eq!(frames.frame_count(), 3);
        assert_eq!(frames.elapsed(), 40.0);
    }
}
