//! Animation Trackers
//!
//! A tracker accumulates `elapsed × direction × speed` while it runs. Time is
//! passed in explicitly as milliseconds, so a tracker never reads a clock.

use std::fmt;
use std::ops::Neg;
use std::sync::Arc;

/// Sign of a tracker's motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    /// Direction matching the sign of `value`; zero counts as forward
    pub fn from_sign(value: f64) -> Self {
        if value < 0.0 {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }

    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Reverse => -1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

impl Neg for Direction {
    type Output = Direction;

    fn neg(self) -> Direction {
        self.reversed()
    }
}

/// Rate of change in units per millisecond, re-evaluated on every advance
#[derive(Clone)]
pub struct Speed(Arc<dyn Fn() -> f64 + Send + Sync>);

impl Speed {
    pub fn constant(value: f64) -> Self {
        Self(Arc::new(move || value))
    }

    pub fn from_fn(f: impl Fn() -> f64 + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Current speed
    pub fn get(&self) -> f64 {
        (self.0)()
    }

    /// Speed that follows this one, multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        let inner = self.clone();
        Self::from_fn(move || factor * inner.get())
    }
}

impl From<f64> for Speed {
    fn from(value: f64) -> Self {
        Speed::constant(value)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Speed::constant(1.0)
    }
}

impl fmt::Debug for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Speed").field(&self.get()).finish()
    }
}

/// Pausable accumulator for one animated scalar
#[derive(Debug, Clone, Default)]
pub struct AnimationTracker {
    speed: Speed,
    direction: Direction,
    /// Timestamp of the last flush; `None` while stopped
    last_updated: Option<f64>,
    position: f64,
}

impl AnimationTracker {
    /// Create a stopped tracker at position zero
    pub fn new(speed: impl Into<Speed>) -> Self {
        Self {
            speed: speed.into(),
            ..Default::default()
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn is_running(&self) -> bool {
        self.last_updated.is_some()
    }

    /// Start accumulating from `now`; no-op if already running
    pub fn start(&mut self, now: f64) {
        if self.last_updated.is_none() {
            self.last_updated = Some(now);
        }
    }

    /// Flush time up to `now` and stop; returns the final position
    pub fn stop(&mut self, now: f64) -> f64 {
        self.advance(now);
        self.last_updated = None;
        self.position
    }

    /// Flip between running and stopped; returns whether it now runs
    pub fn toggle(&mut self, now: f64) -> bool {
        if self.is_running() {
            self.stop(now);
        } else {
            self.start(now);
        }
        self.is_running()
    }

    /// Flush time up to `now` and return the new position.
    ///
    /// Stopped trackers keep their position.
    pub fn advance(&mut self, now: f64) -> f64 {
        if let Some(last) = self.last_updated {
            self.position += (now - last) * self.direction.sign() * self.speed.get();
            self.last_updated = Some(now);
        }
        self.position
    }

    /// Position as of the last flush
    pub fn peek(&self) -> f64 {
        self.position
    }

    /// Return to position zero without changing the running state
    pub fn reset(&mut self) {
        self.position = 0.0;
    }

    pub fn set_position(&mut self, position: f64) {
        self.position = position;
    }

    pub fn offset(&mut self, delta: f64) {
        self.position += delta;
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn speed(&self) -> &Speed {
        &self.speed
    }

    pub fn set_speed(&mut self, speed: impl Into<Speed>) {
        self.speed = speed.into();
    }
}
