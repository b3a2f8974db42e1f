//! Count-up animation for the statistics counters.
//!
//! The value advances in fixed 16 ms frames by `target / (duration / 16)`
//! per frame and is shown floored, so a 2000 ms animation takes 125 frames.

use std::time::{Duration, Instant};

use crate::util::format_thousands;

pub const FRAME: Duration = Duration::from_millis(16);
pub const COUNTER_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct CountUp {
    target: u64,
    duration: Duration,
    started: Instant,
}

impl CountUp {
    pub fn new(target: u64, duration: Duration, started: Instant) -> Self {
        Self { target, duration, started }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// Restart toward a new target, unless it is unchanged
    pub fn retarget(&mut self, target: u64, now: Instant) {
        if target != self.target {
            self.target = target;
            self.started = now;
        }
    }

    pub fn value(&self, now: Instant) -> u64 {
        let frames_total = self.duration.as_millis() as f64 / FRAME.as_millis() as f64;
        if frames_total <= 0.0 {
            return self.target;
        }
        let step = self.target as f64 / frames_total;
        let frames = (now.saturating_duration_since(self.started).as_millis() / FRAME.as_millis()) as f64;
        let current = step * frames;
        if current >= self.target as f64 {
            self.target
        } else {
            current.floor() as u64
        }
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.value(now) >= self.target
    }

    /// Current value with grouped thousands
    pub fn display(&self, now: Instant) -> String {
        format_thousands(self.value(now))
    }
}

/// Status bar statistics: total rows, visible rows, distinct categories
#[derive(Debug, Clone)]
pub struct Stats {
    pub total: CountUp,
    pub visible: CountUp,
    pub categories: CountUp,
}

impl Stats {
    pub fn new(duration: Duration, now: Instant) -> Self {
        Self {
            total: CountUp::new(0, duration, now),
            visible: CountUp::new(0, duration, now),
            categories: CountUp::new(0, duration, now),
        }
    }

    pub fn update(&mut self, total: usize, visible: usize, categories: usize, now: Instant) {
        self.total.retarget(total as u64, now);
        self.visible.retarget(visible as u64, now);
        self.categories.retarget(categories as u64, now);
    }

    /// True while any counter is still animating
    pub fn animating(&self, now: Instant) -> bool {
        !(self.total.is_finished(now) && self.visible.is_finished(now) && self.categories.is_finished(now))
    }
}
