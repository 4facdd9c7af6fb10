//! Score animation - counter and progress ring
//!
//! Time is simulated in whole ticks so the animation can be driven by any
//! loop (the TUI event loop, the one-shot CLI, or a test) and stays
//! deterministic. One tick advances the counter by `target / steps` and
//! the clock by one tick interval.

use std::f64::consts::PI;
use std::time::Duration;

/// Radius of the score ring
pub const RING_RADIUS: f64 = 90.0;

pub const DEFAULT_TICK: Duration = Duration::from_millis(30);
pub const DEFAULT_STEPS: u32 = 50;
pub const DEFAULT_RING_DELAY: Duration = Duration::from_millis(100);

/// Length of the full ring, `2πr`
pub fn circumference() -> f64 {
    2.0 * PI * RING_RADIUS
}

/// Unfilled arc length for a score: `C - (score / 100) * C`
pub fn ring_offset(score: u8) -> f64 {
    let c = circumference();
    c - (f64::from(score) / 100.0) * c
}

/// One counter step
///
/// Advances `current` by `target / steps`. Returns exactly `target` once
/// the value reaches or passes it, or once the last planned step is taken.
pub fn step(current: f64, target: u8, tick_index: u32, steps: u32) -> f64 {
    let target = f64::from(target);
    let steps = steps.max(1);
    let next = current + target / f64::from(steps);
    if next >= target || tick_index + 1 >= steps {
        target
    } else {
        next
    }
}

/// Counter value as displayed
pub fn display_value(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Animation pacing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTiming {
    pub tick: Duration,
    pub steps: u32,
    pub ring_delay: Duration,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            tick: DEFAULT_TICK,
            steps: DEFAULT_STEPS,
            ring_delay: DEFAULT_RING_DELAY,
        }
    }
}

/// One rendered animation frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub tick: u32,
    pub at: Duration,
    pub value: u8,
    pub ring_offset: f64,
}

/// Drives the counter and the ring toward a target score
#[derive(Debug, Clone)]
pub struct ScoreAnimator {
    timing: AnimationTiming,
    target: Option<u8>,
    current: f64,
    ticks: u32,
    elapsed: Duration,
    counter_done: bool,
    ring_offset: f64,
}

impl ScoreAnimator {
    pub fn new(timing: AnimationTiming) -> Self {
        Self {
            timing,
            target: None,
            current: 0.0,
            ticks: 0,
            elapsed: Duration::ZERO,
            counter_done: false,
            ring_offset: circumference(),
        }
    }

    pub fn timing(&self) -> AnimationTiming {
        self.timing
    }

    /// Restart from zero toward `target`
    pub fn start(&mut self, target: u8) {
        self.reset();
        self.target = Some(target.min(100));
    }

    /// Back to the zero-score state: counter 0, ring empty
    pub fn reset(&mut self) {
        self.target = None;
        self.current = 0.0;
        self.ticks = 0;
        self.elapsed = Duration::ZERO;
        self.counter_done = false;
        self.ring_offset = circumference();
    }

    /// Advance one tick. Returns `None` when idle or already finished.
    pub fn tick(&mut self) -> Option<Frame> {
        let target = self.target?;
        if self.is_finished() {
            return None;
        }

        if !self.counter_done {
            self.current = step(self.current, target, self.ticks, self.timing.steps);
            self.counter_done = self.current >= f64::from(target);
        }
        self.ticks += 1;
        self.elapsed += self.timing.tick;

        if self.elapsed >= self.timing.ring_delay {
            self.ring_offset = ring_offset(target);
        }

        Some(self.frame())
    }

    fn frame(&self) -> Frame {
        Frame {
            tick: self.ticks,
            at: self.elapsed,
            value: self.displayed(),
            ring_offset: self.ring_offset,
        }
    }

    pub fn target(&self) -> Option<u8> {
        self.target
    }

    pub fn displayed(&self) -> u8 {
        display_value(self.current)
    }

    pub fn ring_offset(&self) -> f64 {
        self.ring_offset
    }

    /// Filled fraction of the ring, 0.0 - 1.0
    pub fn ring_progress(&self) -> f64 {
        (1.0 - self.ring_offset / circumference()).clamp(0.0, 1.0)
    }

    pub fn is_running(&self) -> bool {
        self.target.is_some() && !self.is_finished()
    }

    /// Counter settled on the target and the ring has been applied
    pub fn is_finished(&self) -> bool {
        self.target.is_some() && self.counter_done && self.elapsed >= self.timing.ring_delay
    }

    /// Run to completion, collecting every frame
    pub fn run_to_end(&mut self) -> Vec<Frame> {
        std::iter::from_fn(|| self.tick()).collect()
    }
}

impl Default for ScoreAnimator {
    fn default() -> Self {
        Self::new(AnimationTiming::default())
    }
}
