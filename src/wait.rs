//! Inter-stimulus wait times
//!
//! Trial intervals are drawn uniformly from a half-open range whose lower
//! bound depends on whether rest pauses are shown; the rest pause itself has
//! a fixed length.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::Phase;

/// Trial minimum when rest pauses are shown (ms)
pub const GESTURE_WAIT_MIN_LONG_MS: u64 = 3000;
/// Trial minimum in continuous mode, no rest pauses (ms)
pub const GESTURE_WAIT_MIN_SHORT_MS: u64 = 2000;
/// Fixed length of a rest pause (ms)
pub const REST_DURATION_MS: u64 = 1000;

/// Randomized inter-stimulus delay generator
#[derive(Debug)]
pub struct WaitTimeGenerator {
    max_wait_ms: u64,
    show_rest: bool,
    rng: StdRng,
}

impl WaitTimeGenerator {
    /// Entropy-seeded generator. `max_wait_ms` is the exclusive upper bound
    /// for trial intervals and must exceed the applicable minimum.
    pub fn new(max_wait_ms: u64, show_rest: bool) -> Self {
        Self::with_rng(max_wait_ms, show_rest, StdRng::from_entropy())
    }

    /// Generator with an explicit RNG, for reproducible sessions
    pub fn with_rng(max_wait_ms: u64, show_rest: bool, rng: StdRng) -> Self {
        Self {
            max_wait_ms,
            show_rest,
            rng,
        }
    }

    /// Draw the next wait time for the given phase
    ///
    /// Trial draws are uniform over `[min, max_wait_ms)` where `min` is the
    /// long minimum with rest display enabled and the short minimum without.
    /// Rest draws are always exactly [`REST_DURATION_MS`].
    pub fn next(&mut self, phase: Phase) -> Duration {
        match phase {
            Phase::Rest => Duration::from_millis(REST_DURATION_MS),
            Phase::Trial => {
                let min = if self.show_rest {
                    GESTURE_WAIT_MIN_LONG_MS
                } else {
                    GESTURE_WAIT_MIN_SHORT_MS
                };
                Duration::from_millis(self.rng.gen_range(min..self.max_wait_ms))
            }
        }
    }
}
