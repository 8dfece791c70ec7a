//! Randomized delays between flicker steps

use embassy_time::Duration;

/// Default lower bound of the step delay, inclusive
pub const DEFAULT_MIN_DELAY_MS: u64 = 80;

/// Default upper bound of the step delay, exclusive
pub const DEFAULT_MAX_DELAY_MS: u64 = 150;

/// Source of delays between two flicker steps
///
/// Boards with a hardware RNG can implement this directly.
pub trait DelaySource {
    fn next_delay(&mut self) -> Duration;
}

/// Half-open delay range in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// Width of the range, zero if it is empty or inverted
    pub const fn span(self) -> u64 {
        self.max_ms.saturating_sub(self.min_ms)
    }

    pub const fn contains(self, delay: Duration) -> bool {
        let ms = delay.as_millis();
        ms >= self.min_ms && ms < self.max_ms
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DELAY_MS, DEFAULT_MAX_DELAY_MS)
    }
}

/// Pseudo-random delays drawn uniformly from a [`DelayRange`]
///
/// Uses a 64-bit LCG; good enough for visual jitter, not for anything
/// that needs real randomness.
#[derive(Debug, Clone)]
pub struct JitterDelay {
    range: DelayRange,
    state: u64,
}

impl JitterDelay {
    pub const fn new(range: DelayRange, seed: u64) -> Self {
        Self { range, state: seed }
    }

    pub const fn range(&self) -> DelayRange {
        self.range
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        #[allow(clippy::cast_possible_truncation)]
        let bits = (self.state >> 33) as u32;
        bits
    }
}

impl DelaySource for JitterDelay {
    fn next_delay(&mut self) -> Duration {
        let span = self.range.span();
        if span == 0 {
            return Duration::from_millis(self.range.min_ms);
        }
        let offset = u64::from(self.next_u32()) % span;
        Duration::from_millis(self.range.min_ms + offset)
    }
}
