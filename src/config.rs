use embassy_time::Duration;

use crate::bank::BusPolarity;

/// Default period of the channel flush task
pub const DEFAULT_FLUSH_PERIOD: Duration = Duration::from_millis(100);

/// Configuration for the dimmer run loop
#[derive(Debug, Clone, Copy)]
pub struct DimmerConfig<'a> {
    /// Comma separated brightness values played by the flicker engine
    pub script: &'a str,
    /// Interval between two flushes of dirty channels
    pub flush_period: Duration,
    /// Mapping from intensity to the byte written on the bus
    pub polarity: BusPolarity,
}

impl<'a> DimmerConfig<'a> {
    /// Configuration with default timings and direct polarity
    pub const fn new(script: &'a str) -> Self {
        Self {
            script,
            flush_period: DEFAULT_FLUSH_PERIOD,
            polarity: BusPolarity::Direct,
        }
    }

    #[must_use]
    pub const fn with_flush_period(mut self, flush_period: Duration) -> Self {
        self.flush_period = flush_period;
        self
    }

    #[must_use]
    pub const fn with_polarity(mut self, polarity: BusPolarity) -> Self {
        self.polarity = polarity;
        self
    }
}
