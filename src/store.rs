//! Persistent per-channel parameter storage

use crate::level::{CHANNEL_COUNT, ChannelIndex, Intensity};

/// Saved intensity of each channel
///
/// Implement this over EEPROM/flash on real hardware. `load` returns the
/// raw stored byte; the bank rejects anything above the intensity range.
pub trait ParamStore {
    /// Read the saved intensity of a channel
    fn load(&self, channel: ChannelIndex) -> u8;

    /// Save the intensity of a channel
    fn store(&mut self, channel: ChannelIndex, intensity: Intensity);
}

/// RAM-backed parameter store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: [u8; CHANNEL_COUNT],
}

impl MemoryStore {
    pub const fn new() -> Self {
        Self {
            values: [0; CHANNEL_COUNT],
        }
    }

    /// Create a store with preloaded raw values
    pub const fn with_values(values: [u8; CHANNEL_COUNT]) -> Self {
        Self { values }
    }

    pub const fn values(&self) -> [u8; CHANNEL_COUNT] {
        self.values
    }
}

impl ParamStore for MemoryStore {
    fn load(&self, channel: ChannelIndex) -> u8 {
        self.values[channel.slot()]
    }

    fn store(&mut self, channel: ChannelIndex, intensity: Intensity) {
        self.values[channel.slot()] = intensity.value();
    }
}
