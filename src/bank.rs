//! Channel state synchronizer
//!
//! Holds the authoritative intensity of every channel and a dirty flag per
//! channel. Setting a channel only records the intent; the periodic flush
//! is the single place that talks to the bus, so any number of writes
//! between two flushes collapse into at most one bus transaction.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::BusWriter;
use crate::DimmerError;
use crate::level::{CHANNEL_COUNT, ChannelIndex, Intensity};
use crate::store::ParamStore;

/// How intensities map to the byte written on the bus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BusPolarity {
    /// Write the intensity as is
    #[default]
    Direct,
    /// Write `100 - intensity`, for drivers with inverted outputs
    Inverted,
}

impl BusPolarity {
    /// Convert an intensity to the bus level
    pub const fn apply(self, intensity: Intensity) -> u8 {
        match self {
            Self::Direct => intensity.value(),
            Self::Inverted => intensity.inverted().value(),
        }
    }
}

/// Current intensities and pending hardware writes of all channels
#[derive(Debug, Clone, Default)]
pub struct ChannelBank {
    values: [Intensity; CHANNEL_COUNT],
    dirty: [bool; CHANNEL_COUNT],
}

impl ChannelBank {
    /// Create a bank with every channel off and nothing pending
    pub const fn new() -> Self {
        Self {
            values: [Intensity::OFF; CHANNEL_COUNT],
            dirty: [false; CHANNEL_COUNT],
        }
    }

    /// Set a channel from an untrusted value
    ///
    /// Returns whether the stored value changed. Out of range values are
    /// rejected and leave the channel untouched.
    pub fn set_channel(&mut self, channel: ChannelIndex, value: i32) -> Result<bool, DimmerError> {
        let intensity = Intensity::try_from(value).inspect_err(|_err| {
            #[cfg(feature = "esp32-log")]
            println!("[ChannelBank] channel {}: {}", channel.index() + 1, _err);
        })?;
        Ok(self.set_intensity(channel, intensity))
    }

    /// Set a channel, marking it dirty only if the value changed
    pub fn set_intensity(&mut self, channel: ChannelIndex, intensity: Intensity) -> bool {
        let slot = channel.slot();
        if self.values[slot] == intensity {
            return false;
        }
        #[cfg(feature = "esp32-log")]
        println!(
            "[ChannelBank] channel {} -> {}",
            channel.index() + 1,
            intensity.value()
        );
        self.values[slot] = intensity;
        self.dirty[slot] = true;
        true
    }

    /// Set every channel to the same value
    pub fn set_all(&mut self, value: i32) -> Result<(), DimmerError> {
        let intensity = Intensity::try_from(value)?;
        for channel in ChannelIndex::ALL {
            self.set_intensity(channel, intensity);
        }
        Ok(())
    }

    /// Current intensity of a channel
    pub const fn value(&self, channel: ChannelIndex) -> Intensity {
        self.values[channel.slot()]
    }

    /// Check if a channel has a change not yet committed to the bus
    pub const fn is_dirty(&self, channel: ChannelIndex) -> bool {
        self.dirty[channel.slot()]
    }

    /// Check if any channel has a pending change
    pub fn has_pending(&self) -> bool {
        self.dirty.contains(&true)
    }

    pub const fn values(&self) -> [Intensity; CHANNEL_COUNT] {
        self.values
    }

    /// Commit every dirty channel to the bus in ascending channel order
    ///
    /// Returns the number of channels written. Channels the bus rejected
    /// stay dirty and are written again on the next flush.
    pub fn flush<B: BusWriter>(&mut self, bus: &mut B, polarity: BusPolarity) -> usize {
        let mut committed = 0;
        for channel in ChannelIndex::ALL {
            let slot = channel.slot();
            if !self.dirty[slot] {
                continue;
            }
            match bus.commit(channel, polarity.apply(self.values[slot])) {
                Ok(()) => {
                    self.dirty[slot] = false;
                    committed += 1;
                }
                Err(_err) => {
                    #[cfg(feature = "esp32-log")]
                    println!(
                        "[ChannelBank] channel {} not committed: {:?}",
                        channel.index() + 1,
                        _err
                    );
                }
            }
        }
        committed
    }

    /// Copy all current values to persistent storage
    ///
    /// Dirty flags are left as they are.
    pub fn save_all<S: ParamStore>(&self, store: &mut S) {
        for channel in ChannelIndex::ALL {
            store.store(channel, self.values[channel.slot()]);
        }
    }

    /// Load all values from persistent storage and force a full resync
    ///
    /// Every channel is marked dirty. A stored byte above the intensity
    /// range is not loaded; the first one found is returned as an error
    /// after the remaining channels have been restored.
    pub fn restore_all<S: ParamStore>(&mut self, store: &S) -> Result<(), DimmerError> {
        let mut result = Ok(());
        for channel in ChannelIndex::ALL {
            let slot = channel.slot();
            let raw = store.load(channel);
            match Intensity::new(raw) {
                Some(intensity) => self.values[slot] = intensity,
                None => {
                    #[cfg(feature = "esp32-log")]
                    println!(
                        "[ChannelBank] ignoring stored value {} for channel {}",
                        raw,
                        channel.index() + 1
                    );
                    if result.is_ok() {
                        result = Err(DimmerError::OutOfRange(i32::from(raw)));
                    }
                }
            }
            self.dirty[slot] = true;
        }
        result
    }
}
