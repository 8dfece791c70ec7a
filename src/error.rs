//! Error taxonomy shared by the channel bank, the script reader and the
//! flicker engine.
//!
//! None of these are fatal: every rejection leaves the affected state as it
//! was, and callers usually just log the error and move on.

use core::fmt;

/// Reasons a request to the dimmer core can be rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimmerError {
    /// Requested intensity is outside `0..=100`
    OutOfRange(i32),
    /// Flicker script token at `offset` is not a number
    ParseFailure { offset: usize },
    /// A flicker session is already running
    ReentrantStart,
    /// Flicker start request selects no channel
    MissingChannelSelection,
    /// Channel index is not one of the four outputs
    InvalidChannel(u8),
    /// Command queue has no free slot
    QueueFull,
}

impl fmt::Display for DimmerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(value) => write!(f, "value {value} out of range"),
            Self::ParseFailure { offset } => {
                write!(f, "could not parse value at index {offset}")
            }
            Self::ReentrantStart => f.write_str("flicker already active"),
            Self::MissingChannelSelection => f.write_str("no channel selected"),
            Self::InvalidChannel(index) => write!(f, "no channel with index {index}"),
            Self::QueueFull => f.write_str("command queue is full"),
        }
    }
}

impl core::error::Error for DimmerError {}
