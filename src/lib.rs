#![no_std]

pub mod bank;
pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod flicker;
pub mod i2c;
pub mod jitter;
pub mod level;
pub mod queue;
pub mod script;
pub mod store;
pub mod task;

pub use bank::{BusPolarity, ChannelBank};
pub use command::{DimmerCommand, Reply};
pub use config::{DEFAULT_FLUSH_PERIOD, DimmerConfig};
pub use controller::Dimmer;
pub use error::DimmerError;
pub use flicker::{FlickerEngine, FlickerProgress, FlickerSession};
pub use i2c::I2cDimmerBus;
pub use jitter::{DelayRange, DelaySource, JitterDelay};
pub use queue::{CommandQueue, CommandReceiver, CommandSender};
pub use level::{CHANNEL_COUNT, ChannelIndex, ChannelSelection, Intensity, MAX_INTENSITY};
pub use script::{FlickerScript, ScriptCursor, ScriptToken, parse_leading_int};
pub use store::{MemoryStore, ParamStore};
pub use task::{OneShotTask, TickResult};

pub use embassy_time::{Duration, Instant};

/// Abstract dimmer hardware
///
/// Implement this trait to support different driver boards.
/// The channel bank is the only caller, once per dirty channel and flush.
/// A failed commit leaves the channel dirty, so the next flush retries it.
pub trait BusWriter {
    type Error: core::fmt::Debug;

    /// Write one channel's level (already polarity-adjusted) to the hardware
    fn commit(&mut self, channel: ChannelIndex, level: u8) -> Result<(), Self::Error>;
}
