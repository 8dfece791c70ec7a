//! Dimmer driver on an I2C bus
//!
//! Each channel is a single byte register; channel `n` lives at
//! `register_base + n`.

use embedded_hal::i2c::I2c;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::BusWriter;
use crate::level::ChannelIndex;

/// Default 7-bit address of the dimmer board
pub const DEFAULT_ADDRESS: u8 = 0x27;

/// Register of the first channel
pub const DEFAULT_REGISTER_BASE: u8 = 0x80;

/// [`BusWriter`] over an `embedded-hal` I2C peripheral
#[derive(Debug)]
pub struct I2cDimmerBus<I2C> {
    i2c: I2C,
    address: u8,
    register_base: u8,
    failed_writes: u32,
}

impl<I2C: I2c> I2cDimmerBus<I2C> {
    /// Create a driver for the board at the default address
    pub const fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS, DEFAULT_REGISTER_BASE)
    }

    pub const fn with_address(i2c: I2C, address: u8, register_base: u8) -> Self {
        Self {
            i2c,
            address,
            register_base,
            failed_writes: 0,
        }
    }

    /// Number of register writes the bus rejected
    pub const fn failed_writes(&self) -> u32 {
        self.failed_writes
    }

    /// Give the peripheral back
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> BusWriter for I2cDimmerBus<I2C> {
    type Error = I2C::Error;

    fn commit(&mut self, channel: ChannelIndex, level: u8) -> Result<(), Self::Error> {
        let register = self.register_base.wrapping_add(channel.index());
        self.i2c
            .write(self.address, &[register, level])
            .inspect_err(|_err| {
                #[cfg(feature = "esp32-log")]
                println!(
                    "[I2cDimmerBus] write to register {:#04x} failed: {:?}",
                    register, _err
                );
                self.failed_writes = self.failed_writes.saturating_add(1);
            })
    }
}
