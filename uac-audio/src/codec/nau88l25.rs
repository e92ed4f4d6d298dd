//! NAU88L25 audio codec driver.
//!
//! Covers what the USB audio bridge needs from the codec: reset, the
//! power-on register image, per-rate clock dividers and the FLL fraction
//! used for clock recovery. The codec runs as I2S master, so its FLL sets
//! the pace at which the playback ring is drained.
//!
//! The driver is generic over any [`embedded_hal::i2c::I2c`] and
//! [`embedded_hal::delay::DelayNs`] implementation.
//!
//! # Example
//!
//! ```ignore
//! let mut codec = Nau88l25::new(i2c, delay);
//! codec.init()?;                               // reset + register image
//! codec.apply_sample_rate(SampleRate::Hz48000)?;
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use super::registers as reg;
use super::AudioCodec;
use crate::clock::{Adjustment, RateFamily, SampleRate};

/// NAU88L25 codec driver.
///
/// The delay provider is only used by [`reset()`](Self::reset).
pub struct Nau88l25<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
}

impl<I2C, D> Nau88l25<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Default 7-bit I2C address.
    pub const DEFAULT_ADDRESS: u8 = reg::I2C_ADDR;

    /// Create a driver at the default address (0x1A).
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::new_with_address(i2c, delay, Self::DEFAULT_ADDRESS)
    }

    /// Create a driver at a specific 7-bit address.
    pub fn new_with_address(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
        }
    }

    // ── Low-level I2C helpers ──────────────────────────────────────────

    /// Write a 16-bit value to a 16-bit register as one 4-byte transfer.
    pub fn write_register(&mut self, register: u16, value: u16) -> Result<(), I2C::Error> {
        let buf = [
            (register >> 8) as u8,
            register as u8,
            (value >> 8) as u8,
            value as u8,
        ];
        self.i2c.write(self.address, &buf)
    }

    /// Read a 16-bit value from a 16-bit register.
    pub fn read_register(&mut self, register: u16) -> Result<u16, I2C::Error> {
        let reg_buf = [(register >> 8) as u8, register as u8];
        let mut val_buf = [0u8; 2];
        self.i2c.write_read(self.address, &reg_buf, &mut val_buf)?;
        Ok(u16::from_be_bytes(val_buf))
    }

    fn write_table(&mut self, table: &[(u16, u16)]) -> Result<(), I2C::Error> {
        for &(register, value) in table {
            self.write_register(register, value)?;
        }
        Ok(())
    }

    // ── Power-on ───────────────────────────────────────────────────────

    /// Software reset followed by a 10 ms settle time.
    pub fn reset(&mut self) -> Result<(), I2C::Error> {
        self.write_register(reg::SW_RESET, 0x0001)?;
        self.write_register(reg::SW_RESET, 0x0000)?;
        self.delay.delay_ms(10);
        log::info!("NAU88L25 software reset");
        Ok(())
    }

    /// Load the power-on register image (48 kHz, I2S master).
    pub fn setup(&mut self) -> Result<(), I2C::Error> {
        self.write_table(reg::INIT_SEQUENCE)?;
        log::info!("NAU88L25 configured");
        Ok(())
    }

    /// [`reset()`](Self::reset) then [`setup()`](Self::setup).
    pub fn init(&mut self) -> Result<(), I2C::Error> {
        self.reset()?;
        self.setup()
    }

    /// Borrow the I2C bus.
    pub fn bus(&self) -> &I2C {
        &self.i2c
    }

    /// Release the I2C bus and delay provider.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

// ── AudioCodec trait implementation ────────────────────────────────────────

impl<I2C, D> AudioCodec for Nau88l25<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = I2C::Error;

    fn apply_sample_rate(&mut self, rate: SampleRate) -> Result<(), Self::Error> {
        self.set_pll_fraction(rate.family(), Adjustment::Centered)?;
        let table = match rate {
            SampleRate::Hz44100 => reg::RATE_44K1,
            SampleRate::Hz48000 => reg::RATE_48K,
            SampleRate::Hz96000 => reg::RATE_96K,
        };
        self.write_table(table)
    }

    fn set_pll_fraction(
        &mut self,
        family: RateFamily,
        adjustment: Adjustment,
    ) -> Result<(), Self::Error> {
        let step = match adjustment {
            Adjustment::Centered => 0,
            Adjustment::SpeedUp => 1,
            Adjustment::SlowDown => 2,
        };
        let (fractions, integer) = match family {
            RateFamily::Multiple8k => (reg::FLL2_FRAC_8K, reg::FLL3_INT_8K),
            RateFamily::Family44k1 => (reg::FLL2_FRAC_44K1, reg::FLL3_INT_44K1),
        };
        self.write_register(reg::FLL2, fractions[step])?;
        self.write_register(reg::FLL3, integer)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
