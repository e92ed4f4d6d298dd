//! Codec control.
//!
//! [`AudioCodec`] is the seam between the clock controller and the codec
//! hardware: the controller decides *when* to reprogram clocks, the codec
//! implementation knows *which* registers that takes.
//!
//! The NAU88L25 driver is available when the `nau88l25` feature is enabled
//! (on by default).

use crate::clock::{Adjustment, RateFamily, SampleRate};

#[cfg(feature = "nau88l25")]
pub(crate) mod registers;
#[cfg(feature = "nau88l25")]
mod nau88l25;

#[cfg(feature = "nau88l25")]
pub use nau88l25::Nau88l25;

/// Clock programming operations the audio engine needs from a codec.
pub trait AudioCodec {
    /// Error type of the control bus.
    type Error: core::fmt::Debug;

    /// Program the reference clock and dividers for `rate`.
    fn apply_sample_rate(&mut self, rate: SampleRate) -> Result<(), Self::Error>;

    /// Program the PLL fraction for `adjustment` within `family`.
    fn set_pll_fraction(
        &mut self,
        family: RateFamily,
        adjustment: Adjustment,
    ) -> Result<(), Self::Error>;
}
