//! Sample-rate selection and codec clock recovery.
//!
//! The host sends audio at its own pace while the codec consumes it on a
//! clock derived from the codec's fractional PLL. The two drift apart, so the
//! playback ring slowly fills or drains. A periodic tick compares the ring
//! occupancy against [`Watermarks`] and nudges the PLL one step up or down:
//!
//! ```text
//! occupancy:  0 ..  N/2-1 │ N/2 .. N/2+1 │ .. │ N-2 .. N
//! adjustment:   SlowDown  │   Centered   │    │  SpeedUp
//! ```
//!
//! There is no integral term and no smoothing: the evaluation is a pure
//! threshold function of the current occupancy.

mod recovery;

pub use recovery::ClockRecovery;

/// Sample rates with a codec divider table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleRate {
    Hz44100,
    Hz48000,
    Hz96000,
}

impl SampleRate {
    /// Look up a supported rate by its frequency in Hz.
    pub const fn from_hz(hz: u32) -> Option<Self> {
        match hz {
            44_100 => Some(SampleRate::Hz44100),
            48_000 => Some(SampleRate::Hz48000),
            96_000 => Some(SampleRate::Hz96000),
            _ => None,
        }
    }

    /// Frequency in Hz.
    pub const fn hz(self) -> u32 {
        match self {
            SampleRate::Hz44100 => 44_100,
            SampleRate::Hz48000 => 48_000,
            SampleRate::Hz96000 => 96_000,
        }
    }

    /// Oscillator family the rate is derived from.
    pub const fn family(self) -> RateFamily {
        RateFamily::of_hz(self.hz())
    }

    /// Frames per playback slot (10 ms at 44.1 kHz, 16 ms at 48 kHz).
    pub const fn play_slot_frames(self) -> usize {
        match self {
            SampleRate::Hz44100 => 441,
            SampleRate::Hz48000 | SampleRate::Hz96000 => 768,
        }
    }

    /// Frames per isochronous IN packet on the record path.
    pub const fn record_packet_frames(self) -> usize {
        match self {
            SampleRate::Hz44100 => 444,
            SampleRate::Hz48000 | SampleRate::Hz96000 => 768,
        }
    }
}

impl TryFrom<u32> for SampleRate {
    type Error = u32;

    fn try_from(hz: u32) -> Result<Self, u32> {
        SampleRate::from_hz(hz).ok_or(hz)
    }
}

/// Reference clock family of a sample rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateFamily {
    /// Multiples of 8 kHz, clocked from 12.288 MHz.
    Multiple8k,
    /// The 44.1 kHz family, clocked from 11.2896 MHz.
    Family44k1,
}

impl RateFamily {
    pub const fn of_hz(hz: u32) -> Self {
        if hz % 8_000 == 0 {
            RateFamily::Multiple8k
        } else {
            RateFamily::Family44k1
        }
    }
}

/// Direction of the codec PLL nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Adjustment {
    /// Nominal PLL fraction.
    #[default]
    Centered = 1,
    /// Codec clock raised to drain the ring faster.
    SpeedUp = 2,
    /// Codec clock lowered so the ring can refill.
    SlowDown = 3,
}

impl Adjustment {
    pub(crate) const fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Adjustment::Centered),
            2 => Some(Adjustment::SpeedUp),
            3 => Some(Adjustment::SlowDown),
            _ => None,
        }
    }
}

/// Occupancy thresholds of the playback ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Watermarks {
    /// Lowest occupancy still considered centered.
    pub center_low: usize,
    /// Highest occupancy still considered centered.
    pub center_high: usize,
    /// Occupancy at or above which the codec is sped up.
    pub ceiling: usize,
    /// Occupancy required before playback first starts.
    pub start: usize,
}

impl Watermarks {
    /// Thresholds for a ring of `depth` slots.
    pub const fn for_depth(depth: usize) -> Self {
        Watermarks {
            center_low: depth / 2,
            center_high: depth / 2 + 1,
            ceiling: depth.saturating_sub(2),
            start: depth / 2 + 1,
        }
    }

    /// Map an occupancy sample to the PLL adjustment it calls for.
    pub fn evaluate(&self, occupancy: usize) -> Adjustment {
        if occupancy >= self.center_low && occupancy <= self.center_high {
            Adjustment::Centered
        } else if occupancy >= self.ceiling {
            Adjustment::SpeedUp
        } else {
            Adjustment::SlowDown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_rates() {
        for hz in [44_100, 48_000, 96_000] {
            let rate = SampleRate::from_hz(hz).unwrap();
            assert_eq!(rate.hz(), hz);
        }
        assert_eq!(SampleRate::from_hz(22_050), None);
        assert_eq!(SampleRate::try_from(32_000), Err(32_000));
        assert_eq!(SampleRate::try_from(96_000), Ok(SampleRate::Hz96000));
    }

    #[test]
    fn rate_families() {
        assert_eq!(SampleRate::Hz44100.family(), RateFamily::Family44k1);
        assert_eq!(SampleRate::Hz48000.family(), RateFamily::Multiple8k);
        assert_eq!(SampleRate::Hz96000.family(), RateFamily::Multiple8k);
        assert_eq!(RateFamily::of_hz(16_000), RateFamily::Multiple8k);
        assert_eq!(RateFamily::of_hz(22_050), RateFamily::Family44k1);
    }

    #[test]
    fn buffer_geometry_per_rate() {
        assert_eq!(SampleRate::Hz44100.play_slot_frames(), 441);
        assert_eq!(SampleRate::Hz44100.record_packet_frames(), 444);
        assert_eq!(SampleRate::Hz48000.play_slot_frames(), 768);
        assert_eq!(SampleRate::Hz96000.record_packet_frames(), 768);
    }

    #[test]
    fn adjustment_encoding() {
        for adj in [Adjustment::Centered, Adjustment::SpeedUp, Adjustment::SlowDown] {
            assert_eq!(Adjustment::from_u8(adj as u8), Some(adj));
        }
        assert_eq!(Adjustment::from_u8(0), None);
    }

    #[test]
    fn watermarks_for_depth_8() {
        let w = Watermarks::for_depth(8);
        assert_eq!(w.center_low, 4);
        assert_eq!(w.center_high, 5);
        assert_eq!(w.ceiling, 6);
        assert_eq!(w.start, 5);
    }

    #[test]
    fn policy_over_every_occupancy() {
        for depth in [4usize, 6, 8, 12, 16] {
            let w = Watermarks::for_depth(depth);
            for o in 0..=depth + 2 {
                let expected = if o >= depth / 2 && o <= depth / 2 + 1 {
                    Adjustment::Centered
                } else if o >= depth - 2 {
                    Adjustment::SpeedUp
                } else {
                    Adjustment::SlowDown
                };
                assert_eq!(w.evaluate(o), expected, "depth {depth}, occupancy {o}");
            }
        }
    }

    #[test]
    fn policy_depth_8_table() {
        let w = Watermarks::for_depth(8);
        let expected = [
            Adjustment::SlowDown, // 0
            Adjustment::SlowDown, // 1
            Adjustment::SlowDown, // 2
            Adjustment::SlowDown, // 3
            Adjustment::Centered, // 4
            Adjustment::Centered, // 5
            Adjustment::SpeedUp,  // 6
            Adjustment::SpeedUp,  // 7
            Adjustment::SpeedUp,  // 8
        ];
        for (o, &adj) in expected.iter().enumerate() {
            assert_eq!(w.evaluate(o), adj);
        }
    }
}
