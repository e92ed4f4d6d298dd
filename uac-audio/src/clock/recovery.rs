use super::{Adjustment, RateFamily, SampleRate};
use crate::codec::AudioCodec;
use crate::error::Error;

/// Tracks what the codec clock is currently programmed to and skips
/// redundant register traffic.
///
/// Every rewrite of the codec's clock registers risks an audible click, so
/// both operations are no-ops when the requested setting is already active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockRecovery {
    current: Adjustment,
    configured: Option<SampleRate>,
}

impl ClockRecovery {
    /// Nothing configured yet; the PLL is assumed centered.
    pub const fn new() -> Self {
        ClockRecovery {
            current: Adjustment::Centered,
            configured: None,
        }
    }

    /// Program the codec for `hz`.
    ///
    /// Returns `Ok(false)` without touching the codec if `hz` is already
    /// configured, `Ok(true)` after reprogramming. An unsupported rate is
    /// rejected before any register is written and leaves the state as is.
    pub fn configure_sample_rate<C: AudioCodec>(
        &mut self,
        codec: &mut C,
        hz: u32,
    ) -> Result<bool, Error<C::Error>> {
        if self.configured.map(SampleRate::hz) == Some(hz) {
            return Ok(false);
        }
        let rate = SampleRate::from_hz(hz).ok_or(Error::UnsupportedSampleRate(hz))?;

        log::info!("configure codec sample rate to {} Hz", hz);
        codec.apply_sample_rate(rate).map_err(Error::Bus)?;

        // The rate tables load the centered fraction.
        self.configured = Some(rate);
        self.current = Adjustment::Centered;
        Ok(true)
    }

    /// Move the PLL to `target`.
    ///
    /// Returns `Ok(false)` without touching the codec if `target` is already
    /// active. The fraction table follows the family of the configured rate,
    /// or the 8 kHz family the codec powers up in.
    pub fn adjust<C: AudioCodec>(
        &mut self,
        codec: &mut C,
        target: Adjustment,
    ) -> Result<bool, C::Error> {
        if target == self.current {
            return Ok(false);
        }
        codec.set_pll_fraction(self.family(), target)?;
        log::debug!("codec PLL {:?} -> {:?}", self.current, target);
        self.current = target;
        Ok(true)
    }

    /// Direction the PLL is currently nudged in.
    pub fn current(&self) -> Adjustment {
        self.current
    }

    /// Rate the codec was last programmed for.
    pub fn configured_rate(&self) -> Option<SampleRate> {
        self.configured
    }

    fn family(&self) -> RateFamily {
        self.configured
            .map(SampleRate::family)
            .unwrap_or(RateFamily::Multiple8k)
    }
}

impl Default for ClockRecovery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Codec stand-in that records clock programming calls.
    #[derive(Default)]
    struct CountingCodec {
        rates: usize,
        last_rate: Option<SampleRate>,
        plls: usize,
        last_pll: Option<(RateFamily, Adjustment)>,
        fail: bool,
    }

    impl CountingCodec {
        fn writes(&self) -> usize {
            self.rates + self.plls
        }
    }

    impl AudioCodec for CountingCodec {
        type Error = ();

        fn apply_sample_rate(&mut self, rate: SampleRate) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.rates += 1;
            self.last_rate = Some(rate);
            Ok(())
        }

        fn set_pll_fraction(&mut self, family: RateFamily, adj: Adjustment) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.plls += 1;
            self.last_pll = Some((family, adj));
            Ok(())
        }
    }

    // ── Sample rate ───────────────────────────────────────────────────

    #[test]
    fn configures_each_supported_rate_once() {
        for hz in [44_100, 48_000, 96_000] {
            let mut codec = CountingCodec::default();
            let mut clock = ClockRecovery::new();

            assert_eq!(clock.configure_sample_rate(&mut codec, hz), Ok(true));
            assert_eq!(codec.last_rate.map(SampleRate::hz), Some(hz));
            assert_eq!(codec.writes(), 1);

            // Same rate again: no codec traffic at all.
            assert_eq!(clock.configure_sample_rate(&mut codec, hz), Ok(false));
            assert_eq!(codec.writes(), 1);
        }
    }

    #[test]
    fn unsupported_rate_is_rejected_without_writes() {
        let mut codec = CountingCodec::default();
        let mut clock = ClockRecovery::new();
        clock.configure_sample_rate(&mut codec, 48_000).unwrap();

        assert_eq!(
            clock.configure_sample_rate(&mut codec, 22_050),
            Err(Error::UnsupportedSampleRate(22_050))
        );
        assert_eq!(clock.configured_rate(), Some(SampleRate::Hz48000));
        assert_eq!(codec.writes(), 1);
    }

    #[test]
    fn unsupported_rate_on_fresh_controller() {
        let mut codec = CountingCodec::default();
        let mut clock = ClockRecovery::new();

        assert!(clock.configure_sample_rate(&mut codec, 22_050).is_err());
        assert_eq!(clock.configured_rate(), None);
        assert_eq!(codec.writes(), 0);
    }

    #[test]
    fn bus_failure_leaves_rate_unconfigured() {
        let mut codec = CountingCodec {
            fail: true,
            ..Default::default()
        };
        let mut clock = ClockRecovery::new();

        assert_eq!(
            clock.configure_sample_rate(&mut codec, 44_100),
            Err(Error::Bus(()))
        );
        assert_eq!(clock.configured_rate(), None);

        codec.fail = false;
        assert_eq!(clock.configure_sample_rate(&mut codec, 44_100), Ok(true));
    }

    #[test]
    fn reconfigure_recenters_pll() {
        let mut codec = CountingCodec::default();
        let mut clock = ClockRecovery::new();
        clock.configure_sample_rate(&mut codec, 48_000).unwrap();
        clock.adjust(&mut codec, Adjustment::SpeedUp).unwrap();

        clock.configure_sample_rate(&mut codec, 44_100).unwrap();
        assert_eq!(clock.current(), Adjustment::Centered);
    }

    // ── Adjustment ────────────────────────────────────────────────────

    #[test]
    fn adjust_is_idempotent() {
        let mut codec = CountingCodec::default();
        let mut clock = ClockRecovery::new();

        assert_eq!(clock.adjust(&mut codec, Adjustment::Centered), Ok(false));
        assert_eq!(codec.writes(), 0);

        assert_eq!(clock.adjust(&mut codec, Adjustment::SlowDown), Ok(true));
        assert_eq!(clock.adjust(&mut codec, Adjustment::SlowDown), Ok(false));
        assert_eq!(codec.plls, 1);

        assert_eq!(clock.adjust(&mut codec, Adjustment::SpeedUp), Ok(true));
        assert_eq!(clock.adjust(&mut codec, Adjustment::Centered), Ok(true));
        assert_eq!(codec.plls, 3);
    }

    #[test]
    fn adjust_follows_configured_family() {
        let mut codec = CountingCodec::default();
        let mut clock = ClockRecovery::new();

        clock.adjust(&mut codec, Adjustment::SpeedUp).unwrap();
        assert_eq!(
            codec.last_pll,
            Some((RateFamily::Multiple8k, Adjustment::SpeedUp))
        );

        clock.configure_sample_rate(&mut codec, 44_100).unwrap();
        clock.adjust(&mut codec, Adjustment::SlowDown).unwrap();
        assert_eq!(
            codec.last_pll,
            Some((RateFamily::Family44k1, Adjustment::SlowDown))
        );
    }

    #[test]
    fn failed_adjust_is_retried() {
        let mut codec = CountingCodec::default();
        let mut clock = ClockRecovery::new();

        codec.fail = true;
        assert!(clock.adjust(&mut codec, Adjustment::SpeedUp).is_err());
        assert_eq!(clock.current(), Adjustment::Centered);

        codec.fail = false;
        assert_eq!(clock.adjust(&mut codec, Adjustment::SpeedUp), Ok(true));
    }
}
