//! The audio function engine.
//!
//! [`AudioEngine`] owns everything the USB and DMA interrupts mutate: the
//! codec, both rings, the host-visible [`DeviceState`] and the clock
//! recovery state. The firmware keeps it in one interrupt-safe cell and
//! routes events into it:
//!
//! | Context | Entry point |
//! |---------|-------------|
//! | USB interrupt | [`handle()`](AudioEngine::handle) |
//! | PDMA completion | [`on_dma()`](AudioEngine::on_dma), [`capture_dma_target()`](AudioEngine::capture_dma_target) |
//! | Main loop / idle | [`service()`](AudioEngine::service) |
//! | Timer interrupt | [`RecoveryTimer`](crate::timer::RecoveryTimer), via [`Shared`] only |
//!
//! Because the engine is the only codec owner, PLL requests from the timer
//! are applied by [`service()`](AudioEngine::service), which
//! [`handle()`](AudioEngine::handle) also calls on every event.
//!
//! # Example
//!
//! ```ignore
//! static SHARED: Shared = Shared::new();
//!
//! let mut codec = Nau88l25::new(i2c, delay);
//! codec.init()?;
//! let mut engine = AudioEngine::new(codec, hardware, &SHARED);
//!
//! // USB interrupt:
//! engine.handle(UsbEvent::IsoOut(packet), &mut port);
//! ```

mod control;
mod stream;

use crate::clock::{ClockRecovery, SampleRate, Watermarks};
use crate::codec::AudioCodec;
use crate::constants::{PLAY_SLOT_COUNT, PLAY_SLOT_FRAMES, RECORD_SLOT_BYTES, RECORD_SLOT_COUNT};
use crate::error::Error;
use crate::ring::{CaptureRing, SlotRing};
use crate::shared::Shared;
use crate::state::DeviceState;
use crate::usb::{Control, ControlResult, UsbEvent, UsbPort};

/// Playback ring: one `u32` per stereo 16-bit frame.
pub type PlayRing = SlotRing<u32, PLAY_SLOT_FRAMES, PLAY_SLOT_COUNT>;

/// Capture ring: raw packet bytes as the host receives them.
pub type RecordRing = CaptureRing<RECORD_SLOT_BYTES, RECORD_SLOT_COUNT>;

/// Stream direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Play,
    Record,
}

/// PDMA completion events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmaEvent {
    /// The I2S TX channel finished the slot at the play read index.
    PlaybackSlotDone,
    /// The I2S RX channel finished the capture slot it was filling.
    CaptureSlotFilled,
}

/// DMA and I2S control of the board.
///
/// Implementations program the scatter-gather tables from the rings they
/// are handed; the engine only decides when streams start and stop.
pub trait AudioHardware {
    /// Start I2S TX and its DMA channel over the sealed slots of `ring`.
    fn start_playback(&mut self, ring: &PlayRing);

    /// Stop I2S TX and its DMA channel immediately.
    fn stop_playback(&mut self);

    /// Start I2S RX and its DMA channel into `ring`.
    fn start_capture(&mut self, ring: &mut RecordRing);

    /// Stop I2S RX and its DMA channel immediately.
    fn stop_capture(&mut self);

    /// Start the periodic clock-recovery timer. Called on every enable.
    fn start_timer(&mut self);
}

/// USB audio function state machine.
pub struct AudioEngine<'a, C, H> {
    codec: C,
    hardware: H,
    shared: &'a Shared,
    clock: ClockRecovery,
    watermarks: Watermarks,
    state: DeviceState,
    play: PlayRing,
    record: RecordRing,
    /// SET_CUR waiting for its data stage.
    pending: Option<Control>,
}

impl<'a, C, H> AudioEngine<'a, C, H>
where
    C: AudioCodec,
    H: AudioHardware,
{
    /// Create an engine in the power-on state. `codec` should already be
    /// initialized.
    pub fn new(codec: C, hardware: H, shared: &'a Shared) -> Self {
        let mut engine = AudioEngine {
            codec,
            hardware,
            shared,
            clock: ClockRecovery::new(),
            watermarks: Watermarks::for_depth(PLAY_SLOT_COUNT),
            state: DeviceState::new(),
            play: PlayRing::new(),
            record: RecordRing::new(),
            pending: None,
        };
        if let Some(rate) = SampleRate::from_hz(engine.state.sample_rate) {
            engine.apply_geometry(rate);
        }
        shared.publish_play_enabled(false);
        shared.publish_occupancy(0);
        engine
    }

    /// Process one USB event.
    pub fn handle<P: UsbPort>(&mut self, event: UsbEvent<'_>, port: &mut P) -> ControlResult {
        self.service();
        match event {
            UsbEvent::Setup(setup) => self.on_setup(&setup, port),
            UsbEvent::Ep0In => ControlResult::Accepted,
            UsbEvent::Ep0Out(data) => self.on_control_data(data, port),
            UsbEvent::IsoIn => {
                self.on_iso_in(port);
                ControlResult::Accepted
            }
            UsbEvent::IsoOut(payload) => {
                self.on_iso_out(payload, port);
                ControlResult::Accepted
            }
        }
    }

    /// Apply the PLL request posted by the timer, if any.
    ///
    /// Returns `true` if codec registers were written. Requests that arrive
    /// after playback was disabled are dropped.
    pub fn service(&mut self) -> bool {
        let Some(target) = self.shared.take_adjustment() else {
            return false;
        };
        if !self.state.play_enabled {
            return false;
        }
        match self.clock.adjust(&mut self.codec, target) {
            Ok(changed) => changed,
            Err(e) => {
                log::warn!("codec PLL update failed: {:?}", e);
                false
            }
        }
    }

    /// Process a PDMA completion.
    ///
    /// For [`DmaEvent::PlaybackSlotDone`] returns the length of the next
    /// sealed slot to re-arm, or `None` on underrun.
    pub fn on_dma(&mut self, event: DmaEvent) -> Option<usize> {
        match event {
            DmaEvent::PlaybackSlotDone => {
                if !self.state.audio_playing {
                    return None;
                }
                self.play.release();
                self.shared.publish_occupancy(self.play.occupancy());
                let next = self.play.peek_sealed().map(<[u32]>::len);
                if next.is_none() {
                    log::trace!("playback underrun");
                }
                next
            }
            DmaEvent::CaptureSlotFilled => {
                if self.state.record_enabled && !self.record.mark_filled() {
                    log::debug!("capture overrun, {} total", self.record.overruns());
                }
                None
            }
        }
    }

    /// Buffer the capture DMA channel should fill next.
    pub fn capture_dma_target(&mut self) -> &mut [u8; RECORD_SLOT_BYTES] {
        self.record.dma_target()
    }

    /// Program the codec for `hz` right away.
    pub fn configure_sample_rate(&mut self, hz: u32) -> Result<bool, Error<C::Error>> {
        self.clock.configure_sample_rate(&mut self.codec, hz)
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    pub fn play_ring(&self) -> &PlayRing {
        &self.play
    }

    pub fn record_ring(&self) -> &RecordRing {
        &self.record
    }

    pub fn clock(&self) -> &ClockRecovery {
        &self.clock
    }

    pub fn watermarks(&self) -> &Watermarks {
        &self.watermarks
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    /// Tear down and return the codec and hardware.
    pub fn release(self) -> (C, H) {
        (self.codec, self.hardware)
    }

    fn log_codec_error(&self, e: Error<C::Error>) {
        log::warn!("{}", e);
    }
}
