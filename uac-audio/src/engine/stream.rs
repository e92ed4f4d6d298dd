//! Stream control and the isochronous data paths.

use super::{AudioEngine, AudioHardware, Direction};
use crate::clock::SampleRate;
use crate::codec::AudioCodec;
use crate::constants::{FRAME_BYTES, ISO_OUT_MAX_PACKET};
use crate::usb::UsbPort;

const ISO_OUT_MAX_FRAMES: usize = ISO_OUT_MAX_PACKET / FRAME_BYTES;

impl<'a, C, H> AudioEngine<'a, C, H>
where
    C: AudioCodec,
    H: AudioHardware,
{
    // ── Enable / disable ───────────────────────────────────────────────

    /// Enable a stream direction.
    ///
    /// Playback only becomes enabled here; the DMA starts once the ring
    /// holds enough data. Recording starts right away at the current rate.
    pub fn enable(&mut self, direction: Direction) {
        match direction {
            Direction::Play => {
                self.sync_play_geometry();
                self.state.play_enabled = true;
                self.shared.publish_play_enabled(true);
            }
            Direction::Record => {
                if !self.state.record_enabled {
                    self.record.reset();
                    self.configure_codec();
                    self.hardware.start_capture(&mut self.record);
                    self.state.record_enabled = true;
                    log::info!("start record at {} Hz", self.state.sample_rate);
                }
            }
        }
        self.hardware.start_timer();
    }

    /// Disable a stream direction. Safe to call when already disabled.
    pub fn disable(&mut self, direction: Direction) {
        match direction {
            Direction::Play => {
                self.hardware.stop_playback();
                self.play.reset();
                self.sync_play_geometry();
                if self.state.play_enabled {
                    log::info!("stop play");
                }
                self.state.play_enabled = false;
                self.state.audio_playing = false;
                self.shared.publish_play_enabled(false);
                self.shared.publish_occupancy(0);
                self.shared.take_adjustment();
            }
            Direction::Record => {
                self.hardware.stop_capture();
                self.record.reset();
                if self.state.record_enabled {
                    log::info!("stop record");
                }
                self.state.record_enabled = false;
            }
        }
    }

    fn start_playback(&mut self) {
        self.configure_codec();
        self.hardware.start_playback(&self.play);
        self.state.audio_playing = true;
        log::info!(
            "start play at {} Hz with {} slots buffered",
            self.state.sample_rate,
            self.play.occupancy()
        );
    }

    /// Program the codec for the host-selected rate. A bus failure is
    /// logged; the stream runs on whatever clock the codec has.
    pub(super) fn configure_codec(&mut self) {
        let hz = self.state.sample_rate;
        if let Err(e) = self.clock.configure_sample_rate(&mut self.codec, hz) {
            self.log_codec_error(e);
        }
    }

    /// Size capture packets for `rate` and, if the play ring holds nothing,
    /// playback slots too.
    pub(super) fn apply_geometry(&mut self, rate: SampleRate) {
        self.record
            .set_packet_len(rate.record_packet_frames() * FRAME_BYTES);
        self.sync_play_geometry();
    }

    /// Buffered frames keep the slot length they were written with; a new
    /// length only takes effect on an empty ring.
    fn sync_play_geometry(&mut self) {
        let Some(rate) = SampleRate::from_hz(self.state.sample_rate) else {
            return;
        };
        if self.play.slot_len() == rate.play_slot_frames() {
            return;
        }
        if self.play.is_empty() {
            self.play.set_slot_len(rate.play_slot_frames());
        } else {
            log::debug!("play slot length change deferred until the ring drains");
        }
    }

    // ── Isochronous endpoints ──────────────────────────────────────────

    /// Host → device audio. Each little-endian 32-bit word is one stereo
    /// frame; a trailing partial frame is dropped.
    pub(super) fn on_iso_out<P: UsbPort>(&mut self, payload: &[u8], port: &mut P) {
        if self.state.play_enabled {
            if payload.len() > ISO_OUT_MAX_PACKET {
                log::trace!("ISO OUT packet of {} bytes truncated", payload.len());
            }
            let mut frames = [0u32; ISO_OUT_MAX_FRAMES];
            let mut count = 0;
            for (frame, bytes) in frames.iter_mut().zip(payload.chunks_exact(FRAME_BYTES)) {
                *frame = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
                count += 1;
            }

            let overruns = self.play.overruns();
            self.play.write(&frames[..count]);
            if self.play.overruns() != overruns {
                log::debug!("playback overrun, {} total", self.play.overruns());
            }
            self.shared.publish_occupancy(self.play.occupancy());

            if !self.state.audio_playing && self.play.occupancy() >= self.watermarks.start {
                self.start_playback();
            }
        }
        port.iso_out_ready();
    }

    /// Device → host audio: the next captured packet, or a zero-length
    /// packet if capture has not produced one yet.
    pub(super) fn on_iso_in<P: UsbPort>(&mut self, port: &mut P) {
        if !self.state.recording {
            return;
        }
        match self.record.drain() {
            Some(packet) => port.iso_in(packet),
            None => port.iso_in(&[]),
        }
    }
}
