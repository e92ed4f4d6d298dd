//! Audio class request handling on EP0.

use super::{AudioEngine, AudioHardware, Direction};
use crate::clock::SampleRate;
use crate::codec::AudioCodec;
use crate::constants::{PLAY_INTERFACE, RECORD_INTERFACE};
use crate::state::VolumeControl;
use crate::usb::{
    decode, Attribute, AudioRequest, Channel, Control, ControlResult, Decoded, SetupPacket, Unit,
    UsbPort,
};

impl<'a, C, H> AudioEngine<'a, C, H>
where
    C: AudioCodec,
    H: AudioHardware,
{
    pub(super) fn on_setup<P: UsbPort>(&mut self, setup: &SetupPacket, port: &mut P) -> ControlResult {
        // A new SETUP aborts any unfinished control transfer.
        self.pending = None;

        match decode(setup) {
            Decoded::NotOurs => ControlResult::NotHandled,
            Decoded::Unsupported => {
                log::debug!(
                    "stall request {:#04x} type {:#04x} value {:#06x} index {:#06x}",
                    setup.request,
                    setup.request_type,
                    setup.value,
                    setup.index
                );
                port.stall();
                ControlResult::Stalled
            }
            Decoded::Audio(AudioRequest::Get {
                control,
                attribute,
                length,
            }) => {
                let mut buf = [0u8; 4];
                let len = self.read_control(control, attribute, &mut buf);
                port.control_in(&buf[..len.min(length as usize)]);
                ControlResult::Accepted
            }
            Decoded::Audio(AudioRequest::Set { control, length }) => {
                if (length as usize) < control.value_len() {
                    log::debug!("stall SET_CUR {:?} with {} bytes", control, length);
                    port.stall();
                    return ControlResult::Stalled;
                }
                self.pending = Some(control);
                port.control_out(length as usize);
                ControlResult::Accepted
            }
            Decoded::Audio(AudioRequest::SetInterface {
                interface,
                alternate,
            }) => self.set_interface(interface, alternate, port),
        }
    }

    /// EP0 OUT data stage of a SET_CUR.
    pub(super) fn on_control_data<P: UsbPort>(&mut self, data: &[u8], port: &mut P) -> ControlResult {
        let Some(control) = self.pending.take() else {
            log::trace!("EP0 OUT without pending request");
            return ControlResult::Accepted;
        };
        if data.len() < control.value_len() {
            log::debug!("stall SET_CUR {:?}: short data stage", control);
            port.stall();
            return ControlResult::Stalled;
        }

        match control {
            Control::SampleRate => {
                let hz = u32::from_le_bytes([data[0], data[1], data[2], 0]);
                self.set_sample_rate(hz);
            }
            Control::Mute(unit) => {
                *self.mute_mut(unit) = data[0] != 0;
            }
            Control::Volume(unit, channel) => {
                self.volume_mut(unit, channel).cur = i16::from_le_bytes([data[0], data[1]]);
            }
        }
        port.control_status();
        ControlResult::Accepted
    }

    fn read_control(&self, control: Control, attribute: Attribute, buf: &mut [u8; 4]) -> usize {
        match control {
            Control::SampleRate => {
                buf[..3].copy_from_slice(&self.state.sample_rate.to_le_bytes()[..3]);
                3
            }
            Control::Mute(unit) => {
                buf[0] = self.mute(unit) as u8;
                1
            }
            Control::Volume(unit, channel) => {
                let volume = self.volume(unit, channel);
                let value = match attribute {
                    Attribute::Cur => volume.cur,
                    Attribute::Min => volume.min,
                    Attribute::Max => volume.max,
                    Attribute::Res => volume.res,
                };
                buf[..2].copy_from_slice(&value.to_le_bytes());
                2
            }
        }
    }

    /// Host-selected rate. Restarts a running capture at the new rate;
    /// buffered playback keeps its slot length until the ring is emptied.
    fn set_sample_rate(&mut self, hz: u32) {
        let Some(rate) = SampleRate::from_hz(hz) else {
            log::warn!("host requested unsupported sample rate {} Hz", hz);
            return;
        };
        if hz != self.state.sample_rate {
            log::info!("sample rate {} -> {} Hz", self.state.sample_rate, hz);
        }
        self.state.sample_rate = hz;
        self.apply_geometry(rate);

        if self.state.record_enabled {
            self.disable(Direction::Record);
            self.enable(Direction::Record);
        }
    }

    fn set_interface<P: UsbPort>(&mut self, interface: u8, alternate: u8, port: &mut P) -> ControlResult {
        match (interface, alternate) {
            (RECORD_INTERFACE, 1) => {
                self.state.recording = true;
                // Prime the IN endpoint; data follows once capture fills a slot.
                port.iso_in(&[]);
                self.enable(Direction::Record);
            }
            (RECORD_INTERFACE, 0) => {
                self.disable(Direction::Record);
                self.state.recording = false;
            }
            (PLAY_INTERFACE, 1) => {
                port.iso_out_ready();
                self.enable(Direction::Play);
            }
            (PLAY_INTERFACE, 0) => self.disable(Direction::Play),
            (RECORD_INTERFACE | PLAY_INTERFACE, _) => {
                log::debug!("interface {} has no alternate setting {}", interface, alternate);
                port.stall();
                return ControlResult::Stalled;
            }
            _ => return ControlResult::NotHandled,
        }
        port.control_status();
        ControlResult::Accepted
    }

    // ── Control storage ────────────────────────────────────────────────

    fn mute(&self, unit: Unit) -> bool {
        match unit {
            Unit::Record => self.state.record_mute,
            Unit::Play => self.state.play_mute,
        }
    }

    fn mute_mut(&mut self, unit: Unit) -> &mut bool {
        match unit {
            Unit::Record => &mut self.state.record_mute,
            Unit::Play => &mut self.state.play_mute,
        }
    }

    // The play unit has no master control; decoding never produces one,
    // and it would alias the left channel.
    fn volume(&self, unit: Unit, channel: Channel) -> &VolumeControl {
        match (unit, channel) {
            (Unit::Record, _) => &self.state.record_volume,
            (Unit::Play, Channel::Right) => &self.state.play_volume_right,
            (Unit::Play, _) => &self.state.play_volume_left,
        }
    }

    fn volume_mut(&mut self, unit: Unit, channel: Channel) -> &mut VolumeControl {
        match (unit, channel) {
            (Unit::Record, _) => &mut self.state.record_volume,
            (Unit::Play, Channel::Right) => &mut self.state.play_volume_right,
            (Unit::Play, _) => &mut self.state.play_volume_left,
        }
    }
}
