//! Host-visible device state: stream enables, sample rate, mute and volume.

use crate::constants::DEFAULT_SAMPLE_RATE;

/// Range and current value of one volume control, in the UAC 1/256 dB
/// encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeControl {
    pub cur: i16,
    pub min: i16,
    pub max: i16,
    pub res: i16,
}

impl VolumeControl {
    /// Full signed range in 4 dB steps, starting at +16 dB.
    pub const DEFAULT: VolumeControl = VolumeControl {
        cur: 0x1000,
        min: i16::MIN,
        max: 0x7FFF,
        res: 0x0400,
    };
}

impl Default for VolumeControl {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Everything the host can set or query through class requests, plus the
/// stream flags driven by interface selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceState {
    /// Playback interface selected (alternate setting 1).
    pub play_enabled: bool,
    /// Record interface selected (alternate setting 1).
    pub record_enabled: bool,
    /// Playback DMA running (set once the ring warmed up).
    pub audio_playing: bool,
    /// ISO IN endpoint primed and answering with capture data.
    pub recording: bool,
    /// Host-requested sample rate in Hz.
    pub sample_rate: u32,
    pub record_mute: bool,
    pub play_mute: bool,
    pub record_volume: VolumeControl,
    pub play_volume_left: VolumeControl,
    pub play_volume_right: VolumeControl,
}

impl DeviceState {
    /// Power-on state: streams off, 48 kHz, both paths muted.
    pub const fn new() -> Self {
        DeviceState {
            play_enabled: false,
            record_enabled: false,
            audio_playing: false,
            recording: false,
            sample_rate: DEFAULT_SAMPLE_RATE,
            record_mute: true,
            play_mute: true,
            record_volume: VolumeControl::DEFAULT,
            play_volume_left: VolumeControl::DEFAULT,
            play_volume_right: VolumeControl::DEFAULT,
        }
    }
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::new()
    }
}
