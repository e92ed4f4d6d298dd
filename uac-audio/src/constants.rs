/// Number of slots in the playback (host → device) ring.
pub const PLAY_SLOT_COUNT: usize = 8;

/// Capacity of one playback slot in stereo frames (one `u32` per frame).
pub const PLAY_SLOT_FRAMES: usize = 768;

/// Number of slots in the capture (device → host) ring.
pub const RECORD_SLOT_COUNT: usize = 4;

/// Capacity of one capture slot in bytes (768 stereo 16-bit frames).
pub const RECORD_SLOT_BYTES: usize = 768 * 4;

/// Bytes per stereo 16-bit PCM frame on both USB and I2S.
pub const FRAME_BYTES: usize = 4;

/// Sample rate reported at enumeration, in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 48_000;

/// Maximum payload accepted on the isochronous OUT endpoint
/// (96 kHz stereo 16-bit plus one frame of slack).
pub const ISO_OUT_MAX_PACKET: usize = 388;

// ── Interfaces and entities ────────────────────────────────────────────────

/// Audio streaming interface carrying the isochronous IN (record) endpoint.
pub const RECORD_INTERFACE: u8 = 1;

/// Audio streaming interface carrying the isochronous OUT (play) endpoint.
pub const PLAY_INTERFACE: u8 = 2;

/// Feature unit attached to the record path.
pub const REC_FEATURE_UNIT_ID: u8 = 0x05;

/// Feature unit attached to the playback path.
pub const PLAY_FEATURE_UNIT_ID: u8 = 0x06;

/// 7-bit I2C address of the NAU88L25 codec.
pub const CODEC_I2C_ADDRESS: u8 = 0x1A;
