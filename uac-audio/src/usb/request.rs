//! Setup packet parsing and UAC 1.0 request decoding.
//!
//! Field layout of the 8-byte setup packet:
//!
//! | Byte | Field | Audio class meaning |
//! |------|-------|---------------------|
//! | 0 | `bmRequestType` | direction, type, recipient |
//! | 1 | `bRequest` | GET_CUR, SET_CUR, ... |
//! | 2 | `wValue` low | channel number |
//! | 3 | `wValue` high | control selector |
//! | 4 | `wIndex` low | interface or endpoint |
//! | 5 | `wIndex` high | unit (entity) id |
//! | 6..8 | `wLength` | data stage length |

use crate::constants::{PLAY_FEATURE_UNIT_ID, REC_FEATURE_UNIT_ID};

// ── Request codes ──────────────────────────────────────────────────────────

pub const SET_CUR: u8 = 0x01;
pub const GET_CUR: u8 = 0x81;
pub const GET_MIN: u8 = 0x82;
pub const GET_MAX: u8 = 0x83;
pub const GET_RES: u8 = 0x84;

/// Standard SET_INTERFACE.
pub const SET_INTERFACE: u8 = 0x0B;

// ── Control selectors ──────────────────────────────────────────────────────

/// Feature unit mute.
pub const MUTE_CONTROL: u8 = 0x01;
/// Feature unit volume.
pub const VOLUME_CONTROL: u8 = 0x02;
/// Endpoint sampling frequency.
pub const SAMPLING_FREQ_CONTROL: u8 = 0x01;

/// `bmRequestType` bits 6:5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Standard,
    Class,
    Vendor,
    Reserved,
}

/// `bmRequestType` bits 4:0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    Device,
    Interface,
    Endpoint,
    Other,
}

/// A decoded control setup packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupPacket {
    pub request_type: u8,
    pub request: u8,
    pub value: u16,
    pub index: u16,
    pub length: u16,
}

impl SetupPacket {
    pub const fn from_bytes(buf: [u8; 8]) -> Self {
        SetupPacket {
            request_type: buf[0],
            request: buf[1],
            value: u16::from_le_bytes([buf[2], buf[3]]),
            index: u16::from_le_bytes([buf[4], buf[5]]),
            length: u16::from_le_bytes([buf[6], buf[7]]),
        }
    }

    /// Device-to-host data stage.
    pub const fn is_in(&self) -> bool {
        self.request_type & 0x80 != 0
    }

    pub const fn kind(&self) -> RequestKind {
        match (self.request_type >> 5) & 0x03 {
            0 => RequestKind::Standard,
            1 => RequestKind::Class,
            2 => RequestKind::Vendor,
            _ => RequestKind::Reserved,
        }
    }

    pub const fn recipient(&self) -> Recipient {
        match self.request_type & 0x0F {
            0 => Recipient::Device,
            1 => Recipient::Interface,
            2 => Recipient::Endpoint,
            _ => Recipient::Other,
        }
    }

    pub const fn channel(&self) -> u8 {
        self.value as u8
    }

    pub const fn control_selector(&self) -> u8 {
        (self.value >> 8) as u8
    }

    /// Interface (or endpoint) number from `wIndex`.
    pub const fn interface(&self) -> u8 {
        self.index as u8
    }

    pub const fn unit_id(&self) -> u8 {
        (self.index >> 8) as u8
    }
}

impl From<[u8; 8]> for SetupPacket {
    fn from(buf: [u8; 8]) -> Self {
        SetupPacket::from_bytes(buf)
    }
}

// ── Decoded requests ───────────────────────────────────────────────────────

/// Which feature unit a control belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Record,
    Play,
}

/// Volume channel. The record unit has a single master control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Master,
    Left,
    Right,
}

/// Host-addressable control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    SampleRate,
    Mute(Unit),
    Volume(Unit, Channel),
}

impl Control {
    /// Size of the control's value on the wire.
    pub const fn value_len(self) -> usize {
        match self {
            Control::SampleRate => 3,
            Control::Mute(_) => 1,
            Control::Volume(..) => 2,
        }
    }
}

/// Attribute read by a GET request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Cur,
    Min,
    Max,
    Res,
}

/// A request the audio function answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioRequest {
    Get {
        control: Control,
        attribute: Attribute,
        length: u16,
    },
    Set {
        control: Control,
        length: u16,
    },
    SetInterface {
        interface: u8,
        alternate: u8,
    },
}

/// Outcome of decoding a setup packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    Audio(AudioRequest),
    /// Addressed to the audio function but not supported: stall EP0.
    Unsupported,
    /// A standard request for the device core.
    NotOurs,
}

/// Map a setup packet to the request it carries.
pub fn decode(setup: &SetupPacket) -> Decoded {
    match setup.kind() {
        RequestKind::Standard if setup.request == SET_INTERFACE && !setup.is_in() => {
            Decoded::Audio(AudioRequest::SetInterface {
                interface: setup.interface(),
                alternate: setup.value as u8,
            })
        }
        RequestKind::Standard => Decoded::NotOurs,
        RequestKind::Class => decode_class(setup),
        RequestKind::Vendor | RequestKind::Reserved => Decoded::Unsupported,
    }
}

fn decode_class(setup: &SetupPacket) -> Decoded {
    let attribute = match (setup.request, setup.is_in()) {
        (GET_CUR, true) => Some(Attribute::Cur),
        (GET_MIN, true) => Some(Attribute::Min),
        (GET_MAX, true) => Some(Attribute::Max),
        (GET_RES, true) => Some(Attribute::Res),
        (SET_CUR, false) => None,
        _ => return Decoded::Unsupported,
    };
    let Some(control) = decode_control(setup) else {
        return Decoded::Unsupported;
    };
    let length = setup.length;
    match attribute {
        None => Decoded::Audio(AudioRequest::Set { control, length }),
        Some(Attribute::Cur) => Decoded::Audio(AudioRequest::Get {
            control,
            attribute: Attribute::Cur,
            length,
        }),
        // Only volume has a range.
        Some(attribute) => match control {
            Control::Volume(..) => Decoded::Audio(AudioRequest::Get {
                control,
                attribute,
                length,
            }),
            _ => Decoded::Unsupported,
        },
    }
}

fn decode_control(setup: &SetupPacket) -> Option<Control> {
    let selector = setup.control_selector();
    if setup.recipient() == Recipient::Endpoint {
        return (selector == SAMPLING_FREQ_CONTROL).then_some(Control::SampleRate);
    }
    let unit = match setup.unit_id() {
        REC_FEATURE_UNIT_ID => Unit::Record,
        PLAY_FEATURE_UNIT_ID => Unit::Play,
        _ => return None,
    };
    match selector {
        MUTE_CONTROL => Some(Control::Mute(unit)),
        VOLUME_CONTROL => {
            let channel = match (unit, setup.channel()) {
                (Unit::Record, _) => Channel::Master,
                (Unit::Play, 1) => Channel::Left,
                (Unit::Play, 2) => Channel::Right,
                (Unit::Play, _) => return None,
            };
            Some(Control::Volume(unit, channel))
        }
        _ => None,
    }
}
