//! USB side of the audio function.
//!
//! The device controller driver translates its interrupts into
//! [`UsbEvent`]s and hands them to the engine together with a [`UsbPort`],
//! through which the engine answers on EP0 and the isochronous endpoints.
//!
//! | Event | Source | Engine reaction |
//! |-------|--------|-----------------|
//! | `Setup` | EP0 SETUP | decode, reply / arm data stage / stall |
//! | `Ep0In` | EP0 IN complete | none |
//! | `Ep0Out` | EP0 OUT data stage | apply pending SET_CUR, status stage |
//! | `IsoIn` | ISO IN token | next capture packet or ZLP |
//! | `IsoOut` | ISO OUT data | append to the playback ring |

pub mod request;

pub use request::{
    decode, Attribute, AudioRequest, Channel, Control, Decoded, SetupPacket, Unit,
};

/// Events delivered by the USB device controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsbEvent<'a> {
    Setup(SetupPacket),
    Ep0In,
    Ep0Out(&'a [u8]),
    IsoIn,
    IsoOut(&'a [u8]),
}

/// Endpoint operations of the device controller.
pub trait UsbPort {
    /// Queue `data` as the EP0 IN data stage.
    fn control_in(&mut self, data: &[u8]);

    /// Arm EP0 OUT for a data stage of `len` bytes.
    fn control_out(&mut self, len: usize);

    /// Send the zero-length status stage.
    fn control_status(&mut self);

    /// Stall EP0 until the next SETUP.
    fn stall(&mut self);

    /// Queue one packet on the ISO IN endpoint. Empty means ZLP.
    fn iso_in(&mut self, data: &[u8]);

    /// Re-arm the ISO OUT endpoint for the next packet.
    fn iso_out_ready(&mut self);
}

/// How the engine disposed of a USB event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlResult {
    Accepted,
    Stalled,
    /// A standard request left for the device core.
    NotHandled,
}
