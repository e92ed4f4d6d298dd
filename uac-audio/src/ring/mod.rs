//! Ring buffer store for the two PCM directions.
//!
//! | Ring | Producer | Consumer | Slot state |
//! |------|----------|----------|------------|
//! | [`SlotRing`] (play) | ISO OUT handler | PDMA → I2S TX | sealed length |
//! | [`CaptureRing`] (record) | I2S RX → PDMA | ISO IN handler | full flag |
//!
//! Each ring has exactly one producer and one consumer. Neither ring applies
//! backpressure: isochronous transfers have no flow control, so overwrites
//! are counted rather than refused.

pub mod capture;
pub mod slots;

pub use capture::CaptureRing;
pub use slots::SlotRing;
