//! # uac-audio
//!
//! A `no_std`, zero-allocation USB Audio Class 1.0 device core for a
//! Cortex-M microcontroller bridging a USB host to an I²S codec
//! (NAU88L25). It moves stereo 16-bit PCM both ways:
//!
//! ```text
//! host ──ISO OUT──▶ play ring ──PDMA──▶ I2S TX ──▶ codec DAC
//! host ◀──ISO IN─── capture ring ◀──PDMA── I2S RX ◀── codec ADC
//! ```
//!
//! and keeps the two clock domains together by nudging the codec PLL
//! whenever the playback ring drifts away from half full.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Buffers | [`ring`] | Slot ring (play) and flagged ring (capture) |
//! | Clock | [`clock`] | Sample rates, watermarks, PLL recovery state |
//! | Codec | [`codec`] | `AudioCodec` trait, NAU88L25 driver (feature-gated) |
//! | USB | [`usb`] | Setup decoding, events, endpoint port trait |
//! | Engine | [`engine`] | Stream enable/disable, ISO paths, class requests |
//! | Timer | [`timer`] / [`shared`] | Periodic occupancy check, PLL mailbox |
//!
//! ## Quick start
//!
//! ```ignore
//! use uac_audio::codec::Nau88l25;
//! use uac_audio::engine::{AudioEngine, DmaEvent};
//! use uac_audio::shared::Shared;
//! use uac_audio::timer::RecoveryTimer;
//! use uac_audio::usb::UsbEvent;
//!
//! static SHARED: Shared = Shared::new();
//!
//! let mut codec = Nau88l25::new(i2c, delay);
//! codec.init()?;
//! let mut engine = AudioEngine::new(codec, board, &SHARED);
//! let timer = RecoveryTimer::new(&SHARED, *engine.watermarks());
//!
//! // USB interrupt:
//! engine.handle(UsbEvent::Setup(setup), &mut port);
//! // PDMA interrupt:
//! engine.on_dma(DmaEvent::PlaybackSlotDone);
//! // Timer interrupt (every 10 ms):
//! timer.on_tick();
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `nau88l25` | yes | NAU88L25 codec driver (requires `embedded-hal`) |
//!
//! ## Audio parameters
//!
//! - **Sample rates:** 44 100, 48 000 and 96 000 Hz ([`clock::SampleRate`])
//! - **Sample format:** stereo `i16`, one `u32` word per frame
//! - **Play ring:** 8 slots of up to 768 frames ([`constants::PLAY_SLOT_COUNT`])
//! - **Capture ring:** 4 slots of up to 768 frames ([`constants::RECORD_SLOT_COUNT`])

#![no_std]

pub mod clock;
pub mod codec;
pub mod constants;
pub mod engine;
pub mod error;
pub mod ring;
pub mod shared;
pub mod state;
pub mod timer;
pub mod usb;

#[cfg(test)]
pub(crate) mod testing;


pub use error::Error;
