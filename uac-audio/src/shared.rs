//! State visible to the clock-recovery timer.
//!
//! The timer interrupt never touches the codec or the rings. It reads the
//! two values the engine publishes here and leaves its verdict in a
//! one-slot mailbox that the engine drains from its own context.
//!
//! # Contexts
//!
//! - The engine (USB / DMA interrupts) is the only writer of
//!   `play_enabled` and `occupancy`, and the only reader of the mailbox.
//! - The timer is the only writer of the mailbox.
//!
//! A newer request overwrites an unread one: only the latest occupancy
//! verdict matters.

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};

use crate::clock::Adjustment;

/// Mailbox value meaning "no request pending".
const NO_REQUEST: u8 = 0;

/// Engine ↔ timer hand-off, meant to live in a `static`.
pub struct Shared {
    play_enabled: AtomicBool,
    occupancy: AtomicUsize,
    pll_request: AtomicU8,
}

impl Shared {
    pub const fn new() -> Self {
        Shared {
            play_enabled: AtomicBool::new(false),
            occupancy: AtomicUsize::new(0),
            pll_request: AtomicU8::new(NO_REQUEST),
        }
    }

    // ── Engine side ───────────────────────────────────────────────────

    pub(crate) fn publish_play_enabled(&self, enabled: bool) {
        self.play_enabled.store(enabled, Ordering::Release);
    }

    pub(crate) fn publish_occupancy(&self, occupancy: usize) {
        self.occupancy.store(occupancy, Ordering::Release);
    }

    /// Take the pending PLL request, if any.
    pub(crate) fn take_adjustment(&self) -> Option<Adjustment> {
        Adjustment::from_u8(self.pll_request.swap(NO_REQUEST, Ordering::AcqRel))
    }

    // ── Timer side ────────────────────────────────────────────────────

    /// Whether the host has the playback interface enabled.
    pub fn play_enabled(&self) -> bool {
        self.play_enabled.load(Ordering::Acquire)
    }

    /// Playback ring occupancy as last published by the engine.
    pub fn occupancy(&self) -> usize {
        self.occupancy.load(Ordering::Acquire)
    }

    /// Post a PLL request, replacing any unread one.
    pub fn request_adjustment(&self, adjustment: Adjustment) {
        self.pll_request.store(adjustment as u8, Ordering::Release);
    }

    /// Whether a request is waiting for the engine.
    pub fn has_pending_adjustment(&self) -> bool {
        self.pll_request.load(Ordering::Acquire) != NO_REQUEST
    }
}

impl Default for Shared {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let shared = Shared::new();
        assert!(!shared.play_enabled());
        assert_eq!(shared.occupancy(), 0);
        assert!(!shared.has_pending_adjustment());
        assert_eq!(shared.take_adjustment(), None);
    }

    #[test]
    fn published_values_are_visible() {
        let shared = Shared::new();
        shared.publish_play_enabled(true);
        shared.publish_occupancy(6);
        assert!(shared.play_enabled());
        assert_eq!(shared.occupancy(), 6);
    }

    #[test]
    fn latest_request_wins() {
        let shared = Shared::new();
        shared.request_adjustment(Adjustment::SpeedUp);
        shared.request_adjustment(Adjustment::SlowDown);
        assert!(shared.has_pending_adjustment());

        assert_eq!(shared.take_adjustment(), Some(Adjustment::SlowDown));
        assert_eq!(shared.take_adjustment(), None);
    }

    #[test]
    fn works_from_a_static() {
        static SHARED: Shared = Shared::new();
        SHARED.request_adjustment(Adjustment::Centered);
        assert_eq!(SHARED.take_adjustment(), Some(Adjustment::Centered));
    }
}
