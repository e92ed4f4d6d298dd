//! Periodic clock-recovery tick.
//!
//! Runs from a hardware timer interrupt (nominally every 10 ms). Each tick
//! samples the playback ring occupancy and posts the PLL adjustment it
//! calls for; the engine applies it on its next pass. Nothing happens while
//! playback is disabled.

use crate::clock::{Adjustment, Watermarks};
use crate::shared::Shared;

/// Clock-recovery timer handler.
pub struct RecoveryTimer<'a> {
    shared: &'a Shared,
    watermarks: Watermarks,
}

impl<'a> RecoveryTimer<'a> {
    pub const fn new(shared: &'a Shared, watermarks: Watermarks) -> Self {
        RecoveryTimer { shared, watermarks }
    }

    /// Timer interrupt body. Returns the adjustment that was posted.
    pub fn on_tick(&self) -> Option<Adjustment> {
        if !self.shared.play_enabled() {
            return None;
        }
        let occupancy = self.shared.occupancy();
        let adjustment = self.watermarks.evaluate(occupancy);
        log::trace!("occupancy {} -> {:?}", occupancy, adjustment);
        self.shared.request_adjustment(adjustment);
        Some(adjustment)
    }
}
