//! Multi-slot ring used on the playback path.
//!
//! The producer appends variable-length payloads at a write cursor. When a
//! payload does not fit in the active slot, the slot is filled to capacity,
//! sealed with its final length, and writing continues in the next slot. The
//! consumer (DMA on hardware) walks sealed slots from the read cursor.
//!
//! ```text
//!   read_idx                write_idx
//!      │                        │
//!      ▼                        ▼
//!  ┌────────┬────────┬────────┬────────┐
//!  │ sealed │ sealed │ sealed │ ▓▓▓░░░ │   occupancy = 3
//!  └────────┴────────┴────────┴────────┘
//!                               └ write_pos
//! ```
//!
//! There is no backpressure. A seal that leaves no free slot means the writer
//! has lapped the reader: the oldest unconsumed slot is discarded, the reader
//! moves past it, and the event is counted in
//! [`overruns()`](SlotRing::overruns). At most `N - 1` slots are ever sealed
//! alongside the active one.

/// Fixed-depth ring of `N` slots, each holding up to `CAP` elements.
///
/// The usable length of every slot can be reduced at runtime with
/// [`set_slot_len()`](Self::set_slot_len), e.g. to match a sample rate.
pub struct SlotRing<T, const CAP: usize, const N: usize> {
    slots: [[T; CAP]; N],
    /// Final length of each slot, recorded when it is sealed.
    lens: [usize; N],
    write_idx: usize,
    write_pos: usize,
    read_idx: usize,
    slot_len: usize,
    /// Sealed slots not yet released by the consumer.
    occupancy: usize,
    overruns: u32,
}

impl<T: Copy + Default, const CAP: usize, const N: usize> SlotRing<T, CAP, N> {
    /// Create an empty ring with every slot at full capacity.
    pub fn new() -> Self {
        assert!(N >= 2, "slot ring needs at least 2 slots");
        assert!(CAP >= 1, "slot ring slots must hold at least 1 element");

        SlotRing {
            slots: [[T::default(); CAP]; N],
            lens: [0; N],
            write_idx: 0,
            write_pos: 0,
            read_idx: 0,
            slot_len: CAP,
            occupancy: 0,
            overruns: 0,
        }
    }

    // ── Producer side ──────────────────────────────────────────────────

    /// Append `data` at the write cursor.
    ///
    /// Returns the number of slots sealed by this call. A payload longer
    /// than a whole slot seals as many slots as it spans.
    pub fn write(&mut self, mut data: &[T]) -> usize {
        let mut sealed = 0;
        loop {
            let room = self.slot_len - self.write_pos;
            if data.len() <= room {
                let end = self.write_pos + data.len();
                self.slots[self.write_idx][self.write_pos..end].copy_from_slice(data);
                self.write_pos = end;
                return sealed;
            }

            let (head, tail) = data.split_at(room);
            self.slots[self.write_idx][self.write_pos..self.slot_len].copy_from_slice(head);
            self.write_pos = self.slot_len;
            self.seal();
            sealed += 1;
            data = tail;
        }
    }

    fn seal(&mut self) {
        self.lens[self.write_idx] = self.write_pos;
        self.write_idx = (self.write_idx + 1) % N;
        self.write_pos = 0;
        self.occupancy += 1;
        if self.occupancy >= N {
            // The writer lapped the reader: the oldest sealed slot is now the
            // active one. Drop it so the reader never points at it.
            self.read_idx = (self.read_idx + 1) % N;
            self.occupancy -= 1;
            self.overruns = self.overruns.wrapping_add(1);
        }
    }

    // ── Consumer side ──────────────────────────────────────────────────

    /// The oldest sealed slot, trimmed to its sealed length.
    ///
    /// Returns `None` when nothing is pending (underrun).
    pub fn peek_sealed(&self) -> Option<&[T]> {
        if self.occupancy == 0 {
            return None;
        }
        Some(&self.slots[self.read_idx][..self.lens[self.read_idx]])
    }

    /// Release the slot at the read cursor after it has been consumed.
    ///
    /// Returns `false` (and leaves the cursor alone) if nothing was pending.
    pub fn release(&mut self) -> bool {
        if self.occupancy == 0 {
            return false;
        }
        self.read_idx = (self.read_idx + 1) % N;
        self.occupancy -= 1;
        true
    }

    // ── Configuration / state ──────────────────────────────────────────

    /// Set the usable length of each slot, clamped to `1..=CAP`.
    ///
    /// If the active slot already holds more than the new length, it is
    /// sealed as it stands so no buffered element is lost.
    pub fn set_slot_len(&mut self, len: usize) {
        self.slot_len = len.clamp(1, CAP);
        if self.write_pos > self.slot_len {
            self.seal();
        }
    }

    /// Whether nothing is sealed or partially written.
    pub fn is_empty(&self) -> bool {
        self.occupancy == 0 && self.write_pos == 0
    }

    /// Usable length of each slot.
    pub fn slot_len(&self) -> usize {
        self.slot_len
    }

    /// Drop all content and rewind both cursors. The overrun counter is kept.
    pub fn reset(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.fill(T::default());
        }
        self.lens = [0; N];
        self.write_idx = 0;
        self.write_pos = 0;
        self.read_idx = 0;
        self.occupancy = 0;
    }

    /// Sealed slots waiting for the consumer.
    pub fn occupancy(&self) -> usize {
        self.occupancy
    }

    /// Number of seals that overwrote unconsumed data.
    pub fn overruns(&self) -> u32 {
        self.overruns
    }

    /// Slot currently being written.
    pub fn write_index(&self) -> usize {
        self.write_idx
    }

    /// Elements already written into the current slot.
    pub fn write_pos(&self) -> usize {
        self.write_pos
    }

    /// Slot the consumer reads next.
    pub fn read_index(&self) -> usize {
        self.read_idx
    }

    /// Length recorded when slot `idx` was last sealed.
    pub fn sealed_len(&self, idx: usize) -> usize {
        self.lens[idx]
    }

    /// Raw storage of slot `idx` at full capacity.
    pub fn slot(&self, idx: usize) -> &[T; CAP] {
        &self.slots[idx]
    }

    /// Total number of slots.
    pub const fn depth(&self) -> usize {
        N
    }
}

impl<T: Copy + Default, const CAP: usize, const N: usize> Default for SlotRing<T, CAP, N> {
    fn default() -> Self {
        Self::new()
    }
}
