//! Flagged slot ring used on the capture path.
//!
//! The DMA engine fills slots in order and each completion marks the slot it
//! just finished as full. The isochronous IN handler drains full slots in the
//! same order, clearing the flag as it goes.

/// Capture ring of `N` byte slots, each `CAP` bytes long.
pub struct CaptureRing<const CAP: usize, const N: usize> {
    slots: [[u8; CAP]; N],
    full: [bool; N],
    /// Next slot handed to the host.
    read_idx: usize,
    /// Slot the DMA engine is filling.
    dma_idx: usize,
    packet_len: usize,
    overruns: u32,
}

impl<const CAP: usize, const N: usize> CaptureRing<CAP, N> {
    /// Create an empty ring. Packets default to the full slot size.
    pub const fn new() -> Self {
        assert!(N >= 2, "capture ring needs at least 2 slots");

        CaptureRing {
            slots: [[0; CAP]; N],
            full: [false; N],
            read_idx: 0,
            dma_idx: 0,
            packet_len: CAP,
            overruns: 0,
        }
    }

    /// Storage of the slot the DMA engine is currently filling.
    pub fn dma_target(&mut self) -> &mut [u8; CAP] {
        &mut self.slots[self.dma_idx]
    }

    /// DMA completion: flag the current slot full and move to the next.
    ///
    /// Returns `false` if the slot was still full, i.e. the host never
    /// collected it and its data has been replaced.
    pub fn mark_filled(&mut self) -> bool {
        let fresh = !self.full[self.dma_idx];
        if !fresh {
            self.overruns = self.overruns.wrapping_add(1);
        }
        self.full[self.dma_idx] = true;
        self.dma_idx = (self.dma_idx + 1) % N;
        fresh
    }

    /// Take the next full slot, trimmed to the packet length.
    ///
    /// Returns `None` when the slot at the read cursor is not full yet; the
    /// caller answers the host with a zero-length packet.
    pub fn drain(&mut self) -> Option<&[u8]> {
        let idx = self.read_idx;
        if !self.full[idx] {
            return None;
        }
        self.full[idx] = false;
        self.read_idx = (idx + 1) % N;
        Some(&self.slots[idx][..self.packet_len])
    }

    /// Set the number of bytes sent per packet, clamped to `CAP`.
    pub fn set_packet_len(&mut self, len: usize) {
        self.packet_len = len.min(CAP);
    }

    /// Bytes sent per packet.
    pub fn packet_len(&self) -> usize {
        self.packet_len
    }

    /// Clear every full flag and rewind both cursors.
    pub fn reset(&mut self) {
        self.full = [false; N];
        self.read_idx = 0;
        self.dma_idx = 0;
    }

    /// Whether slot `idx` is waiting for the host.
    pub fn is_full(&self, idx: usize) -> bool {
        self.full[idx]
    }

    /// Number of slots waiting for the host.
    pub fn pending(&self) -> usize {
        self.full.iter().filter(|&&f| f).count()
    }

    /// Slot the host reads next.
    pub fn read_index(&self) -> usize {
        self.read_idx
    }

    /// Slot the DMA engine fills next.
    pub fn dma_index(&self) -> usize {
        self.dma_idx
    }

    /// Number of DMA completions that replaced uncollected data.
    pub fn overruns(&self) -> u32 {
        self.overruns
    }
}

impl<const CAP: usize, const N: usize> Default for CaptureRing<CAP, N> {
    fn default() -> Self {
        Self::new()
    }
}
