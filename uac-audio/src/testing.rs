//! Test doubles shared by the unit and integration tests.

use crate::engine::{AudioHardware, PlayRing, RecordRing};
use crate::usb::UsbPort;

// ── Mock I2C with register file ───────────────────────────────────────────

#[cfg(feature = "nau88l25")]
pub use self::bus::{MockDelay, MockI2c};

#[cfg(feature = "nau88l25")]
mod bus {
    use embedded_hal::delay::DelayNs;
    use embedded_hal::i2c::{self, ErrorType, I2c, Operation};

    const REG_CAPACITY: usize = 128;
    const LOG_CAPACITY: usize = 512;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MockError;

    impl i2c::Error for MockError {
        fn kind(&self) -> i2c::ErrorKind {
            i2c::ErrorKind::Other
        }
    }

    /// Mock I2C that maintains a register file and records writes.
    pub struct MockI2c {
        /// Register file: (address, value) pairs.
        regs: [(u16, u16); REG_CAPACITY],
        reg_count: usize,
        /// Write log in chronological order, truncated at `LOG_CAPACITY`.
        log: [(u16, u16); LOG_CAPACITY],
        writes: usize,
        last_frame: Option<(u8, [u8; 4])>,
        fail: bool,
    }

    impl MockI2c {
        pub fn new() -> Self {
            Self {
                regs: [(0, 0); REG_CAPACITY],
                reg_count: 0,
                log: [(0, 0); LOG_CAPACITY],
                writes: 0,
                last_frame: None,
                fail: false,
            }
        }

        /// Make every transfer fail with [`MockError`].
        pub fn fail_writes(&mut self, fail: bool) {
            self.fail = fail;
        }

        /// Current register value, 0 if never written.
        pub fn read_reg(&self, addr: u16) -> u16 {
            self.regs[..self.reg_count]
                .iter()
                .find(|&&(a, _)| a == addr)
                .map_or(0, |&(_, v)| v)
        }

        fn set_reg(&mut self, addr: u16, val: u16) {
            if let Some(entry) = self.regs[..self.reg_count].iter_mut().find(|(a, _)| *a == addr) {
                entry.1 = val;
                return;
            }
            self.regs[self.reg_count] = (addr, val);
            self.reg_count += 1;
        }

        /// Number of register writes so far.
        pub fn write_count(&self) -> usize {
            self.writes
        }

        /// The (register, value) of the nth write.
        pub fn write_at(&self, idx: usize) -> (u16, u16) {
            self.log[idx]
        }

        /// Address and bytes of the most recent write.
        pub fn last_frame(&self) -> Option<(u8, [u8; 4])> {
            self.last_frame
        }

        /// Whether `(reg, val)` was written at or after write number `from`.
        pub fn wrote_since(&self, from: usize, reg: u16, val: u16) -> bool {
            self.log[from.min(LOG_CAPACITY)..self.writes.min(LOG_CAPACITY)]
                .iter()
                .any(|&w| w == (reg, val))
        }
    }

    impl ErrorType for MockI2c {
        type Error = MockError;
    }

    impl I2c for MockI2c {
        fn read(&mut self, _addr: u8, _buf: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockError);
            }
            if let &[r0, r1, v0, v1] = bytes {
                let reg = u16::from_be_bytes([r0, r1]);
                let val = u16::from_be_bytes([v0, v1]);
                self.set_reg(reg, val);
                if self.writes < LOG_CAPACITY {
                    self.log[self.writes] = (reg, val);
                }
                self.writes += 1;
                self.last_frame = Some((addr, [r0, r1, v0, v1]));
            }
            Ok(())
        }

        fn write_read(&mut self, _addr: u8, wr: &[u8], rd: &mut [u8]) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockError);
            }
            if wr.len() >= 2 && rd.len() >= 2 {
                let val = self.read_reg(u16::from_be_bytes([wr[0], wr[1]]));
                rd[..2].copy_from_slice(&val.to_be_bytes());
            }
            Ok(())
        }

        fn transaction(
            &mut self,
            _addr: u8,
            _ops: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    // ── Mock delay ────────────────────────────────────────────────────

    /// Delay that only accumulates the requested time.
    pub struct MockDelay {
        total_ns: u64,
    }

    impl MockDelay {
        pub fn new() -> Self {
            Self { total_ns: 0 }
        }

        pub fn total_ns(&self) -> u64 {
            self.total_ns
        }
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }
}

// ── Mock USB port ─────────────────────────────────────────────────────────

/// Records what the engine sends on each endpoint.
pub struct MockPort {
    control_in: [u8; 8],
    control_in_len: Option<usize>,
    pub control_out_len: Option<usize>,
    pub statuses: usize,
    pub stalls: usize,
    /// ISO IN packets with data.
    pub iso_in_packets: usize,
    pub zlps: usize,
    pub last_iso_in_len: Option<usize>,
    pub last_iso_in_head: [u8; 4],
    pub iso_out_ready: usize,
}

impl MockPort {
    pub fn new() -> Self {
        Self {
            control_in: [0; 8],
            control_in_len: None,
            control_out_len: None,
            statuses: 0,
            stalls: 0,
            iso_in_packets: 0,
            zlps: 0,
            last_iso_in_len: None,
            last_iso_in_head: [0; 4],
            iso_out_ready: 0,
        }
    }

    /// Data of the last EP0 IN stage.
    pub fn control_reply(&self) -> Option<&[u8]> {
        self.control_in_len.map(|len| &self.control_in[..len])
    }
}

impl UsbPort for MockPort {
    fn control_in(&mut self, data: &[u8]) {
        let len = data.len().min(self.control_in.len());
        self.control_in[..len].copy_from_slice(&data[..len]);
        self.control_in_len = Some(len);
    }

    fn control_out(&mut self, len: usize) {
        self.control_out_len = Some(len);
    }

    fn control_status(&mut self) {
        self.statuses += 1;
    }

    fn stall(&mut self) {
        self.stalls += 1;
    }

    fn iso_in(&mut self, data: &[u8]) {
        if data.is_empty() {
            self.zlps += 1;
        } else {
            self.iso_in_packets += 1;
            let head = data.len().min(4);
            self.last_iso_in_head = [0; 4];
            self.last_iso_in_head[..head].copy_from_slice(&data[..head]);
        }
        self.last_iso_in_len = Some(data.len());
    }

    fn iso_out_ready(&mut self) {
        self.iso_out_ready += 1;
    }
}

// ── Mock DMA / I2S ────────────────────────────────────────────────────────

/// Counts stream start/stop calls.
pub struct MockHardware {
    pub playing: bool,
    pub capturing: bool,
    pub playback_starts: usize,
    pub playback_stops: usize,
    pub capture_starts: usize,
    pub capture_stops: usize,
    pub timer_starts: usize,
    /// Sealed length of the first slot handed to the TX DMA.
    pub first_play_slot: Option<usize>,
    /// Packet length the capture ring had when RX started.
    pub capture_packet_len: usize,
}

impl MockHardware {
    pub fn new() -> Self {
        Self {
            playing: false,
            capturing: false,
            playback_starts: 0,
            playback_stops: 0,
            capture_starts: 0,
            capture_stops: 0,
            timer_starts: 0,
            first_play_slot: None,
            capture_packet_len: 0,
        }
    }
}

impl AudioHardware for MockHardware {
    fn start_playback(&mut self, ring: &PlayRing) {
        self.playing = true;
        self.playback_starts += 1;
        self.first_play_slot = ring.peek_sealed().map(<[u32]>::len);
    }

    fn stop_playback(&mut self) {
        self.playing = false;
        self.playback_stops += 1;
    }

    fn start_capture(&mut self, ring: &mut RecordRing) {
        self.capturing = true;
        self.capture_starts += 1;
        self.capture_packet_len = ring.packet_len();
    }

    fn stop_capture(&mut self) {
        self.capturing = false;
        self.capture_stops += 1;
    }

    fn start_timer(&mut self) {
        self.timer_starts += 1;
    }
}
