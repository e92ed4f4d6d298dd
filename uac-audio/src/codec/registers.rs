//! NAU88L25 register addresses and the values this crate programs.
//!
//! Register addresses are 16-bit and all registers hold 16-bit values. On
//! the wire a write is four bytes, big-endian: address high, address low,
//! value high, value low.

// ── I2C address ────────────────────────────────────────────────────────────

/// 7-bit I2C device address.
pub const I2C_ADDR: u8 = crate::constants::CODEC_I2C_ADDRESS;

// ── Reset / enable ─────────────────────────────────────────────────────────

/// Software reset. Any two consecutive writes reset all registers.
pub const SW_RESET: u16 = 0x0000;

/// Block enable control (DAC/ADC/clock domains).
pub const ENA_CTRL: u16 = 0x0001;

// ── Clocking ───────────────────────────────────────────────────────────────

/// Clock divider and system clock source select.
/// - Bit 15    — SYSCLK_SRC (1 = FLL output)
/// - Bits 3:0  — MCLK_SRC divider
pub const CLK_DIVIDER: u16 = 0x0003;

/// FLL ratio and input divider.
/// - Bits 12:11 — FLL input clock divider
/// - Bits  6:0  — FLL_RATIO
pub const FLL1: u16 = 0x0004;

/// FLL fractional part of the feedback divider (16-bit fraction).
pub const FLL2: u16 = 0x0005;

/// FLL integer part of the feedback divider.
/// - Bits 15:12 — loop filter gain
/// - Bits  9:0  — FLL_INTEGER
pub const FLL3: u16 = 0x0006;

// ── Digital audio interface ────────────────────────────────────────────────

/// I2S/PCM format control.
pub const I2S_PCM_CTRL1: u16 = 0x001C;

/// I2S/PCM master mode and clock dividers.
/// - Bit 12    — master mode
/// - Bits 4:3  — LRC_DIV
/// - Bits 2:0  — BCLK_DIV
pub const I2S_PCM_CTRL2: u16 = 0x001D;

/// ADC oversampling rate.
pub const ADC_RATE: u16 = 0x002B;

/// DAC oversampling rate and clock source.
pub const DAC_CTRL1: u16 = 0x002C;

/// Device identification. The vendor power-on image writes it as well.
pub const I2C_DEVICE_ID: u16 = 0x0058;

// ── Clock tables ───────────────────────────────────────────────────────────

/// FLL integer part for the 12.288 MHz (8 kHz multiple) family.
pub const FLL3_INT_8K: u16 = 0x0008;

/// FLL integer part for the 11.2896 MHz (44.1 kHz) family.
pub const FLL3_INT_44K1: u16 = 0x0007;

/// FLL fractions for the 8 kHz family: centered, +0.5 %, −0.5 %.
///
/// 8.192 × {1, 1.005, 0.995}, fractional part × 2^16.
pub const FLL2_FRAC_8K: [u16; 3] = [0x3126, 0x3BA3, 0x26AB];

/// FLL fractions for the 44.1 kHz family: centered, +0.5 %, −0.5 %.
///
/// 7.5264 × {1, 1.005, 0.995}, fractional part × 2^16.
pub const FLL2_FRAC_44K1: [u16; 3] = [0x86C2, 0x9062, 0x7D1B];

/// Divider writes for 44.1 kHz: BCLK = 11.2896 MHz / 8, LRC = BCLK / 32.
pub const RATE_44K1: &[(u16, u16)] = &[
    (FLL1, 0x0001),
    (I2S_PCM_CTRL2, 0x301A),
    (ADC_RATE, 0x0012),
    (DAC_CTRL1, 0x0082),
];

/// Divider writes for 48 kHz: BCLK = 12.288 MHz / 8, LRC = BCLK / 32.
pub const RATE_48K: &[(u16, u16)] = &[
    (FLL1, 0x0001),
    (I2S_PCM_CTRL2, 0x301A),
    (ADC_RATE, 0x0012),
    (DAC_CTRL1, 0x0082),
];

/// Divider writes for 96 kHz: MCLK doubled to 24.576 MHz for the faster
/// bit clock, and a lower oversampling ratio.
pub const RATE_96K: &[(u16, u16)] = &[
    (CLK_DIVIDER, 0x80A2),
    (FLL1, 0x1801),
    (FLL2, 0x3126),
    (FLL3, 0xF008),
    (I2S_PCM_CTRL2, 0x301A),
    (ADC_RATE, 0x0001),
    (DAC_CTRL1, 0x0080),
];

/// Power-on register image: FLL from MCLK at 12.288 MHz, I2S master at
/// 48 kHz, line-in to ADC, DAC to headphone. `ENA_CTRL` goes last.
pub const INIT_SEQUENCE: &[(u16, u16)] = &[
    (CLK_DIVIDER, 0x80A2),
    (FLL1, 0x0001),
    (FLL2, 0x3126),
    (FLL3, 0x0008),
    (0x0007, 0x0010),
    (0x0008, 0xC000),
    (0x0009, 0x6000),
    (0x000A, 0xF13C),
    (0x000C, 0x0048),
    (0x000D, 0x0000),
    (0x000F, 0x0000),
    (0x0010, 0x0000),
    (0x0011, 0x0000),
    (0x0012, 0xFFFF),
    (0x0013, 0x0015),
    (0x0014, 0x0110),
    (0x0015, 0x0000),
    (0x0016, 0x0000),
    (0x0017, 0x0000),
    (0x0018, 0x0000),
    (0x0019, 0x0000),
    (0x001A, 0x0000),
    (0x001B, 0x0000),
    (I2S_PCM_CTRL1, 0x0002),
    (I2S_PCM_CTRL2, 0x301A),
    (0x001E, 0x0000),
    (0x001F, 0x0000),
    (0x0020, 0x0000),
    (0x0021, 0x0000),
    (0x0022, 0x0000),
    (0x0023, 0x0000),
    (0x0024, 0x0000),
    (0x0025, 0x0000),
    (0x0026, 0x0000),
    (0x0027, 0x0000),
    (0x0028, 0x0000),
    (0x0029, 0x0000),
    (0x002A, 0x0000),
    (ADC_RATE, 0x0012),
    (DAC_CTRL1, 0x0082),
    (0x002D, 0x0000),
    (0x0030, 0x00CF),
    (0x0031, 0x0000),
    (0x0032, 0x0000),
    (0x0033, 0x009E),
    (0x0034, 0x029E),
    (0x0038, 0x1486),
    (0x0039, 0x0F12),
    (0x003A, 0x25FF),
    (0x003B, 0x3457),
    (0x0045, 0x1486),
    (0x0046, 0x0F12),
    (0x0047, 0x25F9),
    (0x0048, 0x3457),
    (0x004C, 0x0000),
    (0x004D, 0x0000),
    (0x004E, 0x0000),
    (0x0050, 0x2007),
    (0x0051, 0x0000),
    (0x0053, 0xC201),
    (0x0054, 0x0C95),
    (0x0055, 0x0000),
    (I2C_DEVICE_ID, 0x1A14),
    (0x0059, 0x00FF),
    (0x0066, 0x0060),
    (0x0068, 0xC300),
    (0x0069, 0x0000),
    (0x006A, 0x0083),
    (0x0071, 0x0011),
    (0x0072, 0x0260),
    (0x0073, 0x332C),
    (0x0074, 0x4502),
    (0x0076, 0x3140),
    (0x0077, 0x0000),
    (0x007F, 0x553F),
    (0x0080, 0x0420),
    (ENA_CTRL, 0x07D4),
];
