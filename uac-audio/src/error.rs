use core::fmt;

/// Errors reported by the codec configuration paths.
///
/// `E` is the error type of the underlying codec bus, normally the error of
/// an `embedded_hal::i2c::I2c` implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// A register write on the codec bus failed.
    Bus(E),
    /// The requested sample rate has no divider table entry.
    UnsupportedSampleRate(u32),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "codec bus error: {e:?}"),
            Error::UnsupportedSampleRate(rate) => {
                write!(f, "unsupported sample rate {rate} Hz")
            }
        }
    }
}
