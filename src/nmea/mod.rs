use tinyvec::ArrayVec;

pub mod extract;
pub mod gga;
pub mod parser;
pub mod sentence;

pub use extract::{extract_field, extract_field_into, ExtractError};
pub use gga::{FixQuality, GgaFix};
pub use parser::NmeaParser;
pub use sentence::{GgaField, SentenceId, SentenceKind};

// NMEA 0183 caps a sentence at 82 characters; the headroom absorbs
// receivers that run past the limit.
const NMEA_BUFSIZE: usize = 128;

/// One framed sentence, `$` through `\r\n` inclusive.
#[derive(Default, Debug, Copy, Clone)]
pub struct SentenceBuf(pub ArrayVec<[u8; NMEA_BUFSIZE]>);

#[cfg(feature = "defmt")]
impl defmt::Format for SentenceBuf {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.0.as_slice())
    }
}

impl SentenceBuf {
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(self.0.as_slice()).ok()
    }
}

impl core::ops::Deref for SentenceBuf {
    type Target = ArrayVec<[u8; NMEA_BUFSIZE]>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl core::ops::DerefMut for SentenceBuf {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// XOR-8 over the bytes between `$` and `*`, exclusive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NmeaChecksum(pub u8);

impl NmeaChecksum {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn next(self, byte: u8) -> Self {
        Self(self.0 ^ byte)
    }
}

impl PartialEq<u8> for NmeaChecksum {
    fn eq(&self, other: &u8) -> bool {
        self.0 == *other
    }
}

#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NmeaError {
    #[error("sentence says {saw:02x}, body sums to {expect:02x}")]
    BadChecksum { expect: u8, saw: u8 },
    #[error("byte {0:#04x} is not valid inside a sentence")]
    InvalidChar(u8),
    #[error("sentence too long for buffer")]
    TooLong,
}
