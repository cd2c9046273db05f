#![cfg_attr(not(test), no_std)]

//! Field-level access to NMEA 0183 sentences from a GNSS receiver.
//!
//! [`nmea::NmeaParser`] bounds complete `$…\r\n` sentences out of a raw byte
//! stream, [`nmea::extract_field`] pulls one comma-delimited field out of a
//! buffer without copying, and [`nmea::GgaFix`] decodes a GGA sentence into
//! host values. The crate does no I/O and holds no global state; feeding it
//! bytes is the caller's problem.

pub mod nmea;

/// Decimal-degree position, north and east positive.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Position {
    pub lat: f32,
    pub lon: f32,
}
