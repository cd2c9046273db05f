use chrono::NaiveTime;

use super::extract::{extract_field, ExtractError};
use super::sentence::{GgaField, SentenceId, SentenceKind};
use crate::Position;

/// GGA field 6.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FixQuality {
    Invalid,
    Gps,
    Dgps,
    Pps,
    Rtk,
    FloatRtk,
    Estimated,
    Manual,
    Simulation,
}

impl FixQuality {
    fn from_field(field: &str) -> Self {
        match field {
            "1" => FixQuality::Gps,
            "2" => FixQuality::Dgps,
            "3" => FixQuality::Pps,
            "4" => FixQuality::Rtk,
            "5" => FixQuality::FloatRtk,
            "6" => FixQuality::Estimated,
            "7" => FixQuality::Manual,
            "8" => FixQuality::Simulation,
            _ => FixQuality::Invalid,
        }
    }

    pub fn is_fix(self) -> bool {
        self != FixQuality::Invalid
    }
}

/// One GGA sentence decoded into host values.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GgaFix {
    pub time: NaiveTime,
    pub position: Position,
    pub quality: FixQuality,
    pub satellites: u8,
    pub hdop: f32,
    /// Metres above mean sea level.
    pub altitude: f32,
}

impl GgaFix {
    /// Decode the first GGA sentence in `buf`. `Ok(None)` means the receiver
    /// has no fix yet — quality 0, or the coordinate/time fields still empty
    /// — and the caller should poll again.
    pub fn from_buffer(buf: &[u8]) -> Result<Option<Self>, ExtractError> {
        let id = SentenceId::of(SentenceKind::Gga);
        let field = |f: GgaField| extract_field(buf, id, f.ordinal());

        let quality = FixQuality::from_field(field(GgaField::FixQuality)?);
        if !quality.is_fix() {
            return Ok(None);
        }

        let lat = parse_coordinate(field(GgaField::Latitude)?, field(GgaField::NorthSouth)?);
        let lon = parse_coordinate(field(GgaField::Longitude)?, field(GgaField::EastWest)?);
        let time = parse_utc_time(field(GgaField::UtcTime)?);
        let (lat, lon, time) = match (lat, lon, time) {
            (Some(lat), Some(lon), Some(time)) => (lat, lon, time),
            _ => return Ok(None),
        };

        Ok(Some(Self {
            time,
            position: Position { lat, lon },
            quality,
            satellites: field(GgaField::SatellitesInUse)?.parse().unwrap_or(0),
            hdop: field(GgaField::Hdop)?.parse().unwrap_or(0.0),
            altitude: field(GgaField::Altitude)?.parse().unwrap_or(0.0),
        }))
    }
}

/// `ddmm.mmmm` (latitude) / `dddmm.mmmm` (longitude) plus its hemisphere
/// letter, to signed decimal degrees.
pub fn parse_coordinate(deg_min: &str, hemisphere: &str) -> Option<f32> {
    let dot = deg_min.find('.').unwrap_or(deg_min.len());
    if dot < 3 {
        return None;
    }
    let (deg, min) = deg_min.split_at(dot - 2);
    let deg: u16 = deg.parse().ok()?;
    let min: f32 = min.parse().ok()?;
    if min >= 60.0 {
        return None;
    }
    let value = deg as f32 + min / 60.0;
    match hemisphere {
        "N" | "E" => Some(value),
        "S" | "W" => Some(-value),
        _ => None,
    }
}

/// `hhmmss` with optional fractional seconds, to a UTC time of day.
pub fn parse_utc_time(field: &str) -> Option<NaiveTime> {
    if field.len() < 6 || !field.is_ascii() {
        return None;
    }
    let (hms, frac) = field.split_at(6);
    let hour: u32 = hms[0..2].parse().ok()?;
    let minute: u32 = hms[2..4].parse().ok()?;
    let second: u32 = hms[4..6].parse().ok()?;

    let milli = if frac.is_empty() {
        0
    } else {
        let digits = frac.strip_prefix('.')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // first three fractional digits, zero-padded
        digits
            .bytes()
            .chain(*b"000")
            .take(3)
            .fold(0u32, |ms, b| ms * 10 + (b - b'0') as u32)
    };
    NaiveTime::from_hms_milli_opt(hour, minute, second, milli)
}
