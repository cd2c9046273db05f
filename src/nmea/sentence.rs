/// Field cap applied to sentence types not in [`SentenceKind`]'s table.
pub const DEFAULT_MAX_FIELDS: u8 = 32;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SentenceKind {
    Gga,
    Gll,
    Gsa,
    Gsv,
    Rmc,
    Vtg,
    Zda,
}

impl SentenceKind {
    pub const fn tag(self) -> &'static [u8; 3] {
        match self {
            SentenceKind::Gga => b"GGA",
            SentenceKind::Gll => b"GLL",
            SentenceKind::Gsa => b"GSA",
            SentenceKind::Gsv => b"GSV",
            SentenceKind::Rmc => b"RMC",
            SentenceKind::Vtg => b"VTG",
            SentenceKind::Zda => b"ZDA",
        }
    }

    pub const fn max_fields(self) -> u8 {
        match self {
            SentenceKind::Gga => 14,
            SentenceKind::Gll => 7,
            SentenceKind::Gsa => 17,
            SentenceKind::Gsv => 19,
            SentenceKind::Rmc => 12,
            SentenceKind::Vtg => 9,
            SentenceKind::Zda => 6,
        }
    }

    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"GGA" => Some(SentenceKind::Gga),
            b"GLL" => Some(SentenceKind::Gll),
            b"GSA" => Some(SentenceKind::Gsa),
            b"GSV" => Some(SentenceKind::Gsv),
            b"RMC" => Some(SentenceKind::Rmc),
            b"VTG" => Some(SentenceKind::Vtg),
            b"ZDA" => Some(SentenceKind::Zda),
            _ => None,
        }
    }
}

/// The sentence to search for. The canonical form is the three-letter type
/// with the talker left open; a token carrying an explicit talker restricts
/// matching to that talker.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SentenceId {
    talker: Option<[u8; 2]>,
    tag: [u8; 3],
}

impl SentenceId {
    /// Accepts `"GGA"`, `"GNGGA"` and `"$GNGGA"`.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.strip_prefix('$').unwrap_or(token).as_bytes();
        if !token
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return None;
        }
        match *token {
            [a, b, c] => Some(Self {
                talker: None,
                tag: [a, b, c],
            }),
            [t0, t1, a, b, c] => Some(Self {
                talker: Some([t0, t1]),
                tag: [a, b, c],
            }),
            _ => None,
        }
    }

    /// Any-talker id for a known sentence type.
    pub const fn of(kind: SentenceKind) -> Self {
        Self {
            talker: None,
            tag: *kind.tag(),
        }
    }

    pub fn kind(self) -> Option<SentenceKind> {
        SentenceKind::from_tag(&self.tag)
    }

    pub fn max_fields(self) -> u8 {
        match self.kind() {
            Some(kind) => kind.max_fields(),
            None => DEFAULT_MAX_FIELDS,
        }
    }

    /// `header` is the byte run following a `$`; the first five characters
    /// are the talker and type.
    pub(crate) fn matches(self, header: &[u8]) -> bool {
        if header.len() < 5 {
            return false;
        }
        if let Some(talker) = self.talker {
            if header[..2] != talker {
                return false;
            }
        }
        header[2..5] == self.tag
    }
}

/// GGA field table; ordinal 1 is the first field after the talker/type.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum GgaField {
    UtcTime = 1,
    Latitude = 2,
    NorthSouth = 3,
    Longitude = 4,
    EastWest = 5,
    FixQuality = 6,
    SatellitesInUse = 7,
    Hdop = 8,
    Altitude = 9,
    AltitudeUnit = 10,
    GeoidSeparation = 11,
    GeoidSeparationUnit = 12,
    DgpsAge = 13,
    DgpsStationId = 14,
}

impl GgaField {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }
}
