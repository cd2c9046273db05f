use tinyvec::{Array, ArrayVec};

use super::sentence::SentenceId;

#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExtractError {
    /// No sentence with the requested id anywhere in the buffer. Normal
    /// while polling; wait for more bytes.
    #[error("sentence not found")]
    NotFound,
    /// The id was seen but its `\r\n` has not arrived yet. Retry after the
    /// next read.
    #[error("sentence not terminated yet")]
    Incomplete,
    /// The sentence holds fewer comma-delimited fields than requested, so
    /// it is truncated or malformed.
    #[error("sentence ends before field {0}")]
    FieldNotPresent(u8),
    /// Caller error: the ordinal is outside `1..=max` for this sentence
    /// type. Rejected before any buffer scan.
    #[error("ordinal {ordinal} out of range, sentence has at most {max} fields")]
    InvalidOrdinal { ordinal: u8, max: u8 },
    #[error("field is not valid ascii")]
    NotAscii,
    /// The field does not fit the output buffer; nothing was written.
    #[error("field of {len} bytes exceeds capacity {cap}")]
    FieldTooLong { len: usize, cap: usize },
}

/// Extract field `ordinal` of the first sentence matching `id`, as a
/// subslice of `buf`. The field carries none of the delimiting commas, the
/// `$TTSSS` header, or the `*CC`/`\r\n` trailer; an empty field (two
/// consecutive commas) comes back as `Ok("")`, which a GNSS receiver emits
/// while it has no fix.
///
/// Pure and stateless: `buf` is never mutated and repeated calls return the
/// same result.
pub fn extract_field<'a>(
    buf: &'a [u8],
    id: SentenceId,
    ordinal: u8,
) -> Result<&'a str, ExtractError> {
    let max = id.max_fields();
    if ordinal == 0 || ordinal > max {
        return Err(ExtractError::InvalidOrdinal { ordinal, max });
    }

    let body = find_sentence(buf, id)?;
    let field = field_span(body, ordinal)?;
    core::str::from_utf8(field).map_err(|_| ExtractError::NotAscii)
}

/// [`extract_field`], but copied into a caller-owned buffer. The output is
/// cleared first and left empty when the field does not fit.
pub fn extract_field_into<A: Array<Item = u8>>(
    buf: &[u8],
    id: SentenceId,
    ordinal: u8,
    out: &mut ArrayVec<A>,
) -> Result<(), ExtractError> {
    let field = extract_field(buf, id, ordinal)?;
    out.clear();
    if field.len() > out.capacity() {
        return Err(ExtractError::FieldTooLong {
            len: field.len(),
            cap: out.capacity(),
        });
    }
    out.extend_from_slice(field.as_bytes());
    Ok(())
}

/// Locate the first `$`-anchored sentence matching `id` and bound it at its
/// `\r\n`. Returns the bytes between the five-character address and the
/// terminator, leading comma included. Only the first match counts, even
/// when it is still unterminated and a complete sentence follows. A stray
/// `$` before the terminator means the sentence was cut off mid-stream;
/// that also reads as [`ExtractError::Incomplete`].
fn find_sentence(buf: &[u8], id: SentenceId) -> Result<&[u8], ExtractError> {
    for (i, &b) in buf.iter().enumerate() {
        if b != b'$' || !id.matches(&buf[i + 1..]) {
            continue;
        }
        let body = &buf[i + 6..];
        let restart = body.iter().position(|&b| b == b'$');
        return match find_crlf(body) {
            Some(end) if restart.map_or(true, |r| r > end) => Ok(&body[..end]),
            _ => Err(ExtractError::Incomplete),
        };
    }
    Err(ExtractError::NotFound)
}

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}

/// Walk `ordinal` commas into the bounded body; the field runs to the next
/// comma, the `*` opening the checksum trailer, or the end of the body.
fn field_span(body: &[u8], ordinal: u8) -> Result<&[u8], ExtractError> {
    let mut commas = 0;
    let mut start = None;
    for (i, &b) in body.iter().enumerate() {
        if b == b',' {
            commas += 1;
            if commas == ordinal {
                start = Some(i + 1);
                break;
            }
        }
    }
    let start = start.ok_or(ExtractError::FieldNotPresent(ordinal))?;

    let tail = &body[start..];
    let end = tail
        .iter()
        .position(|&b| b == b',' || b == b'*')
        .unwrap_or(tail.len());
    Ok(&tail[..end])
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use tinyvec::ArrayVec;

    use super::{extract_field, extract_field_into, ExtractError};
    use crate::nmea::sentence::{GgaField, SentenceId, SentenceKind};

    const SAMPLE: &[u8] =
        b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";

    fn gga() -> SentenceId {
        SentenceId::of(SentenceKind::Gga)
    }

    #[test]
    fn every_gga_field_comes_back_exact() {
        let expect = [
            "123519", "4807.038", "N", "01131.000", "E", "1", "08", "0.9",
            "545.4", "M", "46.9", "M", "", "",
        ];
        for (k, want) in (1..=14).zip(expect) {
            assert_eq!(extract_field(SAMPLE, gga(), k), Ok(want));
        }
    }

    #[test]
    fn named_fields() {
        let field = |f: GgaField| extract_field(SAMPLE, gga(), f.ordinal());
        assert_eq!(field(GgaField::Latitude), Ok("4807.038"));
        assert_eq!(field(GgaField::Altitude), Ok("545.4"));
        assert_eq!(field(GgaField::DgpsAge), Ok(""));
    }

    #[test]
    fn idempotent_and_read_only() {
        let buf = SAMPLE.to_vec();
        let first = extract_field(&buf, gga(), 2).unwrap().to_owned();
        let second = extract_field(&buf, gga(), 2).unwrap();
        assert_eq!(first, second);
        assert_eq!(buf, SAMPLE);
    }

    #[test]
    fn empty_field_is_success() {
        let buf = b"$GNGGA,,4807.038,N\r\n";
        assert_eq!(extract_field(buf, gga(), 1), Ok(""));
    }

    #[test]
    fn missing_terminator_is_incomplete() {
        assert_eq!(
            extract_field(b"$GNGGA,1,2,3", gga(), 1),
            Err(ExtractError::Incomplete)
        );
    }

    #[test]
    fn absent_id_is_not_found() {
        assert_eq!(
            extract_field(b"$GNZDA,160012.71,11,03,2004,-1,00*63\r\n", gga(), 1),
            Err(ExtractError::NotFound)
        );
    }

    #[test]
    fn ordinal_outside_table_is_rejected_up_front() {
        assert_eq!(
            extract_field(SAMPLE, gga(), 20),
            Err(ExtractError::InvalidOrdinal { ordinal: 20, max: 14 })
        );
        assert_eq!(
            extract_field(SAMPLE, gga(), 0),
            Err(ExtractError::InvalidOrdinal { ordinal: 0, max: 14 })
        );
    }

    #[test]
    fn short_sentence_is_field_not_present() {
        assert_eq!(
            extract_field(b"$GPGGA,1,2,3\r\n", gga(), 9),
            Err(ExtractError::FieldNotPresent(9))
        );
    }

    #[test]
    fn first_matching_sentence_wins() {
        let buf = b"$GPGSV,3,1,11\r\n$GPGGA,111111,first\r\n$GPGGA,222222,second\r\n";
        assert_eq!(extract_field(buf, gga(), 1), Ok("111111"));
    }

    #[test]
    fn incomplete_first_match_shadows_a_later_complete_one() {
        let buf = b"$GPGGA,111111$GPGGA,222222\r\n";
        assert_eq!(extract_field(buf, gga(), 1), Err(ExtractError::Incomplete));
    }

    #[test]
    fn explicit_talker_is_honored() {
        let gn = SentenceId::parse("$GNGGA").unwrap();
        assert_eq!(extract_field(SAMPLE, gn, 1), Err(ExtractError::NotFound));

        let gp = SentenceId::parse("GPGGA").unwrap();
        assert_eq!(extract_field(SAMPLE, gp, 1), Ok("123519"));
    }

    #[test]
    fn copy_out_checks_capacity() {
        let mut small: ArrayVec<[u8; 4]> = ArrayVec::new();
        assert_eq!(
            extract_field_into(SAMPLE, gga(), 2, &mut small),
            Err(ExtractError::FieldTooLong { len: 8, cap: 4 })
        );
        assert!(small.is_empty());

        let mut out: ArrayVec<[u8; 16]> = ArrayVec::new();
        extract_field_into(SAMPLE, gga(), 2, &mut out).unwrap();
        assert_eq!(out.as_slice(), b"4807.038");
    }
}
