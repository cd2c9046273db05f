use super::{NmeaChecksum, NmeaError, SentenceBuf};

// States are named for the portion of the sentence which was *last received*
#[derive(Copy, Clone)]
enum ParserState {
    Start,
    Body { checksum: NmeaChecksum },
    Star { expect: NmeaChecksum },
    ChecksumHi { expect: NmeaChecksum, hi: u8 },
    ChecksumLo,
    Cr,
}
use ParserState::*;

/// Byte-at-a-time framer: collects `$…\r\n` sentences out of a raw receiver
/// stream and verifies the `*CC` trailer when one is present. Feed it from
/// any byte source; it never blocks and resyncs on the next `$` after an
/// error.
pub struct NmeaParser {
    state: ParserState,
    buf: SentenceBuf,
}

impl NmeaParser {
    pub fn new() -> Self {
        Self {
            state: Start,
            buf: SentenceBuf::default(),
        }
    }

    // A `$` anywhere restarts the frame; whatever came before it was cut off.
    fn restart(&mut self) {
        self.buf.clear();
        let _ = self.buf.try_push(b'$');
        self.state = Body {
            checksum: NmeaChecksum::new(),
        };
    }

    fn abort(&mut self, err: NmeaError) -> Option<Result<SentenceBuf, NmeaError>> {
        self.buf.clear();
        self.state = Start;
        Some(Err(err))
    }

    fn push(&mut self, b: u8) -> Result<(), NmeaError> {
        match self.buf.try_push(b) {
            None => Ok(()),
            Some(_) => Err(NmeaError::TooLong),
        }
    }

    pub fn process_byte(&mut self, b: u8) -> Option<Result<SentenceBuf, NmeaError>> {
        if b == b'$' {
            self.restart();
            return None;
        }
        match self.state {
            Start => None,
            Body { checksum } => match b {
                b'*' => {
                    if let Err(e) = self.push(b) {
                        return self.abort(e);
                    }
                    self.state = Star { expect: checksum };
                    None
                }
                b'\r' => {
                    if let Err(e) = self.push(b) {
                        return self.abort(e);
                    }
                    self.state = Cr;
                    None
                }
                0x20..=0x7e => {
                    if let Err(e) = self.push(b) {
                        return self.abort(e);
                    }
                    self.state = Body {
                        checksum: checksum.next(b),
                    };
                    None
                }
                _ => self.abort(NmeaError::InvalidChar(b)),
            },
            Star { expect } => match hex_val(b) {
                Some(hi) => {
                    if let Err(e) = self.push(b) {
                        return self.abort(e);
                    }
                    self.state = ChecksumHi { expect, hi };
                    None
                }
                None => self.abort(NmeaError::InvalidChar(b)),
            },
            ChecksumHi { expect, hi } => match hex_val(b) {
                Some(lo) => {
                    if let Err(e) = self.push(b) {
                        return self.abort(e);
                    }
                    let saw = (hi << 4) | lo;
                    if expect == saw {
                        self.state = ChecksumLo;
                        None
                    } else {
                        self.abort(NmeaError::BadChecksum {
                            expect: expect.0,
                            saw,
                        })
                    }
                }
                None => self.abort(NmeaError::InvalidChar(b)),
            },
            ChecksumLo => match b {
                b'\r' => {
                    if let Err(e) = self.push(b) {
                        return self.abort(e);
                    }
                    self.state = Cr;
                    None
                }
                _ => self.abort(NmeaError::InvalidChar(b)),
            },
            Cr => match b {
                b'\n' => {
                    if let Err(e) = self.push(b) {
                        return self.abort(e);
                    }
                    let frame = self.buf;
                    self.buf.clear();
                    self.state = Start;
                    Some(Ok(frame))
                }
                _ => self.abort(NmeaError::InvalidChar(b)),
            },
        }
    }
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::NmeaParser;
    use crate::nmea::NmeaError;

    fn run(stream: &[u8]) -> Vec<Result<Vec<u8>, NmeaError>> {
        let mut parser = NmeaParser::new();
        let mut out = Vec::new();
        for &b in stream {
            if let Some(r) = parser.process_byte(b) {
                out.push(r.map(|frame| frame.as_slice().to_vec()));
            }
        }
        out
    }

    const GLL: &[u8] = b"$GPGLL,4916.45,N,12311.12,W,225444,A*31\r\n";

    #[test]
    fn frames_one_sentence() {
        assert_eq!(run(GLL), vec![Ok(GLL.to_vec())]);
    }

    #[test]
    fn skips_noise_around_the_frame() {
        let mut stream = b"16.45,N,garbage\r\n".to_vec();
        stream.extend_from_slice(GLL);
        stream.extend_from_slice(b"$GP");
        assert_eq!(run(&stream), vec![Ok(GLL.to_vec())]);
    }

    #[test]
    fn checksum_mismatch_is_reported() {
        let out = run(b"$GPGLL,4916.45,N,12311.12,W,225444,A*30\r\n");
        assert_eq!(
            out,
            vec![Err(NmeaError::BadChecksum {
                expect: 0x31,
                saw: 0x30
            })]
        );
    }

    #[test]
    fn trailer_is_optional() {
        let bare = b"$GPGGA,1,2,3\r\n";
        assert_eq!(run(bare), vec![Ok(bare.to_vec())]);
    }

    #[test]
    fn dollar_mid_body_resyncs() {
        let mut stream = b"$GPGLL,4916.45".to_vec();
        stream.extend_from_slice(GLL);
        assert_eq!(run(&stream), vec![Ok(GLL.to_vec())]);
    }

    #[test]
    fn control_byte_aborts_the_frame() {
        assert_eq!(
            run(b"$GPGLL,49\x0016.45"),
            vec![Err(NmeaError::InvalidChar(0))]
        );
    }

    #[test]
    fn overlong_sentence_errors_once_then_recovers() {
        let mut stream = vec![b'$'];
        stream.extend(core::iter::repeat(b'A').take(200));
        stream.extend_from_slice(GLL);
        assert_eq!(
            run(&stream),
            vec![Err(NmeaError::TooLong), Ok(GLL.to_vec())]
        );
    }

    #[test]
    fn emitted_frame_is_the_exact_sentence_text() {
        let mut parser = NmeaParser::new();
        let mut frames = Vec::new();
        for &b in GLL {
            if let Some(Ok(frame)) = parser.process_byte(b) {
                frames.push(frame);
            }
        }
        assert_eq!(frames.len(), 1);
        assert_eq!(
            frames[0].as_str(),
            Some("$GPGLL,4916.45,N,12311.12,W,225444,A*31\r\n")
        );
    }
}
