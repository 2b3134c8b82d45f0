//! Purpose: Rewrite UTF-8 JSON bytes into a target charset without losing characters.
//! Exports: `JsonTransform`, `Transcoder`, `Transformed`, `Step`, `Carry`, `transcode`.
//! Role: Streaming layer over a raw `CharsetEncoder`; unrepresentable characters become
//! JSON `\uXXXX` escapes (surrogate pairs above U+FFFF) instead of failing.
//! Invariants: Escape bytes are pure ASCII and are fed back through the same raw encoder.
//! Invariants: A trailing partial UTF-8 sequence is "need more input" until end of input.
//! Invariants: Chunk carry-over lives in a `Carry` value owned by the `Transcoder`.
//! Notes: Only string literals may hold non-ASCII in JSON, so escapes never hit structure.

use std::borrow::Cow;

use crate::core::charset::{CharsetEncoder, EncodeStatus};
use crate::core::error::{Error, ErrorKind};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Step {
    /// All input was consumed.
    Complete,
    /// Input ends inside a UTF-8 sequence; call again with more bytes.
    NeedInput,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Transformed {
    pub read: usize,
    pub step: Step,
}

/// The per-call JSON-safe transform. Stateless apart from the encoder's shift state.
pub struct JsonTransform {
    encoder: CharsetEncoder,
}

impl JsonTransform {
    pub fn new(encoder: CharsetEncoder) -> Self {
        Self { encoder }
    }

    /// Encodes as much of `src` as possible onto `dst`.
    ///
    /// With `at_eof == false` a truncated trailing sequence is left unread and reported
    /// as `Step::NeedInput`; with `at_eof == true` it is a `Malformed` error, as is any
    /// invalid UTF-8.
    pub fn transform(
        &mut self,
        src: &[u8],
        dst: &mut Vec<u8>,
        at_eof: bool,
    ) -> Result<Transformed, Error> {
        let mut read = 0;
        loop {
            let (text, invalid) = valid_prefix(&src[read..]);
            let last = at_eof && invalid.is_none();
            let (status, consumed) = self.encoder.encode(text, dst, last);
            read += consumed;

            match status {
                EncodeStatus::InputEmpty => {
                    return match invalid {
                        None => Ok(Transformed {
                            read,
                            step: Step::Complete,
                        }),
                        Some(Invalid::Truncated) if !at_eof => Ok(Transformed {
                            read,
                            step: Step::NeedInput,
                        }),
                        Some(_) => Err(malformed(read)),
                    };
                }
                EncodeStatus::Unmappable(_) => {
                    let (ch, size) = bstr::decode_utf8(&src[read..]);
                    let Some(ch) = ch else {
                        if !at_eof && read + size == src.len() {
                            return Ok(Transformed {
                                read,
                                step: Step::NeedInput,
                            });
                        }
                        return Err(malformed(read));
                    };
                    let escape = json_escape(ch);
                    match self.encoder.encode(&escape, dst, false) {
                        (EncodeStatus::InputEmpty, written) if written == escape.len() => {}
                        _ => {
                            return Err(Error::new(ErrorKind::Internal)
                                .with_message("charset cannot represent a JSON escape")
                                .with_offset(read as u64));
                        }
                    }
                    read += size;
                }
            }
        }
    }
}

/// Up to three bytes of a UTF-8 sequence split across two chunks.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Carry {
    bytes: [u8; 4],
    len: usize,
}

impl Carry {
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Prepends the carried bytes to `chunk`, borrowing when nothing is carried.
    pub fn join<'a>(&self, chunk: &'a [u8]) -> Cow<'a, [u8]> {
        if self.is_empty() {
            return Cow::Borrowed(chunk);
        }
        let mut joined = Vec::with_capacity(self.len + chunk.len());
        joined.extend_from_slice(self.as_bytes());
        joined.extend_from_slice(chunk);
        Cow::Owned(joined)
    }

    fn from_tail(tail: &[u8]) -> Result<Self, Error> {
        let mut carry = Carry::default();
        if tail.len() >= carry.bytes.len() {
            return Err(Error::new(ErrorKind::Internal)
                .with_message("unfinished sequence longer than a code point"));
        }
        carry.bytes[..tail.len()].copy_from_slice(tail);
        carry.len = tail.len();
        Ok(carry)
    }
}

/// Chunked front end: feed with `push`, close with `finish`.
pub struct Transcoder {
    transform: JsonTransform,
    carry: Carry,
}

impl Transcoder {
    pub fn new(encoder: CharsetEncoder) -> Self {
        Self {
            transform: JsonTransform::new(encoder),
            carry: Carry::default(),
        }
    }

    pub fn carry(&self) -> Carry {
        self.carry
    }

    pub fn push(&mut self, chunk: &[u8], dst: &mut Vec<u8>) -> Result<(), Error> {
        let input = self.carry.join(chunk);
        let done = self.transform.transform(&input, dst, false)?;
        self.carry = Carry::from_tail(&input[done.read..])?;
        Ok(())
    }

    pub fn finish(mut self, dst: &mut Vec<u8>) -> Result<(), Error> {
        let carry = self.carry;
        self.transform.transform(carry.as_bytes(), dst, true)?;
        Ok(())
    }
}

/// Transcodes a complete UTF-8 JSON document in one final invocation.
pub fn transcode(src: &[u8], encoder: CharsetEncoder) -> Result<Vec<u8>, Error> {
    let mut dst = Vec::with_capacity(src.len());
    JsonTransform::new(encoder).transform(src, &mut dst, true)?;
    tracing::debug!(read = src.len(), written = dst.len(), "transcoded json");
    Ok(dst)
}

enum Invalid {
    Truncated,
    Malformed,
}

fn valid_prefix(bytes: &[u8]) -> (&str, Option<Invalid>) {
    let text = bytes.utf8_chunks().next().map_or("", |chunk| chunk.valid());
    if text.len() == bytes.len() {
        return (text, None);
    }
    let invalid = match std::str::from_utf8(&bytes[text.len()..]) {
        Err(err) if err.valid_up_to() == 0 && err.error_len().is_none() => Invalid::Truncated,
        _ => Invalid::Malformed,
    };
    (text, Some(invalid))
}

/// Builds the `\\uXXXX` (or surrogate pair) escape for `ch`.
fn json_escape(ch: char) -> String {
    let mut units = [0u16; 2];
    let mut escape = String::with_capacity(12);
    for &unit in ch.encode_utf16(&mut units).iter() {
        escape.push_str("\\u");
        for shift in [12, 8, 4, 0] {
            escape.push(char::from(HEX_DIGITS[usize::from((unit >> shift) & 0xf)]));
        }
    }
    escape
}

fn malformed(offset: usize) -> Error {
    Error::new(ErrorKind::Malformed)
        .with_message("invalid UTF-8 in JSON input")
        .with_offset(offset as u64)
}
