/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/6/26
******************************************************************************/

//! Zero-copy streaming FIX 4.4 decoder.
//!
//! The decoder consumes a contiguous byte region holding one or more
//! concatenated FIX messages. [`Decoder::decode_one`] parses exactly one
//! message at the cursor and advances it past the parsed bytes; on any
//! failure the cursor is left at its entry value so the caller can inspect,
//! log, or resynchronize. [`Decoder::decode_all`] wraps that into a lazy,
//! fused iterator over a whole buffer.
//!
//! Field values are returned as references into the caller's region; the
//! decoder never copies payload bytes and never performs I/O.

use crate::checksum::{calculate_checksum, parse_checksum};
use memchr::{memchr, memmem};
use tracing::trace;
use wirefix_core::error::DecodeError;
use wirefix_core::field::FieldView;
use wirefix_core::message::{FieldVec, Message};
use wirefix_core::tags;
use wirefix_dictionary::Dictionary;

/// SOH (Start of Header) delimiter used in FIX messages.
pub const SOH: u8 = 0x01;

/// Equals sign delimiter between tag and value.
pub const EQUALS: u8 = b'=';

/// Smallest byte count a plausible FIX message can occupy.
pub const MIN_MESSAGE_SIZE: usize = 20;

/// Default maximum message size in bytes (1 MiB).
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 1024 * 1024;

/// The only BeginString this decoder accepts.
const BEGIN_STRING: &[u8] = b"FIX.4.4";

/// The byte sequence opening the checksum trailer.
const CHECKSUM_PREFIX: &[u8] = b"10=";

/// Length of the checksum value on the wire.
const CHECKSUM_VALUE_LEN: usize = 3;

/// Scratch record for one scanned field: tag plus absolute value offsets.
#[derive(Debug, Clone, Copy)]
struct RawField {
    tag: u32,
    start: usize,
    end: usize,
}

/// Streaming FIX 4.4 decoder.
///
/// A decoder holds a shared reference to the [`Dictionary`] plus per-instance
/// scratch state, so it is cheap to call repeatedly but must not be shared
/// across threads concurrently; instantiate one decoder per thread.
#[derive(Debug)]
pub struct Decoder<'d> {
    dict: &'d Dictionary,
    validate_checksum: bool,
    validate_dictionary: bool,
    max_message_size: usize,
    /// Field accumulator reused across calls, cleared at each entry so a
    /// prior failure cannot leak fields into the next message.
    scratch: Vec<RawField>,
}

impl<'d> Decoder<'d> {
    /// Creates a decoder with checksum and dictionary validation enabled and
    /// the default maximum message size.
    #[must_use]
    pub fn new(dict: &'d Dictionary) -> Self {
        Self {
            dict,
            validate_checksum: true,
            validate_dictionary: true,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            scratch: Vec::with_capacity(32),
        }
    }

    /// Sets whether BodyLength and CheckSum are verified.
    ///
    /// The two are linked integrity signals and are verified together.
    #[must_use]
    pub fn with_checksum_validation(mut self, validate: bool) -> Self {
        self.validate_checksum = validate;
        self
    }

    /// Sets whether the message type and required fields are checked against
    /// the dictionary.
    ///
    /// Per-field value-type predicates are never applied during decode;
    /// unknown tags are permitted by FIX. Callers wanting stricter checks can
    /// run [`Dictionary::validate_value`] over the decoded fields.
    #[must_use]
    pub fn with_dictionary_validation(mut self, validate: bool) -> Self {
        self.validate_dictionary = validate;
        self
    }

    /// Sets the maximum distance the trailer search will scan.
    #[must_use]
    pub fn with_max_message_size(mut self, max_message_size: usize) -> Self {
        self.max_message_size = max_message_size;
        self
    }

    /// Decodes exactly one message starting at `*cursor` within `region`.
    ///
    /// On success the cursor is advanced to the byte after the parsed
    /// message. On failure the cursor keeps its entry value and no partial
    /// message is returned.
    ///
    /// # Errors
    /// Returns a [`DecodeError`] describing the first framing, integrity, or
    /// dictionary violation encountered.
    pub fn decode_one<'a>(
        &mut self,
        region: &'a [u8],
        cursor: &mut usize,
    ) -> Result<Message<'a>, DecodeError> {
        let start = *cursor;
        self.scratch.clear();
        let message = self.parse_one(region, start)?;
        *cursor = start + message.len();
        trace!(
            msg_type = message.msg_type(),
            len = message.len(),
            "decoded message"
        );
        Ok(message)
    }

    /// Returns a lazy iterator decoding successive messages from `region`.
    ///
    /// The iterator yields messages strictly in byte order, stops after the
    /// first error, and ends once fewer than [`MIN_MESSAGE_SIZE`] bytes
    /// remain. It is not restartable.
    pub fn decode_all<'r, 'a>(&'r mut self, region: &'a [u8]) -> DecodeAll<'r, 'd, 'a> {
        DecodeAll {
            decoder: self,
            region,
            cursor: 0,
            fused: false,
        }
    }

    fn parse_one<'a>(&mut self, region: &'a [u8], start: usize) -> Result<Message<'a>, DecodeError> {
        let available = region.len().saturating_sub(start);
        if available < MIN_MESSAGE_SIZE {
            return Err(DecodeError::Truncated { offset: available });
        }

        let end = self.locate_end(region, start)?;

        let mut body_length: Option<u64> = None;
        let mut body_start = start;
        let mut msg_type: Option<&'a str> = None;
        let mut checksum: Option<u8> = None;
        let mut checksum_field_start = end;
        let mut last_field_offset = 0;

        let mut pos = start;
        let mut ordinal = 0usize;
        while pos < end {
            let field_start = pos;
            let offset = field_start - start;
            last_field_offset = offset;

            let eq = match memchr(EQUALS, &region[pos..end]) {
                Some(i) => pos + i,
                None => return Err(DecodeError::MalformedField { offset }),
            };
            // A SOH before the '=' means this field never had a separator.
            if memchr(SOH, &region[field_start..eq]).is_some() {
                return Err(DecodeError::MalformedField { offset });
            }
            let tag = parse_tag(&region[field_start..eq])
                .ok_or(DecodeError::InvalidTag { offset })?;

            let value_start = eq + 1;
            let value_end = match memchr(SOH, &region[value_start..end]) {
                Some(i) => value_start + i,
                None => return Err(DecodeError::MalformedField { offset }),
            };
            let value = &region[value_start..value_end];

            match ordinal {
                0 => {
                    if tag != tags::BEGIN_STRING || value != BEGIN_STRING {
                        return Err(DecodeError::BadBeginString { offset });
                    }
                }
                1 => {
                    if tag != tags::BODY_LENGTH {
                        return Err(DecodeError::MissingBodyLength { offset });
                    }
                    body_length = Some(
                        parse_length(value).ok_or(DecodeError::InvalidBodyLength { offset })?,
                    );
                    body_start = value_end + 1;
                }
                _ => {}
            }

            if tag == tags::MSG_TYPE {
                msg_type = Some(
                    std::str::from_utf8(value)
                        .map_err(|_| DecodeError::MalformedField { offset })?,
                );
            } else if tag == tags::CHECK_SUM {
                checksum =
                    Some(parse_checksum(value).ok_or(DecodeError::InvalidChecksum { offset })?);
                checksum_field_start = field_start;
            }

            self.scratch.push(RawField {
                tag,
                start: value_start,
                end: value_end,
            });
            pos = value_end + 1;
            ordinal += 1;
        }

        let body_length = body_length.ok_or(DecodeError::MissingBodyLength {
            offset: last_field_offset,
        })?;
        let msg_type = msg_type.ok_or(DecodeError::MissingMsgType)?;
        let declared_checksum = checksum.ok_or(DecodeError::MissingChecksum {
            offset: last_field_offset,
        })?;

        if self.validate_checksum {
            let measured = (checksum_field_start - body_start) as u64;
            if body_length != measured {
                return Err(DecodeError::BadBodyLength {
                    declared: body_length,
                    measured,
                });
            }
            let calculated = calculate_checksum(&region[start..checksum_field_start]);
            if calculated != declared_checksum {
                return Err(DecodeError::BadChecksum {
                    calculated,
                    declared: declared_checksum,
                });
            }
        }

        if self.validate_dictionary {
            if !self.dict.is_valid_msg_type(msg_type) {
                return Err(DecodeError::UnknownMsgType {
                    msg_type: msg_type.to_string(),
                });
            }
            for &tag in self.dict.required_fields(msg_type) {
                if !self.scratch.iter().any(|f| f.tag == tag) {
                    return Err(DecodeError::MissingRequiredField { tag });
                }
            }
        }

        let fields: FieldVec<'a> = self
            .scratch
            .iter()
            .map(|f| FieldView::new(f.tag, &region[f.start..f.end]))
            .collect();

        Ok(Message::new(
            &region[start..end],
            fields,
            msg_type,
            body_length,
            declared_checksum,
        ))
    }

    /// Finds the byte after the checksum trailer of the message at `start`.
    ///
    /// The trailer is defined by position, not value: `10=` opening a field,
    /// any three value bytes, and a SOH. Requiring the field boundary keeps a
    /// body tag such as 110 from masquerading as the trailer.
    fn locate_end(&self, region: &[u8], start: usize) -> Result<usize, DecodeError> {
        let window_end = region.len().min(start + self.max_message_size);
        let window = &region[start..window_end];

        for pos in memmem::find_iter(window, CHECKSUM_PREFIX) {
            if pos == 0 || window[pos - 1] != SOH {
                continue;
            }
            let delim = pos + CHECKSUM_PREFIX.len() + CHECKSUM_VALUE_LEN;
            if delim >= window.len() {
                break;
            }
            if window[delim] == SOH {
                return Ok(start + delim + 1);
            }
        }

        if window_end < region.len() {
            Err(DecodeError::MessageTooLarge {
                size: region.len() - start,
                max_size: self.max_message_size,
            })
        } else {
            Err(DecodeError::Truncated {
                offset: window.len(),
            })
        }
    }
}

/// Lazy iterator over the messages in a byte region.
///
/// Created by [`Decoder::decode_all`]. Fused at the first error; the caller
/// can read [`DecodeAll::cursor`] afterwards to decide where to resume or
/// resynchronize.
#[derive(Debug)]
pub struct DecodeAll<'r, 'd, 'a> {
    decoder: &'r mut Decoder<'d>,
    region: &'a [u8],
    cursor: usize,
    fused: bool,
}

impl DecodeAll<'_, '_, '_> {
    /// Returns the current cursor position within the region.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }
}

impl<'a> Iterator for DecodeAll<'_, '_, 'a> {
    type Item = Result<Message<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused || self.region.len() - self.cursor < MIN_MESSAGE_SIZE {
            return None;
        }
        match self.decoder.decode_one(self.region, &mut self.cursor) {
            Ok(message) => Some(Ok(message)),
            Err(err) => {
                self.fused = true;
                Some(Err(err))
            }
        }
    }
}

/// Parses a tag number from ASCII digit bytes.
#[inline]
fn parse_tag(bytes: &[u8]) -> Option<u32> {
    if bytes.is_empty() || bytes.len() > 10 {
        return None;
    }
    let mut tag: u32 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        tag = tag.checked_mul(10)?.checked_add(u32::from(b - b'0'))?;
    }
    Some(tag)
}

/// Parses a non-negative length from ASCII digit bytes.
#[inline]
fn parse_length(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() || bytes.len() > 10 {
        return None;
    }
    let mut value: u64 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value * 10 + u64::from(b - b'0');
    }
    Some(value)
}
