/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/6/26
******************************************************************************/

//! FIX 4.4 message encoder.
//!
//! The encoder owns the session identities (SenderCompID, TargetCompID) and
//! emits complete framed messages: the `8=FIX.4.4` and `9=` header, the body
//! in defined order (35, 49, 56, 34, 52, then caller fields), and the
//! computed three-digit checksum trailer. BodyLength is measured from the
//! assembled body, never estimated.
//!
//! SendingTime comes from an injected [`Clock`] unless supplied explicitly,
//! so tests can freeze it and reproduce byte-identical output.

use crate::checksum::{calculate_checksum, format_checksum};
use bytes::{BufMut, BytesMut};
use rust_decimal::Decimal;
use tracing::trace;
use wirefix_core::error::EncodeError;
use wirefix_core::tags;
use wirefix_core::types::{Clock, CompId, SeqNum, SystemClock, Timestamp};
use wirefix_dictionary::Dictionary;

/// SOH (Start of Header) delimiter used in FIX messages.
pub const SOH: u8 = 0x01;

/// The BeginString emitted by this encoder.
pub const BEGIN_STRING: &str = "FIX.4.4";

/// FIX 4.4 message encoder bound to one session's identities.
///
/// Body fields accumulate in the order they are appended; duplicate tags are
/// permitted and preserved. The header/trailer tags (8, 9, 35, 49, 56, 34,
/// 52, 10) are emitted by the encoder itself and rejected as body fields.
#[derive(Debug)]
pub struct Encoder<'d, C = SystemClock> {
    dict: &'d Dictionary,
    clock: C,
    sender: CompId,
    target: CompId,
    msg_type: Option<String>,
    seq_num: SeqNum,
    sending_time: Option<Timestamp>,
    body: BytesMut,
}

impl<'d> Encoder<'d, SystemClock> {
    /// Creates an encoder using the wall clock for SendingTime.
    #[must_use]
    pub fn new(dict: &'d Dictionary, sender: CompId, target: CompId) -> Self {
        Self::with_clock(dict, sender, target, SystemClock)
    }
}

impl<'d, C: Clock> Encoder<'d, C> {
    /// Creates an encoder with an injected clock.
    #[must_use]
    pub fn with_clock(dict: &'d Dictionary, sender: CompId, target: CompId, clock: C) -> Self {
        Self {
            dict,
            clock,
            sender,
            target,
            msg_type: None,
            seq_num: SeqNum::default(),
            sending_time: None,
            body: BytesMut::with_capacity(256),
        }
    }

    /// Sets the message type (tag 35).
    pub fn msg_type(&mut self, msg_type: &str) -> &mut Self {
        self.msg_type = Some(msg_type.to_string());
        self
    }

    /// Sets the message sequence number (tag 34).
    pub fn seq_num(&mut self, seq_num: impl Into<SeqNum>) -> &mut Self {
        self.seq_num = seq_num.into();
        self
    }

    /// Sets an explicit SendingTime (tag 52) instead of consulting the clock.
    pub fn sending_time(&mut self, time: Timestamp) -> &mut Self {
        self.sending_time = Some(time);
        self
    }

    /// Appends a body field with a string value.
    ///
    /// # Errors
    /// Returns [`EncodeError::ReservedTagInBody`] for header/trailer tags.
    pub fn field_str(&mut self, tag: u32, value: &str) -> Result<&mut Self, EncodeError> {
        self.field_raw(tag, value.as_bytes())
    }

    /// Appends a body field with a signed integer value.
    ///
    /// # Errors
    /// Returns [`EncodeError::ReservedTagInBody`] for header/trailer tags.
    pub fn field_int(&mut self, tag: u32, value: i64) -> Result<&mut Self, EncodeError> {
        let mut buf = itoa::Buffer::new();
        self.field_raw(tag, buf.format(value).as_bytes())
    }

    /// Appends a body field with an unsigned integer value.
    ///
    /// # Errors
    /// Returns [`EncodeError::ReservedTagInBody`] for header/trailer tags.
    pub fn field_uint(&mut self, tag: u32, value: u64) -> Result<&mut Self, EncodeError> {
        let mut buf = itoa::Buffer::new();
        self.field_raw(tag, buf.format(value).as_bytes())
    }

    /// Appends a body field with a decimal value.
    ///
    /// # Errors
    /// Returns [`EncodeError::ReservedTagInBody`] for header/trailer tags.
    pub fn field_decimal(&mut self, tag: u32, value: Decimal) -> Result<&mut Self, EncodeError> {
        self.field_raw(tag, value.to_string().as_bytes())
    }

    /// Appends a body field with a single character value.
    ///
    /// # Errors
    /// Returns [`EncodeError::ReservedTagInBody`] for header/trailer tags.
    pub fn field_char(&mut self, tag: u32, value: char) -> Result<&mut Self, EncodeError> {
        let mut buf = [0u8; 4];
        let s = value.encode_utf8(&mut buf);
        self.field_raw(tag, s.as_bytes())
    }

    /// Appends a body field with raw value bytes.
    ///
    /// # Errors
    /// Returns [`EncodeError::ReservedTagInBody`] for header/trailer tags.
    pub fn field_raw(&mut self, tag: u32, value: &[u8]) -> Result<&mut Self, EncodeError> {
        if self.dict.is_header_field(tag) {
            return Err(EncodeError::ReservedTagInBody { tag });
        }
        put_field(&mut self.body, tag, value);
        Ok(self)
    }

    /// Builds the complete framed message.
    ///
    /// The encoder state is left intact, so the same message can be rebuilt
    /// or extended; call [`Encoder::clear`] to start the next message.
    ///
    /// # Errors
    /// Returns [`EncodeError::MissingMsgType`] if no message type was set.
    pub fn build(&mut self) -> Result<BytesMut, EncodeError> {
        let msg_type = self.msg_type.as_deref().ok_or(EncodeError::MissingMsgType)?;
        let sending_time = self.sending_time.unwrap_or_else(|| self.clock.now());

        // Body first: its measured length becomes tag 9.
        let mut body = BytesMut::with_capacity(64 + self.body.len());
        put_field(&mut body, tags::MSG_TYPE, msg_type.as_bytes());
        put_field(&mut body, tags::SENDER_COMP_ID, self.sender.as_str().as_bytes());
        put_field(&mut body, tags::TARGET_COMP_ID, self.target.as_str().as_bytes());
        let mut seq_buf = itoa::Buffer::new();
        put_field(
            &mut body,
            tags::MSG_SEQ_NUM,
            seq_buf.format(self.seq_num.value()).as_bytes(),
        );
        put_field(
            &mut body,
            tags::SENDING_TIME,
            sending_time.format_millis().as_bytes(),
        );
        body.put_slice(&self.body);

        let mut message = BytesMut::with_capacity(body.len() + 32);
        message.put_slice(b"8=");
        message.put_slice(BEGIN_STRING.as_bytes());
        message.put_u8(SOH);
        message.put_slice(b"9=");
        let mut len_buf = itoa::Buffer::new();
        message.put_slice(len_buf.format(body.len()).as_bytes());
        message.put_u8(SOH);
        message.put_slice(&body);

        let checksum = calculate_checksum(&message);
        message.put_slice(b"10=");
        message.put_slice(&format_checksum(checksum));
        message.put_u8(SOH);

        trace!(msg_type, len = message.len(), "encoded message");
        Ok(message)
    }

    /// Builds the message into a caller-owned buffer.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    /// Returns [`EncodeError::BufferTooSmall`] if `buf` cannot hold the
    /// encoded message, or [`EncodeError::MissingMsgType`] as for `build`.
    pub fn encode_into(&mut self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        let message = self.build()?;
        if buf.len() < message.len() {
            return Err(EncodeError::BufferTooSmall {
                needed: message.len(),
                available: buf.len(),
            });
        }
        buf[..message.len()].copy_from_slice(&message);
        Ok(message.len())
    }

    /// Resets per-message state (type, explicit SendingTime, body fields).
    ///
    /// Session identities and the sequence number are retained.
    pub fn clear(&mut self) {
        self.msg_type = None;
        self.sending_time = None;
        self.body.clear();
    }

    /// Returns the accumulated body length in bytes, caller fields only.
    #[inline]
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.len()
    }
}

/// Writes one `tag=value<SOH>` field into `buf`.
fn put_field(buf: &mut BytesMut, tag: u32, value: &[u8]) {
    let mut tag_buf = itoa::Buffer::new();
    buf.put_slice(tag_buf.format(tag).as_bytes());
    buf.put_u8(b'=');
    buf.put_slice(value);
    buf.put_u8(SOH);
}
