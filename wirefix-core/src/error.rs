/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/6/26
******************************************************************************/

//! Error types for the wirefix FIX 4.4 codec.
//!
//! This module provides a unified error hierarchy using `thiserror` for typed,
//! domain-specific errors across decoding, encoding, and lazy value access.
//!
//! Offsets carried by [`DecodeError`] variants are byte offsets within the
//! current message, counted from its `8=` byte.

use thiserror::Error;

/// Result type alias using [`FixError`] as the error type.
pub type Result<T> = std::result::Result<T, FixError>;

/// Top-level error type for all wirefix operations.
#[derive(Debug, Error)]
pub enum FixError {
    /// Error during message decoding.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Error during message encoding.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Error while decoding a field value on demand.
    #[error("value error: {0}")]
    Value(#[from] ValueError),
}

/// Errors that occur during FIX message decoding.
///
/// On any decode failure the decoder restores its cursor to the entry value,
/// so the caller can inspect, log, or resynchronize.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Not enough bytes to contain a full message, or no checksum trailer found.
    #[error("truncated message: no checksum trailer within {offset} available bytes")]
    Truncated {
        /// Number of bytes that were available for scanning.
        offset: usize,
    },

    /// No checksum trailer within the configured maximum message size.
    #[error("message too large: {size} bytes exceeds maximum {max_size}")]
    MessageTooLarge {
        /// Bytes available from the cursor to the end of the region.
        size: usize,
        /// Maximum allowed message size in bytes.
        max_size: usize,
    },

    /// First field is not tag 8, or its value is not `FIX.4.4`.
    #[error("bad begin string at offset {offset}: message must open with 8=FIX.4.4")]
    BadBeginString {
        /// Offset of the offending field within the message.
        offset: usize,
    },

    /// Second field is not tag 9.
    #[error("missing body length at offset {offset}: second field must be tag 9")]
    MissingBodyLength {
        /// Offset of the offending field within the message.
        offset: usize,
    },

    /// Tag 9 value does not parse as a non-negative integer.
    #[error("invalid body length value at offset {offset}")]
    InvalidBodyLength {
        /// Offset of the body-length field within the message.
        offset: usize,
    },

    /// Declared body length disagrees with the measured span.
    #[error("body length mismatch: declared {declared}, measured {measured}")]
    BadBodyLength {
        /// Value declared in tag 9.
        declared: u64,
        /// Byte count from after tag 9's delimiter to the start of `10=`.
        measured: u64,
    },

    /// Well-framed message without a tag 35 field.
    #[error("missing msg type field (tag 35)")]
    MissingMsgType,

    /// Final field is not tag 10.
    #[error("missing checksum at offset {offset}: final field must be tag 10")]
    MissingChecksum {
        /// Offset of the final field within the message.
        offset: usize,
    },

    /// Tag 10 value is not exactly three ASCII digits in 0-255.
    #[error("invalid checksum value at offset {offset}: expected three digits")]
    InvalidChecksum {
        /// Offset of the checksum field within the message.
        offset: usize,
    },

    /// Declared checksum disagrees with the computed sum.
    #[error("checksum mismatch: calculated {calculated}, declared {declared}")]
    BadChecksum {
        /// Checksum computed over the message bytes.
        calculated: u8,
        /// Checksum declared in tag 10.
        declared: u8,
    },

    /// Field without a `=` separator or without a SOH terminator.
    #[error("malformed field at offset {offset}")]
    MalformedField {
        /// Offset of the offending field within the message.
        offset: usize,
    },

    /// Tag bytes do not parse as a decimal integer.
    #[error("invalid tag at offset {offset}")]
    InvalidTag {
        /// Offset of the offending field within the message.
        offset: usize,
    },

    /// Tag 35 value is not a recognized FIX 4.4 message type.
    #[error("unknown msg type: {msg_type}")]
    UnknownMsgType {
        /// The unrecognized message-type value.
        msg_type: String,
    },

    /// A tag required for the message type is absent.
    #[error("missing required field: tag {tag}")]
    MissingRequiredField {
        /// The tag number of the missing field.
        tag: u32,
    },
}

/// Errors that occur during FIX message encoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// No message type was set before building.
    #[error("missing msg type: set tag 35 before building")]
    MissingMsgType,

    /// A reserved header/trailer tag was passed as a body field.
    #[error("reserved tag {tag} is emitted by the encoder and not accepted in the body")]
    ReservedTagInBody {
        /// The offending tag number.
        tag: u32,
    },

    /// Caller-owned output buffer cannot hold the encoded message.
    #[error("buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Bytes needed to hold the encoded message.
        needed: usize,
        /// Bytes available in the caller's buffer.
        available: usize,
    },
}

/// Errors raised by the typed value accessors on [`crate::FieldView`].
///
/// These are never produced by the field scan itself; decoding a value is
/// deferred until the caller requests a typed read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Value bytes do not form a base-10 number of the requested kind.
    #[error("field {tag} does not hold a valid number")]
    InvalidNumber {
        /// The tag number of the field.
        tag: u32,
    },

    /// Value bytes are not valid UTF-8.
    #[error("field {tag} is not valid utf-8")]
    InvalidEncoding {
        /// The tag number of the field.
        tag: u32,
    },
}
