/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/6/26
******************************************************************************/

//! Core value types for FIX protocol operations.
//!
//! This module provides:
//! - [`SeqNum`]: Message sequence number wrapper
//! - [`Timestamp`]: FIX-formatted UTC timestamp
//! - [`CompId`]: Bounded component identifier (SenderCompID, TargetCompID)
//! - [`Clock`]: Injectable current-time capability for the encoder

use arrayvec::ArrayString;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for CompID strings in bytes.
pub const COMP_ID_MAX_LEN: usize = 32;

/// The tag 34 value the encoder stamps into each outgoing message.
///
/// The codec does not track or advance sequence numbers; the session layer
/// owns that. This wrapper only keeps a bare `u64` from being confused with
/// the other integers a message carries. Defaults to 1, the first message of
/// a fresh session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct SeqNum(u64);

impl SeqNum {
    /// Wraps a raw sequence number.
    #[inline]
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value, as emitted in tag 34.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Default for SeqNum {
    fn default() -> Self {
        Self(1)
    }
}

impl From<u64> for SeqNum {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// FIX protocol UTC timestamp with millisecond precision.
///
/// The wire representation is `YYYYMMDD-HH:MM:SS.sss` (tag 52 SendingTime,
/// tag 60 TransactTime).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    /// Milliseconds since Unix epoch (1970-01-01 00:00:00 UTC).
    millis_since_epoch: u64,
}

impl Timestamp {
    /// Creates a timestamp from milliseconds since Unix epoch.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self {
            millis_since_epoch: millis,
        }
    }

    /// Returns the current UTC timestamp.
    #[inline]
    #[must_use]
    pub fn now() -> Self {
        let dt = Utc::now();
        Self {
            millis_since_epoch: dt.timestamp_millis().max(0) as u64,
        }
    }

    /// Returns milliseconds since Unix epoch.
    #[inline]
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.millis_since_epoch
    }

    /// Converts to a chrono `DateTime<Utc>`.
    #[must_use]
    pub fn to_datetime(self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.millis_since_epoch as i64)
            .unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Formats the timestamp in FIX UTCTIMESTAMP form, `YYYYMMDD-HH:MM:SS.sss`.
    #[must_use]
    pub fn format_millis(self) -> ArrayString<21> {
        let dt = self.to_datetime();
        let mut buf = ArrayString::new();
        let _ = std::fmt::write(
            &mut buf,
            format_args!("{}", dt.format("%Y%m%d-%H:%M:%S%.3f")),
        );
        buf
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            millis_since_epoch: dt.timestamp_millis().max(0) as u64,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_millis())
    }
}

/// A SenderCompID (tag 49) or TargetCompID (tag 56) value.
///
/// The encoder writes one of these into the header of every message it
/// frames, so the identifier is bounded and stored inline rather than
/// heap-allocated per message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct CompId(ArrayString<COMP_ID_MAX_LEN>);

impl CompId {
    /// Creates a CompId, or `None` if `s` exceeds [`COMP_ID_MAX_LEN`] bytes.
    #[must_use]
    pub fn new(s: &str) -> Option<Self> {
        ArrayString::from(s).ok().map(Self)
    }

    /// Returns the identifier as emitted on the wire.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Injectable current-time capability.
///
/// The encoder consults a `Clock` when the caller does not supply a
/// SendingTime explicitly. Production code uses [`SystemClock`]; tests use
/// [`FixedClock`] for deterministic output.
pub trait Clock {
    /// Returns the current UTC time.
    fn now(&self) -> Timestamp;
}

/// Wall-clock implementation of [`Clock`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A [`Clock`] frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(Timestamp);

impl FixedClock {
    /// Creates a clock that always reports `time`.
    #[inline]
    #[must_use]
    pub const fn new(time: Timestamp) -> Self {
        Self(time)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
