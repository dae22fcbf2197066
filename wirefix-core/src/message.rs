/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/6/26
******************************************************************************/

//! The parsed form of one FIX message.
//!
//! A [`Message`] is an ordered set of [`FieldView`]s over a backing byte
//! region, together with the header values the scanner captured: the tag 35
//! message type, the tag 9 declared body length, and the tag 10 declared
//! checksum. It is immutable after construction and shareable across threads
//! for as long as the backing region is live and unmodified.

use crate::error::ValueError;
use crate::field::FieldView;
use rust_decimal::Decimal;
use smallvec::SmallVec;

/// Inline storage for a message's fields, sized for typical order traffic.
pub type FieldVec<'a> = SmallVec<[FieldView<'a>; 32]>;

/// Zero-copy view of one decoded FIX message.
#[derive(Debug, Clone)]
pub struct Message<'a> {
    /// The complete wire bytes of this message, `8=` through the final SOH.
    region: &'a [u8],
    /// Fields in the order they appeared on the wire.
    fields: FieldVec<'a>,
    /// The tag 35 value.
    msg_type: &'a str,
    /// The tag 9 declared body length.
    body_length: u64,
    /// The tag 10 declared checksum.
    checksum: u8,
}

impl<'a> Message<'a> {
    /// Assembles a message from scanner output.
    #[must_use]
    pub fn new(
        region: &'a [u8],
        fields: FieldVec<'a>,
        msg_type: &'a str,
        body_length: u64,
        checksum: u8,
    ) -> Self {
        Self {
            region,
            fields,
            msg_type,
            body_length,
            checksum,
        }
    }

    /// Returns the message type (tag 35 value).
    #[inline]
    #[must_use]
    pub const fn msg_type(&self) -> &'a str {
        self.msg_type
    }

    /// Returns the declared body length (tag 9 value).
    #[inline]
    #[must_use]
    pub const fn body_length(&self) -> u64 {
        self.body_length
    }

    /// Returns the declared checksum (tag 10 value).
    #[inline]
    #[must_use]
    pub const fn checksum(&self) -> u8 {
        self.checksum
    }

    /// Returns true if the message carries the given tag.
    #[must_use]
    pub fn has(&self, tag: u32) -> bool {
        self.fields.iter().any(|f| f.tag() == tag)
    }

    /// Looks up a field by tag. The last occurrence wins.
    ///
    /// Earlier occurrences of a duplicated tag remain reachable through
    /// [`Message::iter_in_order`].
    #[must_use]
    pub fn field(&self, tag: u32) -> Option<FieldView<'a>> {
        self.fields.iter().rev().find(|f| f.tag() == tag).copied()
    }

    /// Returns a field value as text, or `Ok(None)` if the tag is absent.
    ///
    /// # Errors
    /// Returns [`ValueError::InvalidEncoding`] if the value is not UTF-8.
    pub fn get_text(&self, tag: u32) -> Result<Option<&'a str>, ValueError> {
        self.field(tag).map(|f| f.as_text()).transpose()
    }

    /// Returns a field value as an integer, or `Ok(None)` if the tag is absent.
    ///
    /// # Errors
    /// Returns [`ValueError::InvalidNumber`] if the value is not an integer.
    pub fn get_int(&self, tag: u32) -> Result<Option<i64>, ValueError> {
        self.field(tag).map(|f| f.as_int()).transpose()
    }

    /// Returns a field value as a decimal, or `Ok(None)` if the tag is absent.
    ///
    /// # Errors
    /// Returns [`ValueError::InvalidNumber`] if the value is not a decimal.
    pub fn get_decimal(&self, tag: u32) -> Result<Option<Decimal>, ValueError> {
        self.field(tag).map(|f| f.as_decimal()).transpose()
    }

    /// Iterates over all fields in wire order. Restartable and finite.
    pub fn iter_in_order(&self) -> impl Iterator<Item = FieldView<'a>> + '_ {
        self.fields.iter().copied()
    }

    /// Returns the number of fields in the message.
    #[inline]
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns the complete wire bytes of this message.
    #[inline]
    #[must_use]
    pub const fn wire_bytes(&self) -> &'a [u8] {
        self.region
    }

    /// Returns the message length in bytes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.region.len()
    }

    /// Returns true if the backing region is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.region.is_empty()
    }
}
