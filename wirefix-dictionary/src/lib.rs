/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/6/26
******************************************************************************/

//! # Wirefix Dictionary
//!
//! Compiled-in FIX 4.4 data dictionary for the wirefix codec.
//!
//! This crate provides:
//! - **Message types**: the set of recognized FIX 4.4 MsgType values
//! - **Required fields**: per-type required-tag sets, header/trailer included
//! - **Field definitions**: name, value-type class, and header flag per tag
//! - **Value predicates**: byte-level type checks for the common tags
//!
//! A [`Dictionary`] is immutable after construction and freely shareable
//! across threads by reference. There is no global instance; callers
//! construct one and pass it to the decoder and encoder.

mod fix44;
mod schema;

pub use schema::{FieldDef, FieldType};

use std::collections::{HashMap, HashSet};

/// Immutable FIX 4.4 dictionary.
#[derive(Debug, Clone)]
pub struct Dictionary {
    msg_types: HashSet<&'static str>,
    required: HashMap<&'static str, Vec<u32>>,
    fields: HashMap<u32, FieldDef>,
}

impl Dictionary {
    /// Builds the FIX 4.4 dictionary from the compiled-in tables.
    #[must_use]
    pub fn new() -> Self {
        let msg_types = fix44::MSG_TYPES.iter().copied().collect();

        let required = fix44::REQUIRED
            .iter()
            .map(|&(msg_type, extra)| {
                let mut tags = fix44::HEADER_TAGS.to_vec();
                tags.extend_from_slice(extra);
                (msg_type, tags)
            })
            .collect();

        let fields = fix44::FIELDS
            .iter()
            .map(|&(tag, name, field_type)| {
                let def = FieldDef {
                    tag,
                    name,
                    field_type,
                    header: fix44::HEADER_TAGS.contains(&tag),
                };
                (tag, def)
            })
            .collect();

        Self {
            msg_types,
            required,
            fields,
        }
    }

    /// Returns true if `msg_type` is a recognized FIX 4.4 message type.
    #[must_use]
    pub fn is_valid_msg_type(&self, msg_type: &str) -> bool {
        self.msg_types.contains(msg_type)
    }

    /// Returns the tags required for `msg_type`.
    ///
    /// Every recognized type requires at least the shared header/trailer
    /// tags; an unrecognized type yields an empty slice.
    #[must_use]
    pub fn required_fields(&self, msg_type: &str) -> &[u32] {
        if let Some(tags) = self.required.get(msg_type) {
            tags
        } else if self.msg_types.contains(msg_type) {
            fix44::HEADER_TAGS
        } else {
            &[]
        }
    }

    /// Looks up a field definition by tag.
    #[must_use]
    pub fn field_def(&self, tag: u32) -> Option<&FieldDef> {
        self.fields.get(&tag)
    }

    /// Checks `value` against the tag's type class.
    ///
    /// Unknown tags validate as true: FIX permits user-defined fields and the
    /// dictionary cannot say anything about their values.
    #[must_use]
    pub fn validate_value(&self, tag: u32, value: &[u8]) -> bool {
        match self.fields.get(&tag) {
            Some(def) => def.field_type.validate(value),
            None => true,
        }
    }

    /// Returns true if `tag` is one of the header/trailer tags.
    #[must_use]
    pub fn is_header_field(&self, tag: u32) -> bool {
        self.fields.get(&tag).is_some_and(|def| def.header)
    }

    /// Returns the number of catalogued field definitions.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_msg_types() {
        let dict = Dictionary::new();
        for msg_type in ["0", "1", "A", "D", "8", "V", "W", "X", "Y", "I"] {
            assert!(dict.is_valid_msg_type(msg_type), "{msg_type} rejected");
        }
        assert!(!dict.is_valid_msg_type("@"));
        assert!(!dict.is_valid_msg_type("ZZ"));
        assert!(!dict.is_valid_msg_type(""));
    }

    #[test]
    fn test_required_fields_include_header() {
        let dict = Dictionary::new();
        let required = dict.required_fields("D");
        for tag in [8, 9, 35, 49, 56, 34, 52, 10] {
            assert!(required.contains(&tag), "header tag {tag} missing");
        }
        for tag in [11, 21, 55, 54, 60] {
            assert!(required.contains(&tag), "body tag {tag} missing");
        }
    }

    #[test]
    fn test_required_fields_for_heartbeat() {
        let dict = Dictionary::new();
        assert_eq!(dict.required_fields("0").len(), 8);
    }

    #[test]
    fn test_required_fields_for_recognized_type_without_profile() {
        let dict = Dictionary::new();
        // News (B) is recognized but has no extra required tags encoded.
        assert_eq!(dict.required_fields("B"), &[8, 9, 35, 49, 56, 34, 52, 10]);
    }

    #[test]
    fn test_required_fields_for_unknown_type() {
        let dict = Dictionary::new();
        assert!(dict.required_fields("@").is_empty());
    }

    #[test]
    fn test_field_def_lookup() {
        let dict = Dictionary::new();
        let symbol = dict.field_def(55).unwrap();
        assert_eq!(symbol.name, "Symbol");
        assert_eq!(symbol.field_type, FieldType::Text);
        assert!(!symbol.header);

        let sending_time = dict.field_def(52).unwrap();
        assert_eq!(sending_time.field_type, FieldType::UtcTimestamp);
        assert!(sending_time.header);

        assert!(dict.field_def(9999).is_none());
    }

    #[test]
    fn test_validate_value() {
        let dict = Dictionary::new();
        assert!(dict.validate_value(34, b"17"));
        assert!(!dict.validate_value(34, b"0"));
        assert!(dict.validate_value(52, b"20231201-10:30:00.000"));
        assert!(!dict.validate_value(52, b"yesterday"));
        assert!(dict.validate_value(38, b"100.5"));
    }

    #[test]
    fn test_validate_value_unknown_tag_permitted() {
        let dict = Dictionary::new();
        assert!(dict.validate_value(9999, b"anything at all"));
        assert!(dict.validate_value(9999, b""));
    }

    #[test]
    fn test_is_header_field() {
        let dict = Dictionary::new();
        assert!(dict.is_header_field(8));
        assert!(dict.is_header_field(10));
        assert!(dict.is_header_field(52));
        assert!(!dict.is_header_field(55));
        assert!(!dict.is_header_field(9999));
    }
}
