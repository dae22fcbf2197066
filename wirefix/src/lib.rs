/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/6/26
******************************************************************************/

//! # Wirefix
//!
//! A FIX 4.4 wire codec for the low-latency front of a trading stack:
//! zero-copy decoding of inbound byte streams, framing/checksum/dictionary
//! validation, and encoding of outbound messages with measured `BodyLength`
//! and computed `CheckSum`.
//!
//! Session-layer concerns (sequence tracking, resend, heartbeat timing) and
//! network I/O live outside this crate; the decoder consumes byte regions
//! the caller has already materialized.
//!
//! ## Quick start
//!
//! ```
//! use wirefix::{CompId, Decoder, Dictionary, Encoder, FixedClock, Timestamp};
//!
//! let dict = Dictionary::new();
//!
//! let clock = FixedClock::new(Timestamp::from_millis(1_701_426_600_000));
//! let mut encoder = Encoder::with_clock(
//!     &dict,
//!     CompId::new("CLIENT").unwrap(),
//!     CompId::new("SERVER").unwrap(),
//!     clock,
//! );
//! encoder.msg_type("0").seq_num(1u64);
//! let wire = encoder.build().unwrap();
//!
//! let mut decoder = Decoder::new(&dict);
//! let mut cursor = 0;
//! let message = decoder.decode_one(&wire, &mut cursor).unwrap();
//! assert_eq!(message.msg_type(), "0");
//! assert_eq!(message.get_text(49).unwrap(), Some("CLIENT"));
//! assert_eq!(cursor, wire.len());
//! ```

pub use wirefix_core::error::{DecodeError, EncodeError, FixError, Result, ValueError};
pub use wirefix_core::field::FieldView;
pub use wirefix_core::message::{FieldVec, Message};
pub use wirefix_core::tags;
pub use wirefix_core::types::{Clock, CompId, FixedClock, SeqNum, SystemClock, Timestamp};
pub use wirefix_dictionary::{Dictionary, FieldDef, FieldType};
pub use wirefix_tagvalue::checksum::{calculate_checksum, format_checksum, parse_checksum};
pub use wirefix_tagvalue::decoder::{DecodeAll, Decoder, DEFAULT_MAX_MESSAGE_SIZE, MIN_MESSAGE_SIZE, SOH};
pub use wirefix_tagvalue::encoder::{Encoder, BEGIN_STRING};
