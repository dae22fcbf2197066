/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/6/26
******************************************************************************/

//! End-to-end codec tests: concrete wire scenarios plus property-based
//! checks of the round-trip, cursor, and integrity invariants.

use proptest::prelude::*;
use wirefix::{
    calculate_checksum, format_checksum, parse_checksum, tags, CompId, DecodeError, Decoder,
    Dictionary, Encoder, FixedClock, Timestamp, MIN_MESSAGE_SIZE, SOH,
};

// 2023-12-01 10:30:00.000 UTC, the instant the fixtures are stamped with.
const FROZEN_MILLIS: u64 = 1_701_426_600_000;
const FROZEN_TIME: &str = "20231201-10:30:00.000";

const HEARTBEAT_BODY: &str =
    "35=0\x0149=CLIENT\x0156=SERVER\x0134=1\x0152=20231201-10:30:00.000\x01";

/// Frames `body` with a correct BodyLength and CheckSum.
fn frame(body: &str) -> Vec<u8> {
    let mut message = format!("8=FIX.4.4\x019={}\x01{}", body.len(), body).into_bytes();
    let checksum = calculate_checksum(&message);
    message.extend_from_slice(b"10=");
    message.extend_from_slice(&format_checksum(checksum));
    message.push(SOH);
    message
}

fn frozen_encoder<'d>(dict: &'d Dictionary, sender: &str, target: &str) -> Encoder<'d, FixedClock> {
    Encoder::with_clock(
        dict,
        CompId::new(sender).unwrap(),
        CompId::new(target).unwrap(),
        FixedClock::new(Timestamp::from_millis(FROZEN_MILLIS)),
    )
}

#[test]
fn heartbeat_round_trip() {
    let dict = Dictionary::new();
    let raw = frame(HEARTBEAT_BODY);

    let mut decoder = Decoder::new(&dict);
    let mut cursor = 0;
    let message = decoder.decode_one(&raw, &mut cursor).unwrap();

    assert_eq!(message.msg_type(), "0");
    assert_eq!(message.get_text(49), Ok(Some("CLIENT")));
    assert_eq!(message.get_text(56), Ok(Some("SERVER")));
    assert_eq!(message.get_int(34), Ok(Some(1)));
    assert_eq!(message.get_text(52), Ok(Some(FROZEN_TIME)));
    assert_eq!(cursor, raw.len());

    let mut encoder = frozen_encoder(&dict, "CLIENT", "SERVER");
    encoder.msg_type("0").seq_num(1u64);
    let reencoded = encoder.build().unwrap();
    assert_eq!(&reencoded[..], &raw[..]);
}

#[test]
fn bad_checksum_restores_cursor() {
    let dict = Dictionary::new();
    let mut raw = frame(HEARTBEAT_BODY);
    let len = raw.len();
    let declared = parse_checksum(&raw[len - 4..len - 1]).unwrap();
    raw[len - 4..len - 1].copy_from_slice(&format_checksum(declared.wrapping_add(1)));

    let mut decoder = Decoder::new(&dict);
    let mut cursor = 0;
    let err = decoder.decode_one(&raw, &mut cursor).unwrap_err();
    assert!(matches!(err, DecodeError::BadChecksum { .. }));
    assert_eq!(cursor, 0);

    // Repair the trailer and the same buffer decodes (S6).
    let checksum = calculate_checksum(&raw[..len - 7]);
    raw[len - 4..len - 1].copy_from_slice(&format_checksum(checksum));
    let message = decoder.decode_one(&raw, &mut cursor).unwrap();
    assert_eq!(message.msg_type(), "0");
    assert_eq!(cursor, raw.len());
}

#[test]
fn out_of_range_checksum_is_structural() {
    let dict = Dictionary::new();
    let mut raw = frame(HEARTBEAT_BODY);
    let len = raw.len();
    raw[len - 4..len - 1].copy_from_slice(b"999");

    // A three-digit value above 255 is rejected at scan time even with the
    // checksum comparison switched off.
    for validate in [true, false] {
        let mut decoder = Decoder::new(&dict).with_checksum_validation(validate);
        let mut cursor = 0;
        let err = decoder.decode_one(&raw, &mut cursor).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidChecksum { .. }));
        assert_eq!(cursor, 0);
    }
}

#[test]
fn unknown_msg_type_depends_on_dictionary_validation() {
    let dict = Dictionary::new();
    let raw = frame("35=@\x0149=CLIENT\x0156=SERVER\x0134=1\x0152=20231201-10:30:00.000\x01");

    let mut strict = Decoder::new(&dict);
    let mut cursor = 0;
    assert_eq!(
        strict.decode_one(&raw, &mut cursor).unwrap_err(),
        DecodeError::UnknownMsgType {
            msg_type: "@".to_string()
        }
    );
    assert_eq!(cursor, 0);

    let mut lax = Decoder::new(&dict).with_dictionary_validation(false);
    let mut cursor = 0;
    let message = lax.decode_one(&raw, &mut cursor).unwrap();
    assert_eq!(message.msg_type(), "@");
}

#[test]
fn new_order_missing_symbol_is_rejected() {
    let dict = Dictionary::new();
    let raw = frame(
        "35=D\x0149=CLIENT\x0156=SERVER\x0134=7\x0152=20231201-10:30:00.000\x01\
         11=ORD1\x0121=1\x0154=1\x0160=20231201-10:30:00.000\x01",
    );

    let mut decoder = Decoder::new(&dict);
    let mut cursor = 0;
    assert_eq!(
        decoder.decode_one(&raw, &mut cursor).unwrap_err(),
        DecodeError::MissingRequiredField { tag: 55 }
    );
}

#[test]
fn two_concatenated_heartbeats() {
    let dict = Dictionary::new();
    let mut encoder = frozen_encoder(&dict, "CLIENT", "SERVER");
    encoder.msg_type("0").seq_num(1u64);
    let mut buffer = encoder.build().unwrap().to_vec();
    encoder.seq_num(2u64);
    buffer.extend_from_slice(&encoder.build().unwrap());

    let mut decoder = Decoder::new(&dict);
    let mut iter = decoder.decode_all(&buffer);
    assert_eq!(iter.next().unwrap().unwrap().get_int(34), Ok(Some(1)));
    assert_eq!(iter.next().unwrap().unwrap().get_int(34), Ok(Some(2)));
    assert!(iter.next().is_none());
    assert_eq!(iter.cursor(), buffer.len());
}

#[test]
fn decoded_order_reencodes_byte_identical() {
    let dict = Dictionary::new();
    let raw = frame(
        "35=D\x0149=CLIENT\x0156=SERVER\x0134=7\x0152=20231201-10:30:00.000\x01\
         11=ORD1\x0121=1\x0155=AAPL\x0154=1\x0138=100\x0140=2\x0160=20231201-10:30:00.000\x01",
    );

    let mut decoder = Decoder::new(&dict);
    let mut cursor = 0;
    let message = decoder.decode_one(&raw, &mut cursor).unwrap();

    let sender = message.get_text(49).unwrap().unwrap();
    let target = message.get_text(56).unwrap().unwrap();
    let seq = message.get_int(34).unwrap().unwrap() as u64;

    let mut encoder = frozen_encoder(&dict, sender, target);
    encoder.msg_type(message.msg_type()).seq_num(seq);
    for field in message.iter_in_order() {
        if !tags::is_reserved(field.tag()) {
            encoder.field_raw(field.tag(), field.bytes()).unwrap();
        }
    }
    let reencoded = encoder.build().unwrap();
    assert_eq!(&reencoded[..], &raw[..]);
}

#[test]
fn logon_with_session_options_decodes() {
    let dict = Dictionary::new();
    let raw = frame(
        "35=A\x0149=CLIENT\x0156=SERVER\x0134=1\x0152=20231201-10:30:00.000\x01\
         98=0\x01108=30\x01141=Y\x01",
    );

    let mut decoder = Decoder::new(&dict);
    let mut cursor = 0;
    let message = decoder.decode_one(&raw, &mut cursor).unwrap();
    assert_eq!(message.msg_type(), "A");
    assert_eq!(message.get_int(98), Ok(Some(0)));
    assert_eq!(message.get_int(108), Ok(Some(30)));
    assert_eq!(message.get_text(141), Ok(Some("Y")));
}

#[test]
fn decoded_fields_pass_dictionary_predicates() {
    let dict = Dictionary::new();
    let raw = frame(
        "35=D\x0149=CLIENT\x0156=SERVER\x0134=7\x0152=20231201-10:30:00.000\x01\
         11=ORD1\x0121=1\x0155=AAPL\x0154=1\x0138=100.5\x0140=2\x0160=20231201-10:30:00.000\x01",
    );

    let mut decoder = Decoder::new(&dict);
    let mut cursor = 0;
    let message = decoder.decode_one(&raw, &mut cursor).unwrap();

    // The decoder never applies type predicates itself; callers can.
    for field in message.iter_in_order() {
        assert!(
            dict.validate_value(field.tag(), field.bytes()),
            "tag {} failed its predicate",
            field.tag()
        );
    }
    assert!(!dict.validate_value(38, b"lots"));
}

#[test]
fn trailing_garbage_shorter_than_a_message_ends_iteration() {
    let dict = Dictionary::new();
    let mut buffer = frame(HEARTBEAT_BODY);
    buffer.extend_from_slice(b"8=FIX.4.4\x01");
    assert!(buffer.len() - frame(HEARTBEAT_BODY).len() < MIN_MESSAGE_SIZE);

    let mut decoder = Decoder::new(&dict);
    let results: Vec<_> = decoder.decode_all(&buffer).collect();
    assert_eq!(results.len(), 1);
    assert!(results[0].is_ok());
}

fn comp_id_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9]{0,11}"
}

fn body_value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 .:=-]{1,16}"
}

fn body_fields_strategy() -> impl Strategy<Value = Vec<(u32, String)>> {
    prop::collection::vec(
        (
            prop_oneof![Just(58u32), Just(112u32), Just(5001u32), Just(9999u32)],
            body_value_strategy(),
        ),
        0..6,
    )
}

proptest! {
    /// Invariant 1: every encoder output decodes with all checks on, and the
    /// fields come back in emission order.
    #[test]
    fn prop_encode_decode_round_trip(
        sender in comp_id_strategy(),
        target in comp_id_strategy(),
        seq in 1u64..1_000_000,
        body in body_fields_strategy(),
    ) {
        let dict = Dictionary::new();
        let mut encoder = frozen_encoder(&dict, &sender, &target);
        encoder.msg_type("0").seq_num(seq);
        for (tag, value) in &body {
            encoder.field_str(*tag, value).unwrap();
        }
        let wire = encoder.build().unwrap();

        let mut decoder = Decoder::new(&dict);
        let mut cursor = 0;
        let message = decoder.decode_one(&wire, &mut cursor).unwrap();
        prop_assert_eq!(cursor, wire.len());
        prop_assert_eq!(message.msg_type(), "0");
        prop_assert_eq!(message.get_int(34).unwrap(), Some(seq as i64));
        prop_assert_eq!(message.get_text(49).unwrap(), Some(sender.as_str()));

        let mut expected = vec![8u32, 9, 35, 49, 56, 34, 52];
        expected.extend(body.iter().map(|(tag, _)| *tag));
        expected.push(10);
        let scanned: Vec<u32> = message.iter_in_order().map(|f| f.tag()).collect();
        prop_assert_eq!(scanned, expected);
    }

    /// Invariant 2: decode then re-encode with the same identities and
    /// sending time reproduces the original bytes.
    #[test]
    fn prop_decode_reencode_identity(
        sender in comp_id_strategy(),
        target in comp_id_strategy(),
        seq in 1u64..1_000_000,
        body in body_fields_strategy(),
    ) {
        let dict = Dictionary::new();
        let mut encoder = frozen_encoder(&dict, &sender, &target);
        encoder.msg_type("0").seq_num(seq);
        for (tag, value) in &body {
            encoder.field_str(*tag, value).unwrap();
        }
        let wire = encoder.build().unwrap();

        let mut decoder = Decoder::new(&dict);
        let mut cursor = 0;
        let message = decoder.decode_one(&wire, &mut cursor).unwrap();

        let mut second = frozen_encoder(&dict, &sender, &target);
        second.msg_type(message.msg_type()).seq_num(seq);
        for field in message.iter_in_order() {
            if !tags::is_reserved(field.tag()) {
                second.field_raw(field.tag(), field.bytes()).unwrap();
            }
        }
        let reencoded = second.build().unwrap();
        prop_assert_eq!(&reencoded[..], &wire[..]);
    }

    /// Invariant 3: for any input, the cursor either stays at entry on
    /// failure or advances by exactly the consumed message length. Repeating
    /// the call is deterministic (invariant 6).
    #[test]
    fn prop_cursor_discipline(input in prop::collection::vec(any::<u8>(), 0..256)) {
        let dict = Dictionary::new();
        let mut decoder = Decoder::new(&dict);
        let mut cursor = 0;
        let first = decoder.decode_one(&input, &mut cursor);
        match &first {
            Ok(message) => prop_assert_eq!(cursor, message.len()),
            Err(_) => prop_assert_eq!(cursor, 0),
        }

        let mut cursor = 0;
        let second = decoder.decode_one(&input, &mut cursor);
        match (&first, &second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a.wire_bytes(), b.wire_bytes()),
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "decode was not deterministic"),
        }
    }

    /// Invariant 4/5: the trailer is `10=` plus three digits matching the sum
    /// of all prior bytes, and tag 9 declares the measured body span.
    #[test]
    fn prop_emitted_framing_is_consistent(
        seq in 1u64..1_000_000,
        body in body_fields_strategy(),
    ) {
        let dict = Dictionary::new();
        let mut encoder = frozen_encoder(&dict, "CLIENT", "SERVER");
        encoder.msg_type("0").seq_num(seq);
        for (tag, value) in &body {
            encoder.field_str(*tag, value).unwrap();
        }
        let wire = encoder.build().unwrap();

        let trailer_at = wire.len() - 7;
        prop_assert_eq!(&wire[trailer_at..trailer_at + 3], b"10=");
        prop_assert!(wire[trailer_at + 3..trailer_at + 6]
            .iter()
            .all(u8::is_ascii_digit));
        prop_assert_eq!(wire[wire.len() - 1], SOH);
        let expected = calculate_checksum(&wire[..trailer_at]);
        prop_assert_eq!(&wire[trailer_at + 3..trailer_at + 6], &format_checksum(expected));

        // 9=<n><SOH> starts right after the BeginString field.
        let length_field = 10;
        prop_assert_eq!(&wire[length_field..length_field + 2], b"9=");
        let length_end = length_field
            + 2
            + wire[length_field + 2..]
                .iter()
                .position(|&b| b == SOH)
                .unwrap();
        let declared: usize = std::str::from_utf8(&wire[length_field + 2..length_end])
            .unwrap()
            .parse()
            .unwrap();
        prop_assert_eq!(declared, trailer_at - (length_end + 1));
    }

    /// Corrupting any byte ahead of the trailer is always detected.
    #[test]
    fn prop_corruption_is_detected(
        offset_seed in 0usize..4096,
        flip in 1u8..=255,
    ) {
        let dict = Dictionary::new();
        let mut wire = frame(HEARTBEAT_BODY);
        let offset = offset_seed % (wire.len() - 7);
        wire[offset] ^= flip;

        let mut decoder = Decoder::new(&dict);
        let mut cursor = 0;
        prop_assert!(decoder.decode_one(&wire, &mut cursor).is_err());
        prop_assert_eq!(cursor, 0);
    }

    /// Invariant 7: k concatenated messages decode to exactly k results and
    /// the cursor lands on the end of the buffer.
    #[test]
    fn prop_concatenated_messages(k in 1usize..6) {
        let dict = Dictionary::new();
        let mut encoder = frozen_encoder(&dict, "CLIENT", "SERVER");
        encoder.msg_type("0");
        let mut buffer = Vec::new();
        for seq in 1..=k {
            encoder.seq_num(seq as u64);
            buffer.extend_from_slice(&encoder.build().unwrap());
        }

        let mut decoder = Decoder::new(&dict);
        let mut iter = decoder.decode_all(&buffer);
        for seq in 1..=k {
            let message = iter.next().unwrap().unwrap();
            prop_assert_eq!(message.get_int(34).unwrap(), Some(seq as i64));
        }
        prop_assert!(iter.next().is_none());
        prop_assert_eq!(iter.cursor(), buffer.len());
    }

    /// Invariant 8: an unknown tag with any SOH-free value never breaks a
    /// message that carries its required fields.
    #[test]
    fn prop_unknown_tags_are_permitted(value in body_value_strategy()) {
        let dict = Dictionary::new();
        let raw = frame(&format!(
            "35=0\x0149=CLIENT\x0156=SERVER\x0134=1\x0152=20231201-10:30:00.000\x017777={value}\x01"
        ));

        let mut decoder = Decoder::new(&dict);
        let mut cursor = 0;
        let message = decoder.decode_one(&raw, &mut cursor).unwrap();
        prop_assert_eq!(message.get_text(7777).unwrap(), Some(value.as_str()));
    }
}
