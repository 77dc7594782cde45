use bytes::Bytes;
use proptest::prelude::*;
use sha1::{Digest, Sha1};

use super::*;
use crate::config::DecodeConfig;

fn lenient() -> Decoder {
    Decoder::new(DecodeConfig::default().with_strict_integers(false))
}

#[test]
fn test_decode_integer() {
    assert_eq!(decode(b"i42e").unwrap(), Value::Integer(42));
    assert_eq!(decode(b"i-42e").unwrap(), Value::Integer(-42));
    assert_eq!(decode(b"i0e").unwrap(), Value::Integer(0));
    assert_eq!(decode(b"i123e").unwrap(), Value::Integer(123));
    assert_eq!(decode(b"i-123e").unwrap(), Value::Integer(-123));
}

#[test]
fn test_decode_integer_limits() {
    assert_eq!(
        decode(b"i9223372036854775807e").unwrap(),
        Value::Integer(i64::MAX)
    );
    assert_eq!(
        decode(b"i-9223372036854775808e").unwrap(),
        Value::Integer(i64::MIN)
    );
    assert!(matches!(
        decode(b"i9223372036854775808e"),
        Err(BencodeError::InvalidInteger(_))
    ));
}

#[test]
fn test_decode_integer_invalid() {
    assert!(matches!(decode(b"ie"), Err(BencodeError::InvalidInteger(_))));
    assert!(matches!(decode(b"i-e"), Err(BencodeError::InvalidInteger(_))));
    assert!(matches!(decode(b"i--1e"), Err(BencodeError::InvalidInteger(_))));
    assert!(matches!(decode(b"i1-2e"), Err(BencodeError::InvalidInteger(_))));
    assert!(matches!(decode(b"i1x2e"), Err(BencodeError::InvalidInteger(_))));
    assert!(matches!(decode(b"i42"), Err(BencodeError::UnexpectedEof)));
}

#[test]
fn test_strict_integers_reject_non_canonical() {
    assert!(matches!(decode(b"i-0e"), Err(BencodeError::InvalidInteger(_))));
    assert!(matches!(decode(b"i03e"), Err(BencodeError::InvalidInteger(_))));
    assert!(matches!(decode(b"i-03e"), Err(BencodeError::InvalidInteger(_))));
    assert!(matches!(decode(b"i00e"), Err(BencodeError::InvalidInteger(_))));
}

#[test]
fn test_lenient_integers_accept_non_canonical() {
    let decoder = lenient();
    assert_eq!(decoder.decode(b"i-0e").unwrap(), Value::Integer(0));
    assert_eq!(decoder.decode(b"i03e").unwrap(), Value::Integer(3));
    assert_eq!(decoder.decode(b"i-007e").unwrap(), Value::Integer(-7));
    // Sign placement is still checked
    assert!(decoder.decode(b"i0-5e").is_err());
    assert!(decoder.decode(b"ie").is_err());
}

#[test]
fn test_decode_bytes() {
    assert_eq!(
        decode(b"4:spam").unwrap(),
        Value::Bytes(Bytes::from_static(b"spam"))
    );
    assert_eq!(
        decode(b"0:").unwrap(),
        Value::Bytes(Bytes::from_static(b""))
    );
    assert_eq!(
        decode(b"3:\xff\x00\x01").unwrap().as_bytes().map(|b| &b[..]),
        Some(&b"\xff\x00\x01"[..])
    );
}

#[test]
fn test_decode_bytes_requires_colon() {
    // A zero length prefix still needs its colon
    assert!(matches!(decode(b"0"), Err(BencodeError::UnexpectedEof)));
    assert!(matches!(decode(b"0x"), Err(BencodeError::MissingColon)));
    assert!(matches!(decode(b"4spam"), Err(BencodeError::MissingColon)));
}

#[test]
fn test_decode_bytes_truncated() {
    assert!(matches!(decode(b"5:spam"), Err(BencodeError::UnexpectedEof)));
    assert!(matches!(
        decode(b"99999999999999999999999:x"),
        Err(BencodeError::InvalidStringLength)
    ));
}

#[test]
fn test_decode_list() {
    let result = decode(b"l4:spam4:eggse").unwrap();
    assert_eq!(
        result,
        Value::List(vec![Value::string("spam"), Value::string("eggs")])
    );

    let result = decode(b"l4:spami42ee").unwrap();
    match result {
        Value::List(l) => {
            assert_eq!(l.len(), 2);
            assert_eq!(l[0], Value::Bytes(Bytes::from_static(b"spam")));
            assert_eq!(l[1], Value::Integer(42));
        }
        _ => panic!("expected list"),
    }

    assert_eq!(decode(b"le").unwrap(), Value::List(vec![]));
    assert!(matches!(decode(b"li1e"), Err(BencodeError::UnexpectedEof)));
}

#[test]
fn test_decode_dict() {
    let result = decode(b"d3:cow3:moo4:spam4:eggse").unwrap();
    match result {
        Value::Dict(d) => {
            assert_eq!(d.len(), 2);
            assert_eq!(
                d.get(&Bytes::from_static(b"cow")),
                Some(&Value::Bytes(Bytes::from_static(b"moo")))
            );
            assert_eq!(
                d.get(&Bytes::from_static(b"spam")),
                Some(&Value::string("eggs"))
            );
        }
        _ => panic!("expected dict"),
    }

    assert_eq!(decode(b"de").unwrap(), Value::Dict(Dict::new()));
}

#[test]
fn test_decode_dict_duplicate_key() {
    match decode(b"d3:cow3:moo3:cow3:mooe") {
        Err(BencodeError::DuplicateKey(key)) => assert_eq!(key, "cow"),
        other => panic!("expected duplicate key error, got {:?}", other),
    }
}

#[test]
fn test_decode_dict_missing_value() {
    match decode(b"d3:cowe") {
        Err(BencodeError::MissingValue(key)) => assert_eq!(key, "cow"),
        other => panic!("expected missing value error, got {:?}", other),
    }
}

#[test]
fn test_decode_dict_non_string_key() {
    assert!(matches!(
        decode(b"di1e3:fooe"),
        Err(BencodeError::InvalidKey('i'))
    ));
}

#[test]
fn test_decode_dict_preserves_key_order() {
    let value = decode(b"d1:bi1e1:ai2ee").unwrap();
    let keys: Vec<&[u8]> = value
        .as_dict()
        .unwrap()
        .keys()
        .map(|k| &k[..])
        .collect();
    assert_eq!(keys, vec![&b"b"[..], &b"a"[..]]);
}

#[test]
fn test_dict_equality_ignores_order() {
    assert_eq!(
        decode(b"d1:ai1e1:bi2ee").unwrap(),
        decode(b"d1:bi2e1:ai1ee").unwrap()
    );
    assert_ne!(
        decode(b"d1:ai1e1:bi2ee").unwrap(),
        decode(b"d1:ai1e1:bi3ee").unwrap()
    );
}

#[test]
fn test_unexpected_char() {
    assert!(matches!(decode(b"x"), Err(BencodeError::UnexpectedChar('x'))));
    assert!(matches!(decode(b"lxe"), Err(BencodeError::UnexpectedChar('x'))));
    assert!(matches!(decode(b""), Err(BencodeError::UnexpectedEof)));
}

#[test]
fn test_nesting_limit() {
    let deep = format!("{}{}", "l".repeat(100), "e".repeat(100));
    assert!(matches!(
        decode(deep.as_bytes()),
        Err(BencodeError::NestingTooDeep)
    ));

    let decoder = Decoder::new(DecodeConfig::default().with_max_depth(128));
    assert!(decoder.decode(deep.as_bytes()).is_ok());
}

#[test]
fn test_trailing_data_error() {
    assert!(matches!(
        decode(b"i42eextra"),
        Err(BencodeError::TrailingData)
    ));
}

#[test]
fn test_decode_prefix_reports_consumed() {
    let (value, consumed) = decode_prefix(b"l1:ae1:b").unwrap();
    assert_eq!(value, Value::List(vec![Value::string("a")]));
    assert_eq!(consumed, 5);
}

#[test]
fn test_encode_integer() {
    assert_eq!(encode(&Value::Integer(42)).unwrap(), b"i42e");
    assert_eq!(encode(&Value::Integer(-42)).unwrap(), b"i-42e");
    assert_eq!(encode(&Value::Integer(0)).unwrap(), b"i0e");
}

#[test]
fn test_encode_bytes() {
    assert_eq!(
        encode(&Value::Bytes(Bytes::from_static(b"spam"))).unwrap(),
        b"4:spam"
    );
    assert_eq!(encode(&Value::Bytes(Bytes::new())).unwrap(), b"0:");
}

#[test]
fn test_encode_list() {
    let list = Value::List(vec![
        Value::Bytes(Bytes::from_static(b"spam")),
        Value::Integer(42),
    ]);
    assert_eq!(encode(&list).unwrap(), b"l4:spami42ee");
}

#[test]
fn test_encode_dict() {
    let mut dict = Dict::new();
    dict.insert(
        Bytes::from_static(b"cow"),
        Value::Bytes(Bytes::from_static(b"moo")),
    );
    let value = Value::Dict(dict);
    assert_eq!(encode(&value).unwrap(), b"d3:cow3:mooe");
}

#[test]
fn test_encode_dict_insertion_order_and_sorted() {
    let mut dict = Dict::new();
    dict.insert(Bytes::from_static(b"zeta"), Value::Integer(1));
    dict.insert(Bytes::from_static(b"alpha"), Value::Integer(2));
    let value = Value::Dict(dict);

    assert_eq!(encode(&value).unwrap(), b"d4:zetai1e5:alphai2ee");
    assert_eq!(encode_sorted(&value).unwrap(), b"d5:alphai2e4:zetai1ee");
}

#[test]
fn test_roundtrip() {
    let original = b"d8:announce15:http://test.com4:infod4:name4:test12:piece lengthi16384eee";
    let decoded = decode(original).unwrap();
    let encoded = encode(&decoded).unwrap();
    assert_eq!(encoded, original);
}

#[test]
fn test_roundtrip_unsorted_keys() {
    // Insertion order survives a decode/encode cycle
    let original = b"d4:spaml1:a1:be3:cow3:mooe";
    let decoded = decode(original).unwrap();
    assert_eq!(encode(&decoded).unwrap(), original);
    assert_eq!(
        encode_sorted(&decoded).unwrap(),
        b"d3:cow3:moo4:spaml1:a1:bee"
    );
}

#[test]
fn test_nested_structures() {
    let data = b"d4:listl4:spami42eee";
    let decoded = decode(data).unwrap();
    let encoded = encode(&decoded).unwrap();
    assert_eq!(encoded, data);
}

#[test]
fn test_encoder_writer_api() {
    let mut encoder = Encoder::new();
    encoder.begin_list().unwrap();
    encoder.write_integer(-1).unwrap();
    encoder.write_str("").unwrap();
    encoder.write_bytes(b"ab").unwrap();
    encoder.end().unwrap();
    assert_eq!(encoder.as_bytes(), b"li-1e0:2:abe");
}

#[test]
fn test_value_accessors() {
    let value = Value::Integer(42);
    assert_eq!(value.as_integer(), Some(42));
    assert!(value.as_bytes().is_none());
    assert_eq!(value.kind(), "integer");

    let value = Value::Bytes(Bytes::from_static(b"test"));
    assert_eq!(value.as_str(), Some("test"));
    assert!(value.as_integer().is_none());

    let value = Value::Bytes(Bytes::from_static(b"\xff"));
    assert!(value.as_bytes().is_some());
    assert_eq!(value.as_str(), None);

    let value = Value::List(vec![]);
    assert!(value.as_list().is_some());
    assert!(value.as_dict().is_none());
    assert_eq!(value.kind(), "list");

    let value = decode(b"d1:ki1ee").unwrap();
    assert_eq!(value.get(b"k"), Some(&Value::Integer(1)));
    assert_eq!(value.into_dict().map(|d| d.len()), Some(1));
}

#[test]
fn test_extract_raw() {
    let data = b"d8:announce3:url4:infod6:lengthi3e4:name4:teste5:otheri1ee";
    assert_eq!(
        extract_raw(data, b"info").unwrap(),
        b"d6:lengthi3e4:name4:teste"
    );
    assert_eq!(extract_raw(data, b"announce").unwrap(), b"3:url");
    assert_eq!(extract_raw(data, b"other").unwrap(), b"i1e");
}

#[test]
fn test_extract_raw_matches_decoded_entry() {
    let data = b"d1:ali1e1:xd1:yi-5eee1:b3:fooe";
    let decoded = decode(data).unwrap();
    for key in [&b"a"[..], &b"b"[..]] {
        let raw = extract_raw(data, key).unwrap();
        assert_eq!(Some(&decode(raw).unwrap()), decoded.get(key));
    }
}

#[test]
fn test_extract_raw_errors() {
    assert!(matches!(
        extract_raw(b"li1ee", b"a"),
        Err(BencodeError::NotADictionary)
    ));
    assert!(matches!(
        extract_raw(b"", b"a"),
        Err(BencodeError::UnexpectedEof)
    ));
    match extract_raw(b"d1:ai1ee", b"missing") {
        Err(BencodeError::KeyNotFound(key)) => assert_eq!(key, "missing"),
        other => panic!("expected key not found, got {:?}", other),
    }
    // A malformed value before the target aborts the scan
    assert!(matches!(
        extract_raw(b"d1:ai1x2e1:bi2ee", b"b"),
        Err(BencodeError::InvalidInteger(_))
    ));
    assert!(matches!(
        extract_raw(b"d1:a5:abc", b"b"),
        Err(BencodeError::UnexpectedEof)
    ));
}

#[test]
fn test_extract_raw_path() {
    let data = b"d4:infod5:filesld6:lengthi1eee4:name1:xee";
    assert_eq!(
        extract_raw_path(data, ["info", "files"]).unwrap(),
        b"ld6:lengthi1eee"
    );
    assert_eq!(extract_raw_path(data, ["info", "name"]).unwrap(), b"1:x");
    assert!(matches!(
        extract_raw_path(data, ["info", "name", "deeper"]),
        Err(BencodeError::NotADictionary)
    ));
}

#[test]
fn test_raw_entries() {
    let mut entries = RawEntries::new(b"d1:ai1e1:bl1:cee").unwrap();
    assert_eq!(entries.next().unwrap().unwrap(), (&b"a"[..], &b"i1e"[..]));
    assert_eq!(entries.next().unwrap().unwrap(), (&b"b"[..], &b"l1:ce"[..]));
    assert!(entries.next().is_none());
    assert_eq!(entries.consumed(), 16);
}

#[test]
fn test_extract_raw_nesting_limit() {
    let data = format!("d1:a{}{}1:bi1ee", "l".repeat(100), "e".repeat(100));
    assert!(matches!(
        extract_raw(data.as_bytes(), b"b"),
        Err(BencodeError::NestingTooDeep)
    ));

    let decoder = Decoder::new(DecodeConfig::default().with_max_depth(128));
    assert_eq!(decoder.extract_raw(data.as_bytes(), b"b").unwrap(), b"i1e");
}

#[test]
fn test_extract_raw_validates_skipped_dicts() {
    match extract_raw(b"d1:ad1:be1:ci1ee", b"c") {
        Err(BencodeError::MissingValue(key)) => assert_eq!(key, "b"),
        other => panic!("expected missing value, got {:?}", other),
    }
    assert!(matches!(
        extract_raw(b"d1:adi1ei2ee1:ci1ee", b"c"),
        Err(BencodeError::InvalidKey('i'))
    ));
}

#[test]
fn test_raw_entries_missing_value() {
    let mut entries = RawEntries::new(b"d1:ae").unwrap();
    match entries.next() {
        Some(Err(BencodeError::MissingValue(key))) => assert_eq!(key, "a"),
        other => panic!("expected missing value, got {:?}", other),
    }
    assert!(entries.next().is_none());
}

#[test]
fn test_extract_raw_returns_first_duplicate() {
    let data = b"d1:ai1e1:ai2ee";
    assert_eq!(extract_raw(data, b"a").unwrap(), b"i1e");
    assert!(matches!(decode(data), Err(BencodeError::DuplicateKey(_))));
}

#[test]
fn test_raw_info_hash_survives_reordering() {
    // Keys deliberately out of canonical order
    let data = b"d4:infod4:name4:test12:piece lengthi16384e6:lengthi5eee";
    let raw = extract_raw(data, b"info").unwrap();

    let expected = Sha1::digest(&data[7..data.len() - 1]);
    assert_eq!(Sha1::digest(raw), expected);

    let reencoded = encode_sorted(&decode(raw).unwrap()).unwrap();
    assert_ne!(Sha1::digest(&reencoded), expected);
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Value::Integer),
        proptest::collection::vec(any::<u8>(), 0..16)
            .prop_map(|b| Value::Bytes(Bytes::from(b))),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Value::List),
            proptest::collection::vec((proptest::collection::vec(any::<u8>(), 0..8), inner), 0..6)
                .prop_map(|entries| {
                    Value::Dict(
                        entries
                            .into_iter()
                            .map(|(k, v)| (Bytes::from(k), v))
                            .collect(),
                    )
                }),
        ]
    })
}

proptest! {
    #[test]
    fn test_decode_inverts_encode(value in arb_value()) {
        let encoded = encode(&value).unwrap();
        prop_assert_eq!(decode(&encoded).unwrap(), value.clone());
        prop_assert_eq!(encode(&decode(&encoded).unwrap()).unwrap(), encoded);
    }
}
