use proptest::prelude::*;
use webclient_msgpack::{decode, encode, MsgPack, MsgPackEncoder, MsgPackError, PackValue, MAX_DEPTH};

fn sample_value() -> PackValue {
    PackValue::Object(vec![
        ("id".to_owned(), PackValue::Str("ECHOECHO".to_owned())),
        (
            "members".to_owned(),
            PackValue::Array(vec![
                PackValue::Str("AAAAAAAA".to_owned()),
                PackValue::Str("BBBBBBBB".to_owned()),
            ]),
        ),
        ("sortKey".to_owned(), PackValue::Integer(4_294_967_296)),
        ("lat".to_owned(), PackValue::Float(47.3769)),
        ("accuracy".to_owned(), PackValue::Float32(12.5)),
        ("preview".to_owned(), PackValue::Bytes(vec![0xff, 0xd8, 0xff])),
        ("reason".to_owned(), PackValue::Null),
        ("isOutbox".to_owned(), PackValue::Bool(false)),
    ])
}

#[test]
fn hostile_nesting_fails_without_overflowing() {
    let mut arrays = vec![0x91; 1_000_000];
    arrays.push(0xc0);
    assert_eq!(decode(&arrays), Err(MsgPackError::TooDeep(MAX_DEPTH)));

    let mut maps = Vec::new();
    for _ in 0..100_000 {
        maps.extend_from_slice(&[0x81, 0xa1, b'k']);
    }
    maps.push(0xc0);
    assert_eq!(decode(&maps), Err(MsgPackError::TooDeep(MAX_DEPTH)));
}

#[test]
fn nesting_up_to_the_limit_decodes() {
    let mut value = PackValue::Null;
    for _ in 0..MAX_DEPTH {
        value = PackValue::Array(vec![value]);
    }
    assert_eq!(decode(&encode(&value)), Ok(value));
}

#[test]
fn msgpack_document_matrix() {
    let value = sample_value();
    let bytes: MsgPack = encode(&value);
    assert_eq!(bytes[0], 0x88);
    assert_eq!(decode(&bytes).unwrap(), value);
}

#[test]
fn large_containers_use_wide_headers() {
    let items: Vec<PackValue> = (0..300).map(PackValue::Integer).collect();
    let value = PackValue::Array(items);
    let bytes = encode(&value);
    assert_eq!(&bytes[..3], &[0xdc, 0x01, 0x2c]);
    assert_eq!(decode(&bytes).unwrap(), value);
}

#[test]
fn encoder_can_be_reused() {
    let mut encoder = MsgPackEncoder::new();
    let first = encoder.encode(&PackValue::Str("a".to_owned()));
    let second = encoder.encode(&PackValue::Str("a".to_owned()));
    assert_eq!(first, second);
}

fn arb_value() -> impl Strategy<Value = PackValue> {
    let leaf = prop_oneof![
        Just(PackValue::Null),
        any::<bool>().prop_map(PackValue::Bool),
        any::<i64>().prop_map(PackValue::Integer),
        (i64::MAX as u64 + 1..=u64::MAX).prop_map(PackValue::UInteger),
        any::<f64>()
            .prop_filter("NaN never compares equal", |f| !f.is_nan())
            .prop_map(PackValue::Float),
        ".{0,40}".prop_map(PackValue::Str),
        proptest::collection::vec(any::<u8>(), 0..300).prop_map(PackValue::Bytes),
    ];
    leaf.prop_recursive(3, 64, 8, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..20).prop_map(PackValue::Array),
            proptest::collection::vec(("[a-zA-Z]{1,12}", inner), 0..20)
                .prop_map(PackValue::Object),
        ]
    })
}

proptest! {
    #[test]
    fn decode_inverts_encode(value in arb_value()) {
        let bytes = encode(&value);
        prop_assert_eq!(decode(&bytes).unwrap(), value);
    }

    #[test]
    fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let _ = decode(&bytes);
    }
}
