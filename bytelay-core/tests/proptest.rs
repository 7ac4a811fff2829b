//! Property-based tests using proptest

use bytelay_core::{
    from_bytes, from_bytes_with, to_bytes, to_bytes_with, ByteOrder, Layout, Len, PrimKind, Value,
};
use proptest::prelude::*;

fn byte_orders() -> impl Strategy<Value = ByteOrder> {
    prop_oneof![Just(ByteOrder::Little), Just(ByteOrder::Big)]
}

proptest! {
    #[test]
    fn prop_unsigned_round_trip(
        v in any::<u64>(),
        order in byte_orders()
    ) {
        let layout = Layout::primitive(PrimKind::U64);
        let value = Value::UInt(v);

        let encoded = to_bytes_with(&layout, &value, order).unwrap();
        prop_assert_eq!(encoded.len(), 8);
        prop_assert_eq!(from_bytes_with(&encoded, &layout, order).unwrap(), value);
    }

    #[test]
    fn prop_signed_round_trip(
        v in any::<i32>(),
        order in byte_orders()
    ) {
        let layout = Layout::primitive(PrimKind::I32);
        let value = Value::Int(v.into());

        let encoded = to_bytes_with(&layout, &value, order).unwrap();
        prop_assert_eq!(from_bytes_with(&encoded, &layout, order).unwrap(), value);
    }

    #[test]
    fn prop_ascii_round_trip(
        text in "[ -~]{0,64}"
    ) {
        let layout = Layout::ascii(text.len());
        let value = Value::Str(text.clone());

        let encoded = to_bytes(&layout, &value).unwrap();
        prop_assert_eq!(encoded.as_ref(), text.as_bytes());
        prop_assert_eq!(from_bytes(&encoded, &layout).unwrap(), value);
    }

    #[test]
    fn prop_counted_array_round_trip(
        items in prop::collection::vec(any::<u16>(), 0..256),
        order in byte_orders()
    ) {
        let layout = Layout::record([
            ("count", Layout::primitive(PrimKind::U16)),
            ("items", Layout::array(
                Layout::primitive(PrimKind::U16),
                Len::of_field("count"),
            )),
        ]);

        let value = Value::record([
            ("count", Value::UInt(items.len() as u64)),
            ("items", Value::seq(items.iter().map(|&v| Value::from(v)))),
        ]);

        let encoded = to_bytes_with(&layout, &value, order).unwrap();
        prop_assert_eq!(encoded.len(), 2 + 2 * items.len());
        prop_assert_eq!(from_bytes_with(&encoded, &layout, order).unwrap(), value);
    }

    #[test]
    fn prop_fixed_size_matches_encoded_len(
        n in 0usize..32,
        text_len in 0usize..16
    ) {
        let layout = Layout::record([
            ("tag", Layout::primitive(PrimKind::U8)),
            ("name", Layout::ascii(text_len)),
            ("data", Layout::array(Layout::primitive(PrimKind::F32), n)),
        ]);

        let value = Value::record([
            ("tag", Value::UInt(0)),
            ("name", Value::Str("x".repeat(text_len))),
            ("data", Value::seq((0..n).map(|i| Value::Float(i as f64)))),
        ]);

        let encoded = to_bytes(&layout, &value).unwrap();
        prop_assert_eq!(layout.size(None).unwrap(), encoded.len());
    }

    #[test]
    fn prop_decode_never_panics(
        data in prop::collection::vec(any::<u8>(), 0..512)
    ) {
        // A full-width count field lets random data resolve to absurd
        // lengths; decode must error, never panic or abort.
        let layout = Layout::record([
            ("count", Layout::primitive(PrimKind::U64)),
            ("items", Layout::array(
                Layout::primitive(PrimKind::U16),
                Len::of_field("count"),
            )),
            ("len", Layout::primitive(PrimKind::U64)),
            ("name", Layout::ascii(Len::of_field("len"))),
        ]);

        let result = from_bytes(&data, &layout);
        prop_assert!(result.is_ok() || result.is_err());
    }
}
