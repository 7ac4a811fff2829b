//! Declaring and round-tripping a dBase-style file header

use bytelay_core::{from_bytes, to_bytes, Layout, Len, PrimKind, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Bytelay dBase Header Example\n");

    // A dBase III header: fixed prologue followed by one 32-byte field
    // descriptor per column. The descriptor count is not stored directly,
    // so this layout carries it in a sidecar field for the demo.
    let field_descriptor = Layout::record([
        ("name", Layout::ascii(11)),
        ("kind", Layout::ascii(1)),
        ("reserved1", Layout::array(Layout::primitive(PrimKind::U8), 4)),
        ("length", Layout::primitive(PrimKind::U8)),
        ("decimals", Layout::primitive(PrimKind::U8)),
        ("reserved2", Layout::array(Layout::primitive(PrimKind::U8), 14)),
    ]);

    let header = Layout::record([
        ("version", Layout::primitive(PrimKind::U8)),
        ("updated", Layout::array(Layout::primitive(PrimKind::U8), 3)),
        ("record_count", Layout::primitive(PrimKind::U32)),
        ("header_len", Layout::primitive(PrimKind::U16)),
        ("record_len", Layout::primitive(PrimKind::U16)),
        ("field_count", Layout::primitive(PrimKind::U16)),
        (
            "fields",
            Layout::array(field_descriptor, Len::of_field("field_count")),
        ),
    ]);

    let zeros = |n: usize| Value::seq((0..n).map(|_| Value::UInt(0)));

    let value = Value::record([
        ("version", Value::UInt(0x03)),
        ("updated", Value::seq([Value::UInt(95), Value::UInt(7), Value::UInt(26)])),
        ("record_count", Value::UInt(1200)),
        ("header_len", Value::UInt(97)),
        ("record_len", Value::UInt(25)),
        ("field_count", Value::UInt(2)),
        (
            "fields",
            Value::seq([
                Value::record([
                    ("name", Value::Str("NAME\u{0}\u{0}\u{0}\u{0}\u{0}\u{0}\u{0}".to_owned())),
                    ("kind", Value::from("C")),
                    ("reserved1", zeros(4)),
                    ("length", Value::UInt(20)),
                    ("decimals", Value::UInt(0)),
                    ("reserved2", zeros(14)),
                ]),
                Value::record([
                    ("name", Value::Str("AGE\u{0}\u{0}\u{0}\u{0}\u{0}\u{0}\u{0}\u{0}".to_owned())),
                    ("kind", Value::from("N")),
                    ("reserved1", zeros(4)),
                    ("length", Value::UInt(3)),
                    ("decimals", Value::UInt(0)),
                    ("reserved2", zeros(14)),
                ]),
            ]),
        ),
    ]);

    let encoded = to_bytes(&header, &value)?;
    println!("Encoded header: {} bytes", encoded.len());

    let decoded = from_bytes(&encoded, &header)?;
    let field_count = decoded.get("field_count").and_then(Value::as_u64).unwrap();
    println!("Decoded {} field descriptors:", field_count);

    for field in decoded.get("fields").and_then(Value::as_seq).unwrap() {
        let name = field.get("name").and_then(Value::as_str).unwrap();
        let kind = field.get("kind").and_then(Value::as_str).unwrap();
        let length = field.get("length").and_then(Value::as_u64).unwrap();
        println!("  {:11} kind={} length={}", name.trim_end_matches('\u{0}'), kind, length);
    }

    assert_eq!(decoded, value);
    println!("\nRound trip OK");

    Ok(())
}
