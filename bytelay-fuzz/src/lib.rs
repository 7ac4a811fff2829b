//! Fuzzing placeholder for bytelay-core decoding
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_read

use bytelay_core::{from_bytes, Layout, Len, PrimKind};

fn harness_layout() -> Layout {
    Layout::record([
        ("tag", Layout::primitive(PrimKind::I32)),
        ("name", Layout::ascii(8)),
        ("count", Layout::primitive(PrimKind::U16)),
        (
            "items",
            // Integer-only elements keep re-encoding byte-exact; booleans
            // canonicalize nonzero bytes to 1 and would break the
            // round-trip assertion below.
            Layout::array(
                Layout::tuple([
                    Layout::primitive(PrimKind::U32),
                    Layout::primitive(PrimKind::I8),
                ]),
                Len::of_field("count"),
            ),
        ),
    ])
}

pub fn fuzz_read(data: &[u8]) {
    // Try to decode - should never panic
    let _ = from_bytes(data, &harness_layout());
}

pub fn fuzz_read_round_trip(data: &[u8]) {
    // Anything that decodes must re-encode to the same bytes
    let layout = harness_layout();
    if let Ok(value) = from_bytes(data, &layout) {
        // Decode consumed exactly encoded.len() bytes from the front.
        let encoded = bytelay_core::to_bytes(&layout, &value).unwrap();
        assert_eq!(&data[..encoded.len()], encoded.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzz_read_empty() {
        fuzz_read(&[]);
    }

    #[test]
    fn test_fuzz_read_random() {
        fuzz_read(&[0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn test_fuzz_round_trip_random() {
        fuzz_read_round_trip(&[0xFF; 64]);
    }

    #[test]
    fn test_fuzz_round_trip_valid_prefix() {
        // tag + name + zero count, no items
        let mut data = Vec::new();
        data.extend_from_slice(&1i32.to_le_bytes());
        data.extend_from_slice(b"fuzzname");
        data.extend_from_slice(&0u16.to_le_bytes());
        fuzz_read_round_trip(&data);
    }
}
