//! Marshal engine: single-pass recursive read/write over a layout tree

use crate::context::Context;
use crate::error::MarshalError;
use crate::layout::Layout;
use crate::order::ByteOrder;
use crate::value::Value;
use bytes::{Bytes, BytesMut};
use std::io::{Cursor, ErrorKind, Read, Write};

#[cfg(feature = "logging")]
use tracing::debug;

/// Upper bound on buffer capacity reserved before any payload byte has
/// actually arrived. Decoded lengths are untrusted; buffers grow only as
/// the source delivers bytes, so a hostile count exhausts the source and
/// fails with `Underflow` instead of aborting on allocation.
const PREALLOC_LIMIT: usize = 64 * 1024;

/// Read one value described by `layout` from `source`, little-endian
pub fn read<R: Read>(source: &mut R, layout: &Layout) -> Result<Value, MarshalError> {
    read_with(source, layout, ByteOrder::default())
}

/// Read one value described by `layout` from `source` under `order`
///
/// Walks the layout top-down in a single pass, resolving dynamic lengths
/// against the sibling fields decoded so far. The call either returns the
/// complete value or fails; nothing partial is returned and no state
/// survives the call.
pub fn read_with<R: Read>(
    source: &mut R,
    layout: &Layout,
    order: ByteOrder,
) -> Result<Value, MarshalError> {
    #[cfg(feature = "logging")]
    debug!("Reading layout under {:?} byte order", order);

    read_node(source, layout, order, &Context::new())
}

/// Decode a value from a byte slice
pub fn from_bytes(data: &[u8], layout: &Layout) -> Result<Value, MarshalError> {
    from_bytes_with(data, layout, ByteOrder::default())
}

/// Decode a value from a byte slice under an explicit byte order
pub fn from_bytes_with(
    data: &[u8],
    layout: &Layout,
    order: ByteOrder,
) -> Result<Value, MarshalError> {
    let mut cursor = Cursor::new(data);
    read_with(&mut cursor, layout, order)
}

/// Write `value` as described by `layout` to `sink`, little-endian
///
/// Returns the total bytes written.
pub fn write<W: Write>(
    sink: &mut W,
    layout: &Layout,
    value: &Value,
) -> Result<usize, MarshalError> {
    write_with(sink, layout, value, ByteOrder::default())
}

/// Write `value` as described by `layout` to `sink` under `order`
///
/// Mirrors `read_with`: dynamic lengths resolve against the values already
/// written for earlier siblings, and every resolved length is checked
/// against the value before any byte of that field reaches the sink. On
/// failure, bytes already written for earlier fields are not rolled back;
/// discarding the partially written sink is the caller's responsibility.
pub fn write_with<W: Write>(
    sink: &mut W,
    layout: &Layout,
    value: &Value,
    order: ByteOrder,
) -> Result<usize, MarshalError> {
    let written = write_node(sink, layout, value, order, &Context::new())?;

    #[cfg(feature = "logging")]
    debug!("Wrote {} bytes for layout", written);

    Ok(written)
}

/// Encode a value into a freshly allocated buffer
pub fn to_bytes(layout: &Layout, value: &Value) -> Result<Bytes, MarshalError> {
    to_bytes_with(layout, value, ByteOrder::default())
}

/// Encode a value into a freshly allocated buffer under an explicit byte order
pub fn to_bytes_with(
    layout: &Layout,
    value: &Value,
    order: ByteOrder,
) -> Result<Bytes, MarshalError> {
    let mut buf = Vec::new();
    write_with(&mut buf, layout, value, order)?;
    Ok(Bytes::from(buf))
}

fn read_node<R: Read>(
    source: &mut R,
    layout: &Layout,
    order: ByteOrder,
    ctx: &Context,
) -> Result<Value, MarshalError> {
    match layout {
        Layout::Primitive(kind) => {
            let mut buf = [0u8; 8];
            let width = kind.width();
            read_exact(source, &mut buf[..width])?;
            kind.decode(&buf[..width], order)
        }

        Layout::Record(fields) => {
            // The accumulating context doubles as the result record: each
            // decoded field becomes visible to later siblings' length
            // expressions the moment it is inserted.
            let mut inner = Context::new();
            for (name, field) in fields {
                let value = read_node(source, field, order, &inner)?;
                inner.insert(name.clone(), value);
            }
            Ok(inner.into_record())
        }

        Layout::Array { element, len } => {
            let n = len.resolve(ctx)?;
            let mut items = Vec::with_capacity(n.min(PREALLOC_LIMIT));
            for _ in 0..n {
                items.push(read_node(source, element, order, ctx)?);
            }
            Ok(Value::Seq(items))
        }

        Layout::Ascii(len) => {
            let n = len.resolve(ctx)?;
            let buf = read_bounded(source, n)?;
            // One byte per character, no trimming: padding present in the
            // source stays in the text.
            Ok(Value::Str(buf.into_iter().map(char::from).collect()))
        }

        Layout::Tuple(elements) => {
            let mut items = Vec::with_capacity(elements.len());
            for element in elements {
                items.push(read_node(source, element, order, ctx)?);
            }
            Ok(Value::Seq(items))
        }
    }
}

fn write_node<W: Write>(
    sink: &mut W,
    layout: &Layout,
    value: &Value,
    order: ByteOrder,
    ctx: &Context,
) -> Result<usize, MarshalError> {
    match layout {
        Layout::Primitive(kind) => {
            let mut buf = BytesMut::with_capacity(kind.width());
            kind.encode_into(value, order, &mut buf)?;
            sink.write_all(&buf)?;
            Ok(buf.len())
        }

        Layout::Record(fields) => {
            let record = value
                .as_record()
                .ok_or_else(|| mismatch("record", value))?;

            let mut inner = Context::new();
            let mut written = 0;
            for (name, field) in fields {
                // Fields are looked up by declared name; extra keys in the
                // supplied record are ignored.
                let field_value = record
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, v)| v)
                    .ok_or_else(|| MarshalError::MissingField(name.clone()))?;

                written += write_node(sink, field, field_value, order, &inner)?;
                inner.insert(name.clone(), field_value.clone());
            }
            Ok(written)
        }

        Layout::Array { element, len } => {
            let items = value.as_seq().ok_or_else(|| mismatch("sequence", value))?;
            let n = len.resolve(ctx)?;
            if items.len() != n {
                return Err(MarshalError::LengthMismatch {
                    expected: n,
                    actual: items.len(),
                });
            }

            let mut written = 0;
            for item in items {
                written += write_node(sink, element, item, order, ctx)?;
            }
            Ok(written)
        }

        Layout::Ascii(len) => {
            let text = value.as_str().ok_or_else(|| mismatch("text", value))?;
            let n = len.resolve(ctx)?;
            let count = text.chars().count();
            if count != n {
                return Err(MarshalError::LengthMismatch {
                    expected: n,
                    actual: count,
                });
            }

            let mut buf = Vec::with_capacity(n);
            for ch in text.chars() {
                let code = u32::from(ch);
                if code > 0xFF {
                    return Err(mismatch("single-byte character", value));
                }
                buf.push(code as u8);
            }
            sink.write_all(&buf)?;
            Ok(n)
        }

        Layout::Tuple(elements) => {
            let items = value.as_seq().ok_or_else(|| mismatch("sequence", value))?;
            if items.len() != elements.len() {
                return Err(MarshalError::LengthMismatch {
                    expected: elements.len(),
                    actual: items.len(),
                });
            }

            let mut written = 0;
            for (element, item) in elements.iter().zip(items) {
                written += write_node(sink, element, item, order, ctx)?;
            }
            Ok(written)
        }
    }
}

/// Read exactly `n` bytes without trusting `n` for the initial allocation
fn read_bounded<R: Read>(source: &mut R, n: usize) -> Result<Vec<u8>, MarshalError> {
    let mut buf = Vec::with_capacity(n.min(PREALLOC_LIMIT));
    let mut remaining = n;
    while remaining > 0 {
        let chunk = remaining.min(PREALLOC_LIMIT);
        let start = buf.len();
        buf.resize(start + chunk, 0);
        read_exact(source, &mut buf[start..]).map_err(|e| match e {
            MarshalError::Underflow(_) => MarshalError::Underflow(n),
            other => other,
        })?;
        remaining -= chunk;
    }
    Ok(buf)
}

/// Read exactly `buf.len()` bytes, mapping a short source to `Underflow`
fn read_exact<R: Read>(source: &mut R, buf: &mut [u8]) -> Result<(), MarshalError> {
    source.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => MarshalError::Underflow(buf.len()),
        _ => MarshalError::Io(e.to_string()),
    })
}

fn mismatch(expected: &'static str, value: &Value) -> MarshalError {
    MarshalError::TypeMismatch {
        expected,
        found: value.type_name(),
    }
}
