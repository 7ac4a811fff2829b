//! Fixed-width scalar codec

use crate::error::MarshalError;
use crate::order::ByteOrder;
use crate::value::Value;
use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};

/// Fixed-width primitive kinds
///
/// Widths are fixed by the kind: 1 byte for `U8`/`I8`/`Bool8`, 2 for
/// `U16`/`I16`, 4 for `U32`/`I32`/`F32`/`Bool32`, 8 for `U64`/`I64`/`F64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimKind {
    /// Unsigned byte
    U8,
    /// Signed byte
    I8,
    /// Unsigned 16-bit integer
    U16,
    /// Signed 16-bit integer
    I16,
    /// Unsigned 32-bit integer
    U32,
    /// Signed 32-bit integer
    I32,
    /// Unsigned 64-bit integer
    U64,
    /// Signed 64-bit integer
    I64,
    /// IEEE-754 single-precision float
    F32,
    /// IEEE-754 double-precision float
    F64,
    /// Single-byte boolean, any nonzero byte is true
    Bool8,
    /// Four-byte boolean, any nonzero word is true
    Bool32,
}

impl PrimKind {
    /// Encoded width in bytes
    pub const fn width(&self) -> usize {
        match self {
            PrimKind::U8 | PrimKind::I8 | PrimKind::Bool8 => 1,
            PrimKind::U16 | PrimKind::I16 => 2,
            PrimKind::U32 | PrimKind::I32 | PrimKind::F32 | PrimKind::Bool32 => 4,
            PrimKind::U64 | PrimKind::I64 | PrimKind::F64 => 8,
        }
    }

    /// Kind name used in diagnostics
    pub const fn name(&self) -> &'static str {
        match self {
            PrimKind::U8 => "ubyte",
            PrimKind::I8 => "sbyte",
            PrimKind::U16 => "ushort",
            PrimKind::I16 => "sshort",
            PrimKind::U32 => "uint32",
            PrimKind::I32 => "sint32",
            PrimKind::U64 => "uint64",
            PrimKind::I64 => "sint64",
            PrimKind::F32 => "float32",
            PrimKind::F64 => "float64",
            PrimKind::Bool8 => "bool8",
            PrimKind::Bool32 => "bool32",
        }
    }

    /// Decode exactly `width` bytes into a native scalar value
    pub fn decode(&self, bytes: &[u8], order: ByteOrder) -> Result<Value, MarshalError> {
        if bytes.len() < self.width() {
            return Err(MarshalError::Underflow(self.width()));
        }

        let value = match self {
            PrimKind::U8 => Value::UInt(bytes[0].into()),
            PrimKind::I8 => Value::Int((bytes[0] as i8).into()),
            PrimKind::U16 => {
                let v = match order {
                    ByteOrder::Big => u16::from_be_bytes(take(bytes)),
                    ByteOrder::Little => u16::from_le_bytes(take(bytes)),
                };
                Value::UInt(v.into())
            }
            PrimKind::I16 => {
                let v = match order {
                    ByteOrder::Big => i16::from_be_bytes(take(bytes)),
                    ByteOrder::Little => i16::from_le_bytes(take(bytes)),
                };
                Value::Int(v.into())
            }
            PrimKind::U32 => {
                let v = match order {
                    ByteOrder::Big => u32::from_be_bytes(take(bytes)),
                    ByteOrder::Little => u32::from_le_bytes(take(bytes)),
                };
                Value::UInt(v.into())
            }
            PrimKind::I32 => {
                let v = match order {
                    ByteOrder::Big => i32::from_be_bytes(take(bytes)),
                    ByteOrder::Little => i32::from_le_bytes(take(bytes)),
                };
                Value::Int(v.into())
            }
            PrimKind::U64 => Value::UInt(match order {
                ByteOrder::Big => u64::from_be_bytes(take(bytes)),
                ByteOrder::Little => u64::from_le_bytes(take(bytes)),
            }),
            PrimKind::I64 => Value::Int(match order {
                ByteOrder::Big => i64::from_be_bytes(take(bytes)),
                ByteOrder::Little => i64::from_le_bytes(take(bytes)),
            }),
            PrimKind::F32 => {
                let v = match order {
                    ByteOrder::Big => f32::from_be_bytes(take(bytes)),
                    ByteOrder::Little => f32::from_le_bytes(take(bytes)),
                };
                Value::Float(v.into())
            }
            PrimKind::F64 => Value::Float(match order {
                ByteOrder::Big => f64::from_be_bytes(take(bytes)),
                ByteOrder::Little => f64::from_le_bytes(take(bytes)),
            }),
            PrimKind::Bool8 => Value::Bool(bytes[0] != 0),
            PrimKind::Bool32 => Value::Bool(bytes[..4].iter().any(|&b| b != 0)),
        };

        Ok(value)
    }

    /// Encode a native scalar into `buf`, appending exactly `width` bytes
    ///
    /// Integer values coerce across signedness when the magnitude fits the
    /// kind's range; anything else is a type mismatch. No truncation is ever
    /// performed.
    pub fn encode_into(
        &self,
        value: &Value,
        order: ByteOrder,
        buf: &mut BytesMut,
    ) -> Result<(), MarshalError> {
        match self {
            PrimKind::U8 => buf.put_u8(self.uint_in_range(value, u8::MAX as u64)? as u8),
            PrimKind::U16 => {
                let v = self.uint_in_range(value, u16::MAX as u64)? as u16;
                match order {
                    ByteOrder::Big => buf.put_u16(v),
                    ByteOrder::Little => buf.put_u16_le(v),
                }
            }
            PrimKind::U32 => {
                let v = self.uint_in_range(value, u32::MAX as u64)? as u32;
                match order {
                    ByteOrder::Big => buf.put_u32(v),
                    ByteOrder::Little => buf.put_u32_le(v),
                }
            }
            PrimKind::U64 => {
                let v = self.uint_in_range(value, u64::MAX)?;
                match order {
                    ByteOrder::Big => buf.put_u64(v),
                    ByteOrder::Little => buf.put_u64_le(v),
                }
            }
            PrimKind::I8 => {
                buf.put_i8(self.int_in_range(value, i8::MIN as i64, i8::MAX as i64)? as i8)
            }
            PrimKind::I16 => {
                let v = self.int_in_range(value, i16::MIN as i64, i16::MAX as i64)? as i16;
                match order {
                    ByteOrder::Big => buf.put_i16(v),
                    ByteOrder::Little => buf.put_i16_le(v),
                }
            }
            PrimKind::I32 => {
                let v = self.int_in_range(value, i32::MIN as i64, i32::MAX as i64)? as i32;
                match order {
                    ByteOrder::Big => buf.put_i32(v),
                    ByteOrder::Little => buf.put_i32_le(v),
                }
            }
            PrimKind::I64 => {
                let v = self.int_in_range(value, i64::MIN, i64::MAX)?;
                match order {
                    ByteOrder::Big => buf.put_i64(v),
                    ByteOrder::Little => buf.put_i64_le(v),
                }
            }
            PrimKind::F32 => {
                let v = value.as_f64().ok_or_else(|| self.mismatch(value))? as f32;
                match order {
                    ByteOrder::Big => buf.put_f32(v),
                    ByteOrder::Little => buf.put_f32_le(v),
                }
            }
            PrimKind::F64 => {
                let v = value.as_f64().ok_or_else(|| self.mismatch(value))?;
                match order {
                    ByteOrder::Big => buf.put_f64(v),
                    ByteOrder::Little => buf.put_f64_le(v),
                }
            }
            PrimKind::Bool8 => {
                let v = value.as_bool().ok_or_else(|| self.mismatch(value))?;
                buf.put_u8(v as u8);
            }
            PrimKind::Bool32 => {
                let v = value.as_bool().ok_or_else(|| self.mismatch(value))?;
                match order {
                    ByteOrder::Big => buf.put_u32(v as u32),
                    ByteOrder::Little => buf.put_u32_le(v as u32),
                }
            }
        }

        Ok(())
    }

    fn mismatch(&self, value: &Value) -> MarshalError {
        MarshalError::TypeMismatch {
            expected: self.name(),
            found: value.type_name(),
        }
    }

    fn uint_in_range(&self, value: &Value, max: u64) -> Result<u64, MarshalError> {
        match value.as_u64() {
            Some(v) if v <= max => Ok(v),
            _ => Err(self.mismatch(value)),
        }
    }

    fn int_in_range(&self, value: &Value, min: i64, max: i64) -> Result<i64, MarshalError> {
        match value.as_i64() {
            Some(v) if v >= min && v <= max => Ok(v),
            _ => Err(self.mismatch(value)),
        }
    }
}

/// Copy the leading `N` bytes into a fixed array for `from_*_bytes`
fn take<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut array = [0u8; N];
    array.copy_from_slice(&bytes[..N]);
    array
}
