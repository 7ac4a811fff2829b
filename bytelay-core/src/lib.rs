//! # Bytelay Core
//!
//! Declarative binary layout marshalling for legacy wire and file formats
//! (C-style structs, dBase-style headers) where field widths, ordering, and
//! byte order are fixed by an external specification.
//!
//! ## Modules
//!
//! - `layout`: Immutable layout descriptors (primitives, records, arrays,
//!   ASCII strings, tuples) and size resolution
//! - `primitive`: Fixed-width scalar codec
//! - `engine`: Single-pass recursive read/write dispatch
//! - `context`: Sibling-field context for dynamic lengths
//! - `value`: Native container values
//! - `order`: Byte order selection
//! - `error`: Error taxonomy

#![warn(missing_docs)]

pub mod context;
pub mod engine;
pub mod error;
pub mod layout;
pub mod order;
pub mod primitive;
pub mod value;

// Re-export commonly used types
pub use context::Context;
pub use engine::{
    from_bytes, from_bytes_with, read, read_with, to_bytes, to_bytes_with, write, write_with,
};
pub use error::MarshalError;
pub use layout::{Layout, Len};
pub use order::ByteOrder;
pub use primitive::PrimKind;
pub use value::Value;

/// Result type alias for Bytelay operations
pub type Result<T> = core::result::Result<T, MarshalError>;
