//! Byte order selection for multi-byte primitives

use serde::{Deserialize, Serialize};

/// The byte order applied to multi-byte primitive values
///
/// Passed explicitly per `read`/`write` call; the engine never stores it in
/// shared state, so concurrent calls on different streams cannot interfere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ByteOrder {
    /// Most-significant byte first
    Big,
    /// Least-significant byte first
    Little,
}

impl Default for ByteOrder {
    fn default() -> Self {
        ByteOrder::Little
    }
}
