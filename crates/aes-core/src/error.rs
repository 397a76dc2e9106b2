//! Engine error type.

use thiserror::Error;

/// Errors reported by the AES engine boundary.
///
/// The engine never truncates or pads: a slice that is not exactly one block
/// is rejected here, padding is the caller's concern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AesError {
    /// A key or state slice was not exactly one block long.
    #[error("invalid block length: expected {expected} bytes, got {actual}")]
    InvalidBlockLength {
        /// Required length in bytes.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },
}
