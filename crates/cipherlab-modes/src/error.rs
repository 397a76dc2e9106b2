//! Error types for cipher and mode operations.

use aes_core::AesError;
use thiserror::Error;

/// Errors surfaced by cipher construction and mode composition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModeError {
    /// Key or IV material fails the validity rules of the selected cipher.
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// A buffer handed to a per-block operation has the wrong length.
    #[error("invalid block length: expected a multiple of {expected} bytes, got {actual}")]
    InvalidBlockLength {
        /// Cipher block size in bytes.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// Engine-level block error.
    #[error(transparent)]
    Aes(#[from] AesError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ModeError>;
